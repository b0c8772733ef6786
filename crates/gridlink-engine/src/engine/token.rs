//! Token definitions shared by the reference and command grammars.

/// Tokens recognized by the lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /// Bare run of `[A-Za-z0-9_.-]`: worksheet ids, cell labels, command
    /// names, argument keys and values.
    Word(String),
    /// Quoted worksheet identifier: 'Sheet Name'
    QuotedIdentifier(String),
    /// Double-quoted argument text: "foo bar"
    String(String),

    // Delimiters
    /// Worksheet separator: !
    Exclamation,
    Colon,
    Comma,
    LParen,
    RParen,

    // Special
    EOF,
    Illegal(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(s) => write!(f, "{}", s),
            Token::QuotedIdentifier(s) => write!(f, "'{}'", s),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Exclamation => write!(f, "!"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::EOF => write!(f, "end of input"),
            Token::Illegal(c) => write!(f, "ILLEGAL({})", c),
        }
    }
}
