//! Scans a reference or command string and produces a stream of Tokens.
//!
//! Whitespace between tokens is skipped. Quoted forms:
//! - `'Sheet Name'` for worksheet identifiers
//! - `"text"` for argument keys/values, with `\"` and `\\` escapes
//!
//! An unterminated quote yields `Token::Illegal` with the opening quote.

use super::token::Token;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some('!') => Token::Exclamation,
            Some(':') => Token::Colon,
            Some(',') => Token::Comma,
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,
            Some('"') => self.read_string(),
            Some('\'') => self.read_quoted_identifier(),
            Some(ch) if is_word_char(ch) => self.read_word(ch),
            None => Token::EOF,
            Some(ch) => Token::Illegal(ch),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        while let Some(&ch) = self.input.peek() {
            if !is_word_char(ch) {
                break;
            }
            word.push(ch);
            self.input.next();
        }
        Token::Word(word)
    }

    fn read_string(&mut self) -> Token {
        let mut result = String::new();
        while let Some(ch) = self.input.next() {
            match ch {
                '"' => return Token::String(result),
                '\\' => match self.input.next() {
                    Some('"') => result.push('"'),
                    Some('\\') => result.push('\\'),
                    Some(other) => {
                        result.push('\\');
                        result.push(other);
                    }
                    None => break,
                },
                _ => result.push(ch),
            }
        }
        Token::Illegal('"')
    }

    fn read_quoted_identifier(&mut self) -> Token {
        let mut result = String::new();
        for ch in self.input.by_ref() {
            if ch == '\'' {
                return Token::QuotedIdentifier(result);
            }
            result.push(ch);
        }
        Token::Illegal('\'')
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}
