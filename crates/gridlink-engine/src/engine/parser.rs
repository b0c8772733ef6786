//! Recursive descent parser that turns a token stream into an [`Ast`].
//!
//! GRAMMAR:
//!   reference --> sheet "!" cell ( ":" cell )? EOF
//!   sheet     --> WORD | QUOTED_IDENTIFIER
//!   cell      --> WORD                       // must look like [A-Z]+[0-9]+
//!   command   --> WORD "(" arguments? ")" EOF
//!   arguments --> argument ( "," argument )*
//!   argument  --> atom ":" atom
//!   atom      --> WORD | STRING
//!
//! Every failure here is a [`LangError::Parse`]; meaning is checked later.

use super::ast::{Ast, CellLabel, CommandNode, ReferenceNode};
use super::cell_ref::split_label;
use super::error::{LangError, ParseResult};
use super::lexer::Lexer;
use super::token::Token;

/// Parse a worksheet-qualified cell or range.
pub fn parse_reference(input: &str) -> ParseResult<Ast> {
    Parser::new(input).reference()
}

/// Parse a command invocation.
pub fn parse_command(input: &str) -> ParseResult<Ast> {
    Parser::new(input).command()
}

pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser and advances to the first token.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            input,
            lexer,
            current_token,
        }
    }

    pub fn reference(&mut self) -> ParseResult<Ast> {
        let worksheet = match &self.current_token {
            Token::Word(w) | Token::QuotedIdentifier(w) if !w.is_empty() => w.clone(),
            other => return Err(self.error(format!("expected worksheet id, found {}", other))),
        };
        self.advance();
        self.expect(Token::Exclamation)?;

        let anchor = self.cell()?;
        let corner = if self.current_token == Token::Colon {
            self.advance();
            Some(self.cell()?)
        } else {
            None
        };
        self.expect_end()?;

        Ok(Ast::Reference(ReferenceNode {
            worksheet,
            anchor,
            corner,
        }))
    }

    pub fn command(&mut self) -> ParseResult<Ast> {
        let name = match &self.current_token {
            Token::Word(w) => w.clone(),
            other => return Err(self.error(format!("expected command name, found {}", other))),
        };
        self.advance();
        self.expect(Token::LParen)?;

        let mut args = Vec::new();
        if self.current_token != Token::RParen {
            loop {
                let key = self.atom()?;
                self.expect(Token::Colon)?;
                let value = self.atom()?;
                args.push((key, value));

                if self.current_token == Token::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        self.expect_end()?;

        Ok(Ast::Command(CommandNode { name, args }))
    }

    fn cell(&mut self) -> ParseResult<CellLabel> {
        let label = match &self.current_token {
            Token::Word(w) => w.clone(),
            other => return Err(self.error(format!("expected cell label, found {}", other))),
        };
        let Some((column, row)) = split_label(&label) else {
            return Err(self.error(format!("'{}' is not a cell label", label)));
        };
        let cell = CellLabel {
            column: column.to_string(),
            row: row.to_string(),
        };
        self.advance();
        Ok(cell)
    }

    fn atom(&mut self) -> ParseResult<String> {
        match &self.current_token {
            Token::Word(w) | Token::String(w) => {
                let text = w.clone();
                self.advance();
                Ok(text)
            }
            other => Err(self.error(format!("expected key or value, found {}", other))),
        }
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if self.current_token == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                expected, self.current_token
            )))
        }
    }

    fn expect_end(&self) -> ParseResult<()> {
        if self.current_token == Token::EOF {
            Ok(())
        } else {
            Err(self.error(format!("unexpected {}", self.current_token)))
        }
    }

    fn error(&self, message: String) -> LangError {
        LangError::parse(self.input, message)
    }
}
