//! Reference and command languages.
//!
//! Both languages run through the same two-stage pipeline:
//!
//! String --> [`Lexer`] --> Tokens --> [`parser`] --> [`Ast`] --> [`semantics`] --> value
//!
//! - [`CellRef`], [`column_index_from_label`], [`column_label`] - coordinate system
//! - [`interpret_reference`] - `Sheet!A1` / `Sheet!A1:B2` into a [`Reference`]
//! - [`interpret_command`] - `name(key:value, ...)` into a [`Command`]

mod ast;
mod cell_ref;
mod error;
mod lexer;
mod parser;
mod semantics;
mod token;

pub use ast::{Ast, CellLabel, CommandNode, ReferenceNode};
pub use cell_ref::{
    ALPHABET_LEN, CellRef, column_index_from_label, column_label, row_index_from_label,
    split_label,
};
pub use error::{LangError, ParseResult};
pub use lexer::Lexer;
pub use parser::{Parser, parse_command, parse_reference};
pub use semantics::{
    Arguments, Command, Reference, command_from_ast, interpret_command, interpret_reference,
    reference_from_ast,
};
pub use token::Token;
