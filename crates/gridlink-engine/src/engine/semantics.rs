//! Evaluation stage: turns an [`Ast`] into a [`Reference`] or [`Command`].
//!
//! The grammar stage guarantees shape; this stage rejects matches that have
//! no meaning:
//! - an AST of the wrong variant (a command where a reference is expected)
//! - a row of `0`, or column/row numbers too large to address
//! - a range whose corner lies left of or above its anchor

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ast::{Ast, CellLabel, CommandNode, ReferenceNode};
use super::cell_ref::{CellRef, column_index_from_label, row_index_from_label};
use super::error::{LangError, ParseResult};
use super::parser;

/// A cell or rectangular range within a named worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub worksheet_id: String,
    pub anchor: CellRef,
    pub corner: CellRef,
}

impl Reference {
    pub fn new(worksheet_id: impl Into<String>, anchor: CellRef, corner: CellRef) -> Self {
        Reference {
            worksheet_id: worksheet_id.into(),
            anchor,
            corner,
        }
    }

    pub fn cell(worksheet_id: impl Into<String>, cell: CellRef) -> Self {
        Self::new(worksheet_id, cell, cell)
    }

    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.corner
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.corner.col - self.anchor.col + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        self.corner.row - self.anchor.row + 1
    }

    /// Cells in row-major order, paired with their `(dx, dy)` offset from the anchor.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), CellRef)> + '_ {
        (self.anchor.row..=self.corner.row)
            .enumerate()
            .flat_map(move |(dy, row)| {
                (self.anchor.col..=self.corner.col)
                    .enumerate()
                    .map(move |(dx, col)| ((dx, dy), CellRef::new(col, row)))
            })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}!{}", self.worksheet_id, self.anchor)
        } else {
            write!(f, "{}!{}:{}", self.worksheet_id, self.anchor, self.corner)
        }
    }
}

/// Ordered key/value arguments of a command.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments {
    entries: Vec<(String, String)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// A named operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub args: Arguments,
}

/// Parse and evaluate a reference string.
pub fn interpret_reference(input: &str) -> ParseResult<Reference> {
    let ast = parser::parse_reference(input)?;
    reference_from_ast(input, ast)
}

/// Parse and evaluate a command string.
pub fn interpret_command(input: &str) -> ParseResult<Command> {
    let ast = parser::parse_command(input)?;
    command_from_ast(input, ast)
}

/// Evaluate a parsed tree as a reference. `input` is only used for error text.
pub fn reference_from_ast(input: &str, ast: Ast) -> ParseResult<Reference> {
    let ReferenceNode {
        worksheet,
        anchor,
        corner,
    } = match ast {
        Ast::Reference(node) => node,
        other => {
            return Err(LangError::semantic(
                input,
                format!("expected a reference, got a {}", other.kind()),
            ));
        }
    };
    if worksheet.is_empty() {
        return Err(LangError::semantic(input, "empty worksheet id"));
    }

    let anchor = cell_from_label(input, &anchor)?;
    let corner = match corner {
        Some(label) => cell_from_label(input, &label)?,
        None => anchor,
    };
    if corner.col < anchor.col || corner.row < anchor.row {
        return Err(LangError::semantic(
            input,
            format!("range corner {} precedes anchor {}", corner, anchor),
        ));
    }

    Ok(Reference::new(worksheet, anchor, corner))
}

/// Evaluate a parsed tree as a command. `input` is only used for error text.
pub fn command_from_ast(input: &str, ast: Ast) -> ParseResult<Command> {
    match ast {
        Ast::Command(CommandNode { name, args }) => Ok(Command {
            name,
            args: args.into_iter().collect(),
        }),
        other => Err(LangError::semantic(
            input,
            format!("expected a command, got a {}", other.kind()),
        )),
    }
}

fn cell_from_label(input: &str, label: &CellLabel) -> ParseResult<CellRef> {
    let col = column_index_from_label(&label.column).ok_or_else(|| {
        LangError::semantic(input, format!("column {} is out of range", label.column))
    })?;
    let row = row_index_from_label(&label.row)
        .ok_or_else(|| LangError::semantic(input, format!("row {} is not a valid row", label.row)))?;
    Ok(CellRef::new(col, row))
}
