//! Abstract syntax tree produced by the grammar stage.
//!
//! The tree only records what matched; turning labels into coordinates and
//! arguments into a mapping is the job of [`super::semantics`].

use serde::{Deserialize, Serialize};

/// A matched cell label, split into its column letters and row digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLabel {
    pub column: String,
    pub row: String,
}

impl std::fmt::Display for CellLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// `<worksheet>!<cell>` or `<worksheet>!<cell>:<cell>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceNode {
    pub worksheet: String,
    pub anchor: CellLabel,
    pub corner: Option<CellLabel>,
}

/// `<name>(<key>:<value>, ...)`; arguments in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandNode {
    pub name: String,
    pub args: Vec<(String, String)>,
}

/// Root of a parsed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ast {
    Reference(ReferenceNode),
    Command(CommandNode),
}

impl Ast {
    pub fn kind(&self) -> &'static str {
        match self {
            Ast::Reference(_) => "reference",
            Ast::Command(_) => "command",
        }
    }
}
