//! Storage for .grd worksheet files

mod parser;
mod writer;

use crate::workbook::LinkAttributes;
use gridlink_engine::engine::CellRef;

pub use parser::{parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};

/// Contents of one worksheet file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetFile {
    pub name: Option<String>,
    pub attributes: LinkAttributes,
    pub cells: Vec<(CellRef, String)>,
}
