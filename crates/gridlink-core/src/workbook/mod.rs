//! Worksheet registry, link graph and link persistence (UI-agnostic).

mod io;
mod links;
mod state;

pub use io::attribute_to_list;
pub use links::{LinkGraph, LinkSet};
pub use state::{LinkAttributes, Workbook, Worksheet};
