//! gridlink_engine - Reference and command languages for moving data between worksheets.

pub mod engine;
