//! Writer for .grd worksheet files

use super::SheetFile;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a worksheet to a .grd file
pub fn write_grd(path: &Path, file: &SheetFile) -> Result<()> {
    fs::write(path, write_grd_content(file))?;
    Ok(())
}

/// Render a worksheet in .grd format. Cells are written in the order given.
pub fn write_grd_content(file: &SheetFile) -> String {
    let mut lines = vec!["# Gridlink Worksheet".to_string()];
    if let Some(name) = file.name.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("#! name: {}", name));
    }
    lines.push(format!("#! sources: {}", file.attributes.sources));
    lines.push(format!("#! targets: {}", file.attributes.targets));

    for (cell_ref, text) in &file.cells {
        lines.push(format!("{}: \"{}\"", cell_ref, escape_grd_text(text)));
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::parse_grd_content;
    use crate::workbook::LinkAttributes;
    use gridlink_engine::engine::CellRef;

    #[test]
    fn test_write_text_cells_quoted() {
        let file = SheetFile {
            name: None,
            attributes: LinkAttributes::default(),
            cells: vec![(CellRef::new(0, 0), "He said \"hi\"".to_string())],
        };
        let content = write_grd_content(&file);
        assert!(content.contains(r#"A1: "He said \"hi\"""#));
        assert!(content.contains("#! sources: \n"));
    }

    #[test]
    fn test_written_file_parses_back() {
        let file = SheetFile {
            name: Some("Budget".to_string()),
            attributes: LinkAttributes {
                sources: "a".to_string(),
                targets: "b,c".to_string(),
            },
            cells: vec![
                (CellRef::new(0, 0), "line\nbreak".to_string()),
                (CellRef::new(27, 4), "back\\slash".to_string()),
            ],
        };
        let parsed = parse_grd_content(&write_grd_content(&file)).unwrap();
        assert_eq!(parsed, file);
    }
}
