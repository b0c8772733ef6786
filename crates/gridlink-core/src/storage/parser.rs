//! Parser for .grd worksheet files
//!
//! ```text
//! # comment
//! #! sources: sheet-a,sheet-b
//! #! targets:
//! A1: "Hello"
//! B2: 42
//! ```

use super::SheetFile;
use crate::error::{GridlinkError, Result};
use gridlink_engine::engine::CellRef;
use std::fs;
use std::path::Path;

const MAX_SHEET_FILE_BYTES: u64 = 16 * 1_048_576; // 16 MiB

/// Parse a .grd file
pub fn parse_grd(path: &Path) -> Result<SheetFile> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_SHEET_FILE_BYTES {
        return Err(GridlinkError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: worksheet file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SHEET_FILE_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string
pub fn parse_grd_content(content: &str) -> Result<SheetFile> {
    let mut file = SheetFile::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        if let Some(attribute) = line.strip_prefix("#!") {
            parse_attribute(attribute, line_num + 1, &mut file)?;
            continue;
        }

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: VALUE" format
        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(GridlinkError::Storage {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_label(cell_ref_str).ok_or_else(|| GridlinkError::Storage {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        file.cells.push((cell_ref, parse_cell_value(value_str)));
    }

    Ok(file)
}

fn parse_attribute(attribute: &str, line_num: usize, file: &mut SheetFile) -> Result<()> {
    let Some((key, value)) = attribute.split_once(':') else {
        return Err(GridlinkError::Storage {
            line: line_num,
            message: "Expected '#! KEY: VALUE' attribute".to_string(),
        });
    };
    let value = value.trim().to_string();
    match key.trim() {
        "sources" => file.attributes.sources = value,
        "targets" => file.attributes.targets = value,
        "name" => file.name = Some(value),
        other => {
            return Err(GridlinkError::Storage {
                line: line_num,
                message: format!("Unknown attribute: {}", other),
            });
        }
    }
    Ok(())
}

/// Quoted values are unescaped; anything else is kept verbatim.
fn parse_cell_value(value: &str) -> String {
    let value = value.trim();
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        return unescape_grd_text(&value[1..value.len() - 1]);
    }
    value.to_string()
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    'n' => out.push('\n'),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            } else {
                out.push('\\');
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_and_bare_values() {
        let file = parse_grd_content("A1: \"Hello\"\nB1: 42\nC1: =A1").unwrap();
        assert_eq!(
            file.cells,
            vec![
                (CellRef::new(0, 0), "Hello".to_string()),
                (CellRef::new(1, 0), "42".to_string()),
                (CellRef::new(2, 0), "=A1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_text_escaped_quotes() {
        let file = parse_grd_content(r#"A1: "He said \"hi\"""#).unwrap();
        assert_eq!(file.cells[0].1, "He said \"hi\"");
    }

    #[test]
    fn test_value_may_contain_colons() {
        let file = parse_grd_content("A1: \"S!A1:B2\"").unwrap();
        assert_eq!(file.cells[0].1, "S!A1:B2");
    }

    #[test]
    fn test_attributes() {
        let content = "# Gridlink Worksheet\n#! name: Budget\n#! sources: a,b\n#! targets:\nA1: x\n";
        let file = parse_grd_content(content).unwrap();
        assert_eq!(file.name.as_deref(), Some("Budget"));
        assert_eq!(file.attributes.sources, "a,b");
        assert_eq!(file.attributes.targets, "");
        assert_eq!(file.cells.len(), 1);
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = "\n# This is a comment\nA1: 42\n\n# Another comment\n\nB1: 100\n";
        let file = parse_grd_content(content).unwrap();
        assert_eq!(file.cells.len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert!(matches!(
            parse_grd_content("A1: 1\nnonsense"),
            Err(GridlinkError::Storage { line: 2, .. })
        ));
        assert!(matches!(
            parse_grd_content("a1: 1"),
            Err(GridlinkError::Storage { line: 1, .. })
        ));
        assert!(matches!(
            parse_grd_content("#! colour: red"),
            Err(GridlinkError::Storage { line: 1, .. })
        ));
    }
}
