use super::{LinkAttributes, LinkGraph, LinkSet, Workbook};
use crate::error::{GridlinkError, Result};
use crate::sheet::DataStore;
use crate::storage::{SheetFile, parse_grd, write_grd};
use std::path::Path;

/// Split a persisted comma-joined list. An empty attribute is an empty list.
pub fn attribute_to_list(attr: &str) -> Vec<String> {
    attr.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_to_attribute<'a>(ids: impl IntoIterator<Item = &'a String>) -> String {
    ids.into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn attributes_of(set: &LinkSet) -> LinkAttributes {
    LinkAttributes {
        sources: list_to_attribute(&set.sources),
        targets: list_to_attribute(&set.targets),
    }
}

impl Workbook {
    /// Write every worksheet's link sets into its persisted attributes.
    pub fn sync_link_attributes(&mut self) {
        for (id, worksheet) in self.worksheets.iter_mut() {
            worksheet.attributes = self.links.get(id).map(attributes_of).unwrap_or_default();
        }
    }

    /// Rebuild the link graph from the persisted attributes. Each worksheet
    /// restores only its own halves, so one-sided edges stay one-sided.
    pub fn restore_links(&mut self) {
        self.links = LinkGraph::new();
        for id in self.worksheets.keys() {
            self.links.insert_node(id.clone());
        }
        for (id, worksheet) in &self.worksheets {
            for source in attribute_to_list(&worksheet.attributes.sources) {
                if let Err(err) = self.links.add_source(id, &source) {
                    tracing::debug!(id = %id, error = %err, "skipping persisted source");
                }
            }
            for target in attribute_to_list(&worksheet.attributes.targets) {
                if let Err(err) = self.links.add_target(id, &target) {
                    tracing::debug!(id = %id, error = %err, "skipping persisted target");
                }
            }
        }
    }

    /// Add a worksheet from a .grd file. The file's link attributes are kept
    /// on the worksheet; call [`Workbook::restore_links`] to apply them.
    pub fn load_worksheet(&mut self, id: &str, path: &Path) -> Result<()> {
        let file = parse_grd(path)?;
        self.insert_sheet_file(id, file)
    }

    pub fn insert_sheet_file(&mut self, id: &str, file: SheetFile) -> Result<()> {
        let SheetFile {
            name,
            attributes,
            cells,
        } = file;
        let limits = &self.config.limits;
        if let Some((cell, _)) = cells
            .iter()
            .find(|(cell, _)| cell.row >= limits.max_rows || cell.col >= limits.max_cols)
        {
            return Err(GridlinkError::MissingEndpoint(format!(
                "cell {} is outside the addressable range of {}",
                cell, id
            )));
        }
        let worksheet = self.add_worksheet(id, name.unwrap_or_default())?;
        for (cell, text) in cells {
            worksheet.sheet.put_at(cell, Some(text), false);
        }
        worksheet.sheet.modified = false;
        worksheet.attributes = attributes;
        Ok(())
    }

    /// Snapshot a worksheet for saving, using its current link sets.
    pub fn sheet_file(&self, id: &str) -> Option<SheetFile> {
        let worksheet = self.worksheets.get(id)?;
        let attributes = match self.links.get(id) {
            Some(set) => attributes_of(set),
            None => worksheet.attributes.clone(),
        };
        Some(SheetFile {
            name: Some(worksheet.name.clone()).filter(|n| !n.is_empty()),
            attributes,
            cells: worksheet.sheet.cells(),
        })
    }

    pub fn save_worksheet(&mut self, id: &str, path: &Path) -> Result<()> {
        let file = self
            .sheet_file(id)
            .ok_or_else(|| GridlinkError::missing_worksheet(id))?;
        write_grd(path, &file)?;
        if let Some(worksheet) = self.worksheets.get_mut(id) {
            worksheet.attributes = file.attributes;
            worksheet.sheet.modified = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Limits};
    use crate::notify::CollectingNotifier;
    use crate::storage::parse_grd_content;
    use gridlink_engine::engine::CellRef;

    fn workbook(ids: &[&str]) -> Workbook {
        let mut wb = Workbook::default();
        for id in ids {
            wb.add_worksheet(*id, "").unwrap();
        }
        wb
    }

    #[test]
    fn test_attribute_to_list() {
        assert!(attribute_to_list("").is_empty());
        assert_eq!(attribute_to_list("a"), vec!["a"]);
        assert_eq!(attribute_to_list("a,b"), vec!["a", "b"]);
    }

    #[test]
    fn test_sync_writes_comma_joined_lists() {
        let mut wb = workbook(&["A", "B", "C"]);
        let notifier = CollectingNotifier::new();
        wb.link("A", "B", &notifier).unwrap();
        wb.link("A", "C", &notifier).unwrap();

        wb.sync_link_attributes();

        let a = &wb.worksheet("A").unwrap().attributes;
        assert_eq!(a.sources, "");
        assert_eq!(a.targets, "B,C");
        assert_eq!(wb.worksheet("C").unwrap().attributes.sources, "A");
    }

    #[test]
    fn test_restore_links_round_trips() {
        let mut wb = workbook(&["A", "B"]);
        let notifier = CollectingNotifier::new();
        wb.link("A", "B", &notifier).unwrap();
        wb.sync_link_attributes();

        let mut restored = workbook(&["A", "B"]);
        for id in ["A", "B"] {
            restored.worksheet_mut(id).unwrap().attributes =
                wb.worksheet(id).unwrap().attributes.clone();
        }
        restored.restore_links();

        assert!(restored.links().is_linked("A", "B"));
        assert_eq!(restored.links().get("A"), wb.links().get("A"));
    }

    #[test]
    fn test_restore_keeps_one_sided_edges() {
        let mut wb = workbook(&["A", "B"]);
        wb.worksheet_mut("B").unwrap().attributes.sources = "A".to_string();
        wb.restore_links();

        assert!(wb.links().sources("B").unwrap().contains("A"));
        assert!(wb.links().targets("A").unwrap().is_empty());
    }

    #[test]
    fn test_insert_sheet_file() {
        let file = parse_grd_content("#! name: In\n#! targets: out\nA1: 1\nB2: \"two\"\n").unwrap();
        let mut wb = workbook(&["out"]);
        wb.insert_sheet_file("in", file).unwrap();
        wb.restore_links();

        let ws = wb.worksheet("in").unwrap();
        assert_eq!(ws.name, "In");
        assert_eq!(ws.sheet.get_at(CellRef::new(1, 1)).as_deref(), Some("two"));
        assert!(!ws.sheet.modified);
        assert!(wb.links().targets("in").unwrap().contains("out"));
    }

    #[test]
    fn test_insert_sheet_file_outside_limits_adds_nothing() {
        let mut wb = Workbook::new(Config {
            limits: Limits {
                max_rows: 1,
                max_cols: 1,
            },
            ..Config::default()
        });
        let file = parse_grd_content("A1: 1\nA2: 2\n").unwrap();
        assert!(wb.insert_sheet_file("s", file).is_err());
        assert!(wb.worksheet("s").is_none());
    }

    #[test]
    fn test_sheet_file_uses_live_links() {
        let mut wb = workbook(&["A", "B"]);
        let notifier = CollectingNotifier::new();
        wb.link("A", "B", &notifier).unwrap();
        wb.worksheet_mut("A")
            .unwrap()
            .sheet
            .put_at(CellRef::new(0, 0), Some("x".into()), false);

        let file = wb.sheet_file("A").unwrap();
        assert_eq!(file.attributes.targets, "B");
        assert_eq!(file.cells, vec![(CellRef::new(0, 0), "x".to_string())]);
        assert!(wb.sheet_file("missing").is_none());
    }
}
