use super::links::LinkGraph;
use crate::config::Config;
use crate::error::{ErrorKind, GridlinkError, Result};
use crate::notify::Notifier;
use crate::sheet::{DataStore, Sheet, WorksheetRegistry};
use std::collections::BTreeMap;

/// Comma-joined link lists as persisted on a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    pub sources: String,
    pub targets: String,
}

/// A worksheet: id, display name, cells and persisted link attributes.
#[derive(Debug)]
pub struct Worksheet {
    pub id: String,
    pub name: String,
    pub sheet: Sheet,
    /// Last synchronized link lists (see `Workbook::sync_link_attributes`)
    pub attributes: LinkAttributes,
}

/// All worksheets of a session plus the links between them.
#[derive(Debug, Default)]
pub struct Workbook {
    pub config: Config,
    pub(super) worksheets: BTreeMap<String, Worksheet>,
    pub(super) links: LinkGraph,
}

impl Workbook {
    pub fn new(config: Config) -> Self {
        Workbook {
            config,
            worksheets: BTreeMap::new(),
            links: LinkGraph::new(),
        }
    }

    /// Add an empty worksheet sized by the configured limits.
    pub fn add_worksheet(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&mut Worksheet> {
        let id = id.into();
        if id.is_empty() {
            return Err(GridlinkError::Semantic {
                input: id,
                message: "empty worksheet id".to_string(),
            });
        }
        if self.worksheets.contains_key(&id) {
            return Err(GridlinkError::DuplicateWorksheet(id));
        }
        tracing::info!(id = %id, "worksheet added");
        self.links.insert_node(id.clone());
        let worksheet = Worksheet {
            id: id.clone(),
            name: name.into(),
            sheet: Sheet::new(self.config.limits.clone()),
            attributes: LinkAttributes::default(),
        };
        Ok(self.worksheets.entry(id).or_insert(worksheet))
    }

    /// Remove a worksheet and every link that mentions it.
    pub fn remove_worksheet(&mut self, id: &str) -> Option<Worksheet> {
        let removed = self.worksheets.remove(id)?;
        self.links.remove_node(id);
        tracing::info!(id, "worksheet removed");
        Some(removed)
    }

    pub fn worksheet(&self, id: &str) -> Option<&Worksheet> {
        self.worksheets.get(id)
    }

    pub fn worksheet_mut(&mut self, id: &str) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(id)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.values()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.worksheets.keys().map(String::as_str).collect()
    }

    pub fn links(&self) -> &LinkGraph {
        &self.links
    }

    /// Clear every cell of a worksheet.
    pub fn erase(&mut self, id: &str) -> Result<()> {
        let worksheet = self
            .worksheets
            .get_mut(id)
            .ok_or_else(|| GridlinkError::missing_worksheet(id))?;
        worksheet.sheet.clear();
        Ok(())
    }

    /// Link `source -> target`. Duplicate halves are reported and skipped.
    ///
    /// The target must exist. If the source has gone, the target keeps its
    /// half of the edge and `MissingEndpoint` is returned.
    pub fn link(&mut self, source: &str, target: &str, notifier: &dyn Notifier) -> Result<()> {
        if !self.worksheets.contains_key(target) {
            return Err(GridlinkError::missing_worksheet(target));
        }
        let (first, second) = self.links.link(source, target);
        let mut duplicates = 0;
        for half in [first, second] {
            match half {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::DuplicateLink => {
                    notifier.report(&err.to_string());
                    duplicates += 1;
                    if duplicates == 2 {
                        return Err(err);
                    }
                }
                Err(err) => {
                    tracing::warn!(source, target, error = %err, "link left one-sided");
                    return Err(err);
                }
            }
        }
        tracing::info!(source, target, "worksheets linked");
        Ok(())
    }

    /// Remove the `source -> target` link from both worksheets.
    pub fn unlink(&mut self, source: &str, target: &str) -> Result<()> {
        if self.links.contains(source) {
            self.links.remove_target(source, target)?;
        } else {
            self.links.remove_source(target, source)?;
        }
        tracing::info!(source, target, "worksheets unlinked");
        Ok(())
    }
}

impl WorksheetRegistry for Workbook {
    fn store(&self, id: &str) -> Option<&dyn DataStore> {
        self.worksheets
            .get(id)
            .map(|worksheet| &worksheet.sheet as &dyn DataStore)
    }

    fn store_mut(&mut self, id: &str) -> Option<&mut dyn DataStore> {
        self.worksheets
            .get_mut(id)
            .map(|worksheet| &mut worksheet.sheet as &mut dyn DataStore)
    }
}
