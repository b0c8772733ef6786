//! Worksheet data stores.
//!
//! - [`DataStore`] - the addressable 2-D text-cell container behind a worksheet
//! - [`WorksheetRegistry`] - resolves worksheet ids to their stores
//! - [`Sheet`] - in-memory store backed by a `DashMap`

use crate::config::Limits;
use dashmap::DashMap;
use gridlink_engine::engine::CellRef;

/// Sparse text-cell storage.
pub type Grid = DashMap<CellRef, String>;

/// Cell access and redraw requests for one worksheet.
pub trait DataStore {
    /// Text at `cell`, or None when the cell is missing.
    fn get_at(&self, cell: CellRef) -> Option<String>;

    /// Assign `text` to `cell`; None clears it. With `recalc` the store
    /// redraws immediately instead of waiting for [`DataStore::render`].
    fn put_at(&mut self, cell: CellRef, text: Option<String>, recalc: bool);

    /// Request a redraw.
    fn render(&mut self);

    /// Whether `cell` lies inside the store's addressable range.
    fn is_addressable(&self, cell: CellRef) -> bool;
}

/// Resolves a worksheet identifier to its data store.
pub trait WorksheetRegistry {
    fn store(&self, id: &str) -> Option<&dyn DataStore>;
    fn store_mut(&mut self, id: &str) -> Option<&mut dyn DataStore>;
}

/// In-memory worksheet store.
#[derive(Debug, Default)]
pub struct Sheet {
    grid: Grid,
    limits: Limits,
    renders: usize,
    /// Whether any cell changed since the sheet was created or saved
    pub modified: bool,
}

impl Sheet {
    pub fn new(limits: Limits) -> Self {
        Sheet {
            grid: Grid::new(),
            limits,
            renders: 0,
            modified: false,
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of redraws requested so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// All cells sorted row-major.
    pub fn cells(&self) -> Vec<(CellRef, String)> {
        let mut cells: Vec<_> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by(|(a, _), (b, _)| a.row.cmp(&b.row).then(a.col.cmp(&b.col)));
        cells
    }

    /// Remove every cell and redraw.
    pub fn clear(&mut self) {
        if !self.grid.is_empty() {
            self.modified = true;
        }
        self.grid.clear();
        self.render();
    }
}

impl DataStore for Sheet {
    fn get_at(&self, cell: CellRef) -> Option<String> {
        self.grid.get(&cell).map(|text| text.clone())
    }

    fn put_at(&mut self, cell: CellRef, text: Option<String>, recalc: bool) {
        if !self.is_addressable(cell) {
            tracing::warn!(%cell, "write outside addressable range dropped");
            return;
        }
        match text {
            Some(text) => {
                self.grid.insert(cell, text);
            }
            None => {
                self.grid.remove(&cell);
            }
        }
        self.modified = true;
        if recalc {
            self.render();
        }
    }

    fn render(&mut self) {
        self.renders += 1;
        tracing::trace!(renders = self.renders, "render requested");
    }

    fn is_addressable(&self, cell: CellRef) -> bool {
        cell.row < self.limits.max_rows && cell.col < self.limits.max_cols
    }
}
