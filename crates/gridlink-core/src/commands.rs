//! Command registry and the built-in data-movement commands.
//!
//! `replace` walks the source rectangle row by row, applies the substitutions
//! to each present cell and writes the result at the same offset from the
//! target anchor. `copy` is `replace` with no substitutions.
//!
//! Before the first write, both worksheets must resolve and the whole source
//! and target rectangles must be addressable; otherwise the instruction fails
//! with `MissingEndpoint` and no cell is touched.

use crate::error::{GridlinkError, Result};
use crate::sheet::WorksheetRegistry;
use gridlink_engine::engine::{Arguments, CellRef, Reference};
use std::collections::HashMap;
use std::sync::Arc;

/// Executable behavior bound to a command name.
pub trait CommandBehavior {
    fn execute(
        &self,
        sheets: &mut dyn WorksheetRegistry,
        source: &Reference,
        target: &Reference,
        args: &Arguments,
    ) -> Result<()>;
}

impl<F> CommandBehavior for F
where
    F: Fn(&mut dyn WorksheetRegistry, &Reference, &Reference, &Arguments) -> Result<()>,
{
    fn execute(
        &self,
        sheets: &mut dyn WorksheetRegistry,
        source: &Reference,
        target: &Reference,
        args: &Arguments,
    ) -> Result<()> {
        self(sheets, source, target, args)
    }
}

/// Maps command names to behaviors.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn CommandBehavior>>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `copy` and `replace`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("copy", copy);
        registry.register("replace", replace);
        registry
    }

    /// Bind `name` to `behavior`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, behavior: impl CommandBehavior + 'static) {
        self.commands.insert(name.into(), Arc::new(behavior));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandBehavior>> {
        self.commands.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

/// Copy the source range to the target anchor unchanged.
pub fn copy(
    sheets: &mut dyn WorksheetRegistry,
    source: &Reference,
    target: &Reference,
    _args: &Arguments,
) -> Result<()> {
    replace(sheets, source, target, &Arguments::new())
}

/// Copy the source range to the target anchor, replacing every occurrence of
/// each argument key with its value. Keys apply in order, each on the output
/// of the previous one.
pub fn replace(
    sheets: &mut dyn WorksheetRegistry,
    source: &Reference,
    target: &Reference,
    substitutions: &Arguments,
) -> Result<()> {
    let target_corner = check_endpoints(sheets, source, target)?;
    let source_id = source.worksheet_id.as_str();
    let target_id = target.worksheet_id.as_str();

    let mut written = 0usize;
    for ((dx, dy), cell) in source.cells() {
        let entry = sheets
            .store(source_id)
            .ok_or_else(|| GridlinkError::missing_worksheet(source_id))?
            .get_at(cell);
        let entry = entry.map(|text| substitute(text, substitutions));

        let destination = target
            .anchor
            .offset(dx, dy)
            .ok_or_else(|| out_of_range(target_id, target.anchor))?;
        sheets
            .store_mut(target_id)
            .ok_or_else(|| GridlinkError::missing_worksheet(target_id))?
            .put_at(destination, entry, false);
        written += 1;
    }

    sheets
        .store_mut(target_id)
        .ok_or_else(|| GridlinkError::missing_worksheet(target_id))?
        .render();

    tracing::debug!(
        %source,
        target = %target.worksheet_id,
        %target_corner,
        written,
        substitutions = substitutions.len(),
        "range moved"
    );
    Ok(())
}

fn substitute(text: String, substitutions: &Arguments) -> String {
    if text.is_empty() || substitutions.is_empty() {
        return text;
    }
    substitutions
        .iter()
        .fold(text, |acc, (key, value)| acc.replace(key, value))
}

/// Resolve both worksheets and check that every cell to read or write is
/// addressable. Returns the bottom-right target cell.
fn check_endpoints(
    sheets: &dyn WorksheetRegistry,
    source: &Reference,
    target: &Reference,
) -> Result<CellRef> {
    let source_store = sheets
        .store(&source.worksheet_id)
        .ok_or_else(|| GridlinkError::missing_worksheet(&source.worksheet_id))?;
    for cell in [source.anchor, source.corner] {
        if !source_store.is_addressable(cell) {
            return Err(out_of_range(&source.worksheet_id, cell));
        }
    }

    let target_store = sheets
        .store(&target.worksheet_id)
        .ok_or_else(|| GridlinkError::missing_worksheet(&target.worksheet_id))?;
    let corner = target
        .anchor
        .offset(source.width() - 1, source.height() - 1)
        .ok_or_else(|| out_of_range(&target.worksheet_id, target.anchor))?;
    for cell in [target.anchor, corner] {
        if !target_store.is_addressable(cell) {
            return Err(out_of_range(&target.worksheet_id, cell));
        }
    }
    Ok(corner)
}

fn out_of_range(worksheet: &str, cell: CellRef) -> GridlinkError {
    GridlinkError::MissingEndpoint(format!(
        "cell {} is outside the addressable range of {}",
        cell, worksheet
    ))
}
