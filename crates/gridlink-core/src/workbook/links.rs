//! Worksheet link graph.
//!
//! Each worksheet node holds the ids it reads from (`sources`) and writes to
//! (`targets`). An edge `A -> B` is stored twice: `B` in `A.targets` and `A` in
//! `B.sources`. The two halves are separate local mutations with no rollback,
//! so a failed second half leaves a one-sided edge behind.

use crate::error::{GridlinkError, Result};
use std::collections::{BTreeSet, HashMap};

/// Link sets of one worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    pub sources: BTreeSet<String>,
    pub targets: BTreeSet<String>,
}

impl LinkSet {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.targets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Sources,
    Targets,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Sources => Side::Targets,
            Side::Targets => Side::Sources,
        }
    }

    fn of(self, set: &mut LinkSet) -> &mut BTreeSet<String> {
        match self {
            Side::Sources => &mut set.sources,
            Side::Targets => &mut set.targets,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    nodes: HashMap<String, LinkSet>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with empty sets; existing nodes are left alone.
    pub fn insert_node(&mut self, id: impl Into<String>) {
        self.nodes.entry(id.into()).or_default();
    }

    /// Drop a node and every edge half that mentions it.
    pub fn remove_node(&mut self, id: &str) -> Option<LinkSet> {
        let removed = self.nodes.remove(id)?;
        for set in self.nodes.values_mut() {
            set.sources.remove(id);
            set.targets.remove(id);
        }
        Some(removed)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&LinkSet> {
        self.nodes.get(id)
    }

    pub fn sources(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(id).map(|set| &set.sources)
    }

    pub fn targets(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(id).map(|set| &set.targets)
    }

    /// Whether `source` lists `target` and `target` lists `source`.
    pub fn is_linked(&self, source: &str, target: &str) -> bool {
        self.targets(source).is_some_and(|t| t.contains(target))
            && self.sources(target).is_some_and(|s| s.contains(source))
    }

    /// Record that `on` reads from `id`. Only `on` changes.
    pub fn add_source(&mut self, on: &str, id: &str) -> Result<()> {
        self.add(on, Side::Sources, id)
    }

    /// Record that `on` writes to `id`. Only `on` changes.
    pub fn add_target(&mut self, on: &str, id: &str) -> Result<()> {
        self.add(on, Side::Targets, id)
    }

    /// Remove `id` from `on`'s sources and `on` from `id`'s targets.
    /// A missing `id` node is skipped.
    pub fn remove_source(&mut self, on: &str, id: &str) -> Result<()> {
        self.remove(on, Side::Sources, id)
    }

    /// Remove `id` from `on`'s targets and `on` from `id`'s sources.
    /// A missing `id` node is skipped.
    pub fn remove_target(&mut self, on: &str, id: &str) -> Result<()> {
        self.remove(on, Side::Targets, id)
    }

    /// Link `source -> target`: the target gains the source first, then the
    /// source gains the target. The first half is kept when the second fails.
    ///
    /// Returns the errors of each half, in that order.
    pub fn link(&mut self, source: &str, target: &str) -> (Result<()>, Result<()>) {
        let first = self.add_source(target, source);
        let second = self.add_target(source, target);
        (first, second)
    }

    /// Remove both halves of `source -> target`.
    pub fn unlink(&mut self, source: &str, target: &str) -> Result<()> {
        self.remove_target(source, target)
    }

    fn add(&mut self, on: &str, side: Side, id: &str) -> Result<()> {
        let set = self
            .nodes
            .get_mut(on)
            .ok_or_else(|| GridlinkError::missing_worksheet(on))?;
        let members = side.of(set);
        if members.contains(id) {
            return Err(GridlinkError::DuplicateLink {
                worksheet: on.to_string(),
                id: id.to_string(),
            });
        }
        members.insert(id.to_string());
        Ok(())
    }

    fn remove(&mut self, on: &str, side: Side, id: &str) -> Result<()> {
        let set = self
            .nodes
            .get_mut(on)
            .ok_or_else(|| GridlinkError::missing_worksheet(on))?;
        side.of(set).remove(id);

        match self.nodes.get_mut(id) {
            Some(remote) => {
                side.opposite().of(remote).remove(on);
            }
            None => tracing::debug!(on, id, "remote endpoint gone, skipping its half"),
        }
        Ok(())
    }
}
