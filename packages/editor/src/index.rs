//! # Element Index
//!
//! Snapshot of the current document's elements. The index is immutable once
//! built; a re-parse produces a whole new index which replaces the old one in
//! the [`IndexHandle`]. Listeners clone the `Rc` at entry, so a replacement
//! arriving mid-transition never shows them a half-updated index, and the
//! generation counter tells them the snapshot went stale.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use svgsync_common::{overlaps, ElementRecord, SourceRange};

#[derive(Debug, Default, Clone)]
pub struct ElementIndex {
    records: Vec<ElementRecord>,
    /// Position of each id in `records`
    by_id: HashMap<String, usize>,
}

impl ElementIndex {
    /// Build an index from records in document order.
    ///
    /// Ids are expected to be unique; if a record repeats an id, the first
    /// occurrence wins lookups.
    pub fn new(records: Vec<ElementRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(i);
        }

        Self { records, by_id }
    }

    /// Records for `ids`, in the order the ids were given.
    ///
    /// Unknown ids are dropped and repeated ids resolve once.
    pub fn lookup<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&ElementRecord> {
        let mut seen = Vec::with_capacity(ids.len());
        let mut found = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(&i) = self.by_id.get(id.as_ref()) {
                if !seen.contains(&i) {
                    seen.push(i);
                    found.push(&self.records[i]);
                }
            }
        }

        found
    }

    /// Records whose source range overlaps `range`, in index order
    pub fn find_overlapping(&self, range: &SourceRange) -> Vec<&ElementRecord> {
        self.records
            .iter()
            .filter(|record| overlaps(range, &record.source_range))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&ElementRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Holder for the live index snapshot
#[derive(Debug, Default)]
pub struct IndexHandle {
    current: RefCell<Rc<ElementIndex>>,
    generation: Cell<u64>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Rc<ElementIndex> {
        Rc::clone(&self.current.borrow())
    }

    /// Current snapshot together with its generation
    pub fn snapshot(&self) -> (Rc<ElementIndex>, u64) {
        (self.current(), self.generation.get())
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Swap in a new index and bump the generation
    pub fn replace(&self, records: Vec<ElementRecord>) -> Rc<ElementIndex> {
        let index = Rc::new(ElementIndex::new(records));
        *self.current.borrow_mut() = Rc::clone(&index);
        self.generation.set(self.generation.get() + 1);
        index
    }
}
