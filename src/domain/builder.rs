//! Tree builder turning an ordered record stream into a family forest.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::forest::{FamilyForest, Person, DEFAULT_MAX_CHILDREN};
use crate::domain::record::Record;

/// Why a record's parent link was not made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Parent id unknown or appearing later in the input
    UnknownParent,
    /// Parent already has the maximum number of children
    CapacityExceeded,
}

/// A parent link the builder could not make; the child became a root instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLink {
    pub child_id: u32,
    pub parent_id: u32,
    pub reason: SkipReason,
}

/// Constructs a forest from records, processing them in input order.
///
/// Parents must precede their children in the input: a reference to an id
/// not seen yet leaves the child as a root.
pub struct TreeBuilder {
    max_children: usize,
    skipped: Vec<SkippedLink>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_max_children(DEFAULT_MAX_CHILDREN)
    }

    pub fn with_max_children(max_children: usize) -> Self {
        Self {
            max_children,
            skipped: Vec::new(),
        }
    }

    /// Build a forest from records.
    ///
    /// Fails on a duplicate id or a record naming itself as parent. Links
    /// that cannot be made are recorded in [`skipped_links`](Self::skipped_links).
    #[instrument(level = "debug", skip(self, records))]
    pub fn build<I>(&mut self, records: I) -> DomainResult<FamilyForest>
    where
        I: IntoIterator<Item = Record>,
    {
        self.skipped.clear();

        let mut forest = FamilyForest::new(self.max_children);
        // Registry: id -> node, only needed while linking
        let mut registry: HashMap<u32, Index> = HashMap::new();

        for record in records {
            let id = record.id;
            if registry.contains_key(&id) {
                return Err(DomainError::DuplicateId(id));
            }
            // 0 means no parent, even when the record was built by hand
            let parent_id = record.parent_id.filter(|&p| p != 0);
            if parent_id == Some(id) {
                return Err(DomainError::SelfParent(id));
            }

            let idx = forest.insert_person(Person::from(record));
            registry.insert(id, idx);

            let Some(parent_id) = parent_id else {
                continue;
            };
            match registry.get(&parent_id) {
                Some(&parent_idx) => match forest.attach_child(parent_idx, idx) {
                    Ok(()) => {}
                    Err(DomainError::CapacityExceeded { max, .. }) => {
                        warn!(
                            "person {} has too many children (max {}), {} stays a root",
                            parent_id, max, id
                        );
                        self.skipped.push(SkippedLink {
                            child_id: id,
                            parent_id,
                            reason: SkipReason::CapacityExceeded,
                        });
                    }
                    Err(e) => return Err(e),
                },
                None => {
                    debug!("parent {} of {} not seen yet, treating as root", parent_id, id);
                    self.skipped.push(SkippedLink {
                        child_id: id,
                        parent_id,
                        reason: SkipReason::UnknownParent,
                    });
                }
            }
        }

        debug!(
            "built forest: {} people, {} roots",
            forest.len(),
            forest.roots().len()
        );
        Ok(forest)
    }

    /// Links skipped during the last [`build`](Self::build).
    pub fn skipped_links(&self) -> &[SkippedLink] {
        &self.skipped
    }
}
