use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::Record;

/// Default fan-out cap per person.
pub const DEFAULT_MAX_CHILDREN: usize = 10;

/// Attributes of one person. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub surname: String,
    pub age: u32,
    pub birth_date: String,
}

impl Person {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        surname: impl Into<String>,
        age: u32,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
            age,
            birth_date: birth_date.into(),
        }
    }

    /// `"name surname"`, the label used for display and export.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

impl From<Record> for Person {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            name: record.name,
            surname: record.surname,
            age: record.age,
            birth_date: record.birth_date,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub struct PersonNode {
    /// Person attributes for this node
    pub person: Person,
    /// Index of the parent node in the arena, None for roots
    parent: Option<Index>,
    /// Indices of child nodes, in attachment order
    children: Vec<Index>,
}

impl PersonNode {
    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena-based forest of family trees.
///
/// The forest owns every node; dropping it releases all of them at once.
/// Indices are generation-checked: an index whose slot was never filled or
/// has been reused resolves to `None` instead of a wrong node.
#[derive(Debug)]
pub struct FamilyForest {
    arena: Arena<PersonNode>,
    /// Nodes without a parent, in creation order
    roots: Vec<Index>,
    max_children: usize,
}

impl Default for FamilyForest {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHILDREN)
    }
}

impl FamilyForest {
    pub fn new(max_children: usize) -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            max_children,
        }
    }

    /// Adds an unlinked node. It stays a root until attached to a parent.
    #[instrument(level = "trace", skip(self), fields(id = person.id))]
    pub fn insert_person(&mut self, person: Person) -> Index {
        let node = PersonNode {
            person,
            parent: None,
            children: Vec::new(),
        };
        let idx = self.arena.insert(node);
        self.roots.push(idx);
        idx
    }

    /// Links `child` under `parent`.
    ///
    /// On any error both nodes are left exactly as they were.
    #[instrument(level = "debug", skip(self))]
    pub fn attach_child(&mut self, parent: Index, child: Index) -> DomainResult<()> {
        let parent_node = self.arena.get(parent).ok_or(DomainError::NodeNotFound)?;
        let child_node = self.arena.get(child).ok_or(DomainError::NodeNotFound)?;

        if parent == child {
            return Err(DomainError::SelfParent(child_node.person.id));
        }
        if child_node.parent.is_some() {
            return Err(DomainError::AlreadyAttached {
                child_id: child_node.person.id,
            });
        }
        if parent_node.children.len() >= self.max_children {
            return Err(DomainError::CapacityExceeded {
                parent_id: parent_node.person.id,
                max: self.max_children,
            });
        }
        if self.ancestors(parent).any(|(idx, _)| idx == child) {
            return Err(DomainError::CycleDetected(child_node.person.id));
        }

        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        // while building, the child is almost always the newest root
        if let Some(pos) = self.roots.iter().rposition(|&r| r == child) {
            self.roots.remove(pos);
        }
        Ok(())
    }

    pub fn get(&self, idx: Index) -> Option<&PersonNode> {
        self.arena.get(idx)
    }

    pub fn person(&self, idx: Index) -> Option<&Person> {
        self.arena.get(idx).map(|node| &node.person)
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|node| node.parent)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn max_children(&self) -> usize {
        self.max_children
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
