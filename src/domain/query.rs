//! Read-only queries over a built forest.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::forest::{FamilyForest, PersonNode};

impl FamilyForest {
    /// Linear scan over every node reachable from the roots.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_id(&self, id: u32) -> Option<Index> {
        self.roots()
            .iter()
            .flat_map(|&root| self.descendants(root))
            .find(|(_, node, _)| node.person.id == id)
            .map(|(idx, _, _)| idx)
    }

    /// First pre-order match of `name` below (and including) `root`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name(&self, root: Index, name: &str) -> Option<Index> {
        self.descendants(root)
            .find(|(_, node, _)| node.person.name == name)
            .map(|(idx, _, _)| idx)
    }

    /// Searches every tree in root order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name_in_forest(&self, name: &str) -> Option<Index> {
        self.roots()
            .iter()
            .find_map(|&root| self.find_by_name(root, name))
    }

    /// Pre-order walk from `root`, pairing each node with its depth (root = 0).
    pub fn descendants(&self, root: Index) -> Descendants<'_> {
        Descendants::new(self, root)
    }

    /// `node` itself, then each parent up to the root.
    pub fn ancestors(&self, node: Index) -> Ancestors<'_> {
        Ancestors {
            forest: self,
            next: self.get(node).map(|_| node),
        }
    }

    /// Walks `a` and its ancestors; for each, walks `b` and its ancestors and
    /// returns the first node both chains share.
    ///
    /// Returns `None` when the nodes live in different trees or either index
    /// does not resolve.
    #[instrument(level = "debug", skip(self))]
    pub fn nearest_common_ancestor(&self, a: Index, b: Index) -> Option<Index> {
        self.ancestors(a)
            .find(|&(candidate, _)| self.ancestors(b).any(|(other, _)| other == candidate))
            .map(|(idx, _)| idx)
    }

    /// Number of levels in the tree below `root`; 0 for an unknown index.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self, root: Index) -> usize {
        self.descendants(root)
            .map(|(_, _, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Lazy pre-order iterator yielding `(index, node, depth)`.
pub struct Descendants<'a> {
    forest: &'a FamilyForest,
    stack: Vec<(Index, usize)>,
}

impl<'a> Descendants<'a> {
    fn new(forest: &'a FamilyForest, root: Index) -> Self {
        let mut stack = Vec::new();
        if forest.get(root).is_some() {
            stack.push((root, 0));
        }
        Self { forest, stack }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (Index, &'a PersonNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.forest.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, node, depth));
            }
        }
        None
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
    forest: &'a FamilyForest,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a PersonNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let node = self.forest.get(current)?;
        self.next = node.parent();
        Some((current, node))
    }
}
