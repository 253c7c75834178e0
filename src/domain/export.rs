//! Edge export and Graphviz DOT rendering.

use std::fmt::Write;

use generational_arena::Index;

use crate::domain::forest::FamilyForest;
use crate::domain::query::Descendants;

/// Default name of the generated digraph.
pub const DEFAULT_GRAPH_NAME: &str = "FamilyTree";

impl FamilyForest {
    /// Every parent/child edge below `root` as `("name surname", "name surname")`,
    /// in the same pre-order as [`descendants`](Self::descendants).
    pub fn edges(&self, root: Index) -> Edges<'_> {
        Edges {
            forest: self,
            inner: self.descendants(root),
        }
    }
}

/// Lazy iterator over labelled edges.
pub struct Edges<'a> {
    forest: &'a FamilyForest,
    inner: Descendants<'a>,
}

impl<'a> Iterator for Edges<'a> {
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        for (_, node, depth) in self.inner.by_ref() {
            // the walk's root has no edge leading into it
            if depth == 0 {
                continue;
            }
            let parent = node.parent().and_then(|p| self.forest.person(p));
            if let Some(parent) = parent {
                return Some((parent.full_name(), node.person.full_name()));
            }
        }
        None
    }
}

/// Renders forests as Graphviz `digraph` text.
#[derive(Debug, Clone)]
pub struct DotWriter {
    graph_name: String,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_NAME)
    }
}

impl DotWriter {
    pub fn new(graph_name: impl Into<String>) -> Self {
        Self {
            graph_name: graph_name.into(),
        }
    }

    /// Header, one `"parent" -> "child";` line per edge of each root, footer.
    pub fn render(&self, forest: &FamilyForest, roots: &[Index]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph {} {{", self.graph_name);
        for &root in roots {
            for (parent, child) in forest.edges(root) {
                let _ = writeln!(out, "\"{}\" -> \"{}\";", escape(&parent), escape(&child));
            }
        }
        out.push_str("}\n");
        out
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
