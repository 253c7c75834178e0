//! Text renderings of trees for terminal output.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::{FamilyForest, Person};

/// `"name surname (age: N, born: DATE)"`
pub fn describe(person: &Person) -> String {
    format!(
        "{} {} (age: {}, born: {})",
        person.name, person.surname, person.age, person.birth_date
    )
}

/// One line per person below `root`, indented two spaces per generation.
pub fn indented_lines(forest: &FamilyForest, root: Index) -> Vec<String> {
    forest
        .descendants(root)
        .map(|(_, node, depth)| format!("{}{}", "  ".repeat(depth), describe(&node.person)))
        .collect()
}

/// Builds a `termtree` view of the tree below `root`.
pub fn to_termtree(forest: &FamilyForest, root: Index) -> Tree<String> {
    let label = forest
        .person(root)
        .map(describe)
        .unwrap_or_else(|| "Empty tree".to_string());
    let mut tree = Tree::new(label);

    fn build_tree(forest: &FamilyForest, node_idx: Index, parent_tree: &mut Tree<String>) {
        if let Some(node) = forest.get(node_idx) {
            for &child_idx in node.children() {
                if let Some(child) = forest.person(child_idx) {
                    let mut child_tree = Tree::new(describe(child));
                    build_tree(forest, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }
    }

    build_tree(forest, root, &mut tree);
    tree
}
