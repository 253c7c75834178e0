//! Tests for forest queries: lookup, descendants, common ancestor

use std::collections::HashSet;

use rstest::{fixture, rstest};

use famtree::domain::{FamilyForest, Record, TreeBuilder};
use famtree::util::testing;

fn rec(id: u32, name: &str, surname: &str, parent: u32) -> Record {
    Record::new(id, name, surname, 40, "1980-01-01", Some(parent))
}

/// Two trees:
///
/// ```text
/// 1 Ivan            7 Olga
/// ├── 2 Anna        └── 8 Ivan
/// │   ├── 4 Petr
/// │   └── 5 Maria
/// │       └── 6 Ivan
/// └── 3 Boris
/// ```
#[fixture]
fn forest() -> FamilyForest {
    testing::init_test_setup();
    TreeBuilder::new()
        .build(vec![
            rec(1, "Ivan", "Ivanov", 0),
            rec(2, "Anna", "Ivanova", 1),
            rec(3, "Boris", "Ivanov", 1),
            rec(4, "Petr", "Petrov", 2),
            rec(5, "Maria", "Petrova", 2),
            rec(6, "Ivan", "Petrov", 5),
            rec(7, "Olga", "Sidorova", 0),
            rec(8, "Ivan", "Sidorov", 7),
        ])
        .unwrap()
}

fn id_of(forest: &FamilyForest, idx: generational_arena::Index) -> u32 {
    forest.person(idx).unwrap().id
}

#[rstest]
fn given_every_used_id_when_finding_by_id_then_returns_that_person(forest: FamilyForest) {
    for id in 1..=8 {
        let idx = forest.find_by_id(id).expect("id present");
        assert_eq!(id_of(&forest, idx), id);
    }
}

#[rstest]
#[case(0)]
#[case(9)]
#[case(1000)]
fn given_unused_id_when_finding_by_id_then_none(forest: FamilyForest, #[case] id: u32) {
    assert!(forest.find_by_id(id).is_none());
}

#[rstest]
fn given_repeated_name_when_finding_by_name_then_returns_first_in_preorder(forest: FamilyForest) {
    let root = forest.roots()[0];
    let found = forest.find_by_name(root, "Ivan").unwrap();
    assert_eq!(id_of(&forest, found), 1);

    let anna = forest.find_by_id(2).unwrap();
    let found = forest.find_by_name(anna, "Ivan").unwrap();
    assert_eq!(id_of(&forest, found), 6);
}

#[rstest]
fn given_name_in_other_tree_when_finding_from_root_then_none(forest: FamilyForest) {
    let root = forest.roots()[0];
    assert!(forest.find_by_name(root, "Olga").is_none());
    let olga = forest.find_by_name_in_forest("Olga").unwrap();
    assert_eq!(id_of(&forest, olga), 7);
}

#[rstest]
fn given_tree_when_listing_descendants_then_preorder_with_depths(forest: FamilyForest) {
    let root = forest.roots()[0];

    let visited: Vec<(u32, usize)> = forest
        .descendants(root)
        .map(|(_, node, depth)| (node.person.id, depth))
        .collect();

    assert_eq!(
        visited,
        vec![(1, 0), (2, 1), (4, 2), (5, 2), (6, 3), (3, 1)]
    );
}

#[rstest]
fn given_tree_when_listing_descendants_then_each_node_once_and_before_its_descendants(
    forest: FamilyForest,
) {
    let root = forest.roots()[0];
    let order: Vec<_> = forest.descendants(root).map(|(idx, _, _)| idx).collect();

    let unique: HashSet<_> = order.iter().collect();
    assert_eq!(unique.len(), order.len());

    for (pos, &idx) in order.iter().enumerate() {
        for (ancestor, _) in forest.ancestors(idx).skip(1) {
            let ancestor_pos = order.iter().position(|&i| i == ancestor).unwrap();
            assert!(ancestor_pos < pos);
        }
        let depth = forest.ancestors(idx).count() - 1;
        let reported = forest
            .descendants(root)
            .find(|(i, _, _)| *i == idx)
            .map(|(_, _, d)| d)
            .unwrap();
        assert_eq!(depth, reported);
    }
}

#[rstest]
fn given_descendants_iterator_when_restarted_then_yields_same_sequence(forest: FamilyForest) {
    let anna = forest.find_by_id(2).unwrap();
    let first: Vec<_> = forest.descendants(anna).map(|(i, _, d)| (i, d)).collect();
    let second: Vec<_> = forest.descendants(anna).map(|(i, _, d)| (i, d)).collect();
    assert_eq!(first, second);
    assert_eq!(first[0].1, 0);
}

#[rstest]
fn given_node_when_walking_ancestors_then_nearest_first(forest: FamilyForest) {
    let six = forest.find_by_id(6).unwrap();
    let chain: Vec<u32> = forest
        .ancestors(six)
        .map(|(_, node)| node.person.id)
        .collect();
    assert_eq!(chain, vec![6, 5, 2, 1]);
}

#[rstest]
#[case(6, 4, Some(2))]
#[case(4, 6, Some(2))]
#[case(6, 3, Some(1))]
#[case(6, 5, Some(5))]
#[case(5, 6, Some(5))]
#[case(4, 4, Some(4))]
#[case(8, 7, Some(7))]
#[case(6, 8, None)]
fn given_two_people_when_finding_common_ancestor_then_returns_nearest(
    forest: FamilyForest,
    #[case] a: u32,
    #[case] b: u32,
    #[case] expected: Option<u32>,
) {
    let a = forest.find_by_id(a).unwrap();
    let b = forest.find_by_id(b).unwrap();

    let found = forest
        .nearest_common_ancestor(a, b)
        .map(|idx| id_of(&forest, idx));

    assert_eq!(found, expected);
}

#[rstest]
fn given_stale_index_when_finding_common_ancestor_then_none(forest: FamilyForest) {
    let mut other = FamilyForest::default();
    for id in 0..20 {
        other.insert_person(famtree::domain::Person::new(100 + id, "X", "Y", 1, ""));
    }
    let foreign = other.roots()[15];
    let one = forest.find_by_id(1).unwrap();

    assert!(forest.nearest_common_ancestor(one, foreign).is_none());
    assert!(forest.nearest_common_ancestor(foreign, one).is_none());
}

#[rstest]
fn given_forest_when_measuring_height_then_counts_levels(forest: FamilyForest) {
    let heights: Vec<usize> = forest.roots().iter().map(|&r| forest.height(r)).collect();
    assert_eq!(heights, vec![4, 2]);
}

#[test]
fn given_three_person_family_when_building_then_descendants_ancestor_and_edges_match() {
    let records = vec![
        Record::new(1, "A", "X", 40, "1980-01-01", Some(0)),
        Record::new(2, "B", "Y", 15, "2009-01-01", Some(1)),
        Record::new(3, "C", "Z", 12, "2012-01-01", Some(1)),
    ];
    let forest = TreeBuilder::new().build(records).unwrap();
    let one = forest.find_by_id(1).unwrap();
    let two = forest.find_by_id(2).unwrap();
    let three = forest.find_by_id(3).unwrap();

    let listed: Vec<_> = forest.descendants(one).map(|(i, _, d)| (i, d)).collect();
    assert_eq!(listed, vec![(one, 0), (two, 1), (three, 1)]);

    assert_eq!(forest.nearest_common_ancestor(two, three), Some(one));

    let edges: Vec<_> = forest.edges(one).collect();
    assert_eq!(
        edges,
        vec![
            ("A X".to_string(), "B Y".to_string()),
            ("A X".to_string(), "C Z".to_string()),
        ]
    );
}
