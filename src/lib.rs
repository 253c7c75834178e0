//! famtree: build a forest of family trees from a person table, answer
//! ancestry queries over it and export it as a Graphviz graph.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
