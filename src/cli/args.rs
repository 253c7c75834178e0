//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::services::PersonSelector;

/// Family tree forest builder: load person records, query ancestry, export Graphviz
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Record table (default: input_file from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Maximum number of children per person
    #[arg(long, global = true)]
    pub max_children: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every family tree
    Tree {
        /// Draw with box-drawing characters instead of indentation
        #[arg(long)]
        boxed: bool,
    },

    /// Find the first person with a given first name
    Find {
        /// First name to search for
        name: String,
    },

    /// List a person and all descendants
    Descendants {
        /// Person id or first name
        person: PersonSelector,
    },

    /// Nearest common ancestor of two people
    Ancestor {
        /// First person (id or first name)
        a: PersonSelector,
        /// Second person (id or first name)
        b: PersonSelector,
    },

    /// Write a Graphviz file of all trees
    Export {
        /// Target .dot file (default: output_file from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show forest statistics
    Info,

    /// Show the tree, search a name, export the graph
    Interactive,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
