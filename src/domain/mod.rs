//! Domain layer: family forest model and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod export;
pub mod forest;
pub mod query;
pub mod record;

pub use builder::{SkipReason, SkippedLink, TreeBuilder};
pub use error::{DomainError, DomainResult};
pub use export::{DotWriter, Edges, DEFAULT_GRAPH_NAME};
pub use forest::{FamilyForest, Person, PersonNode, DEFAULT_MAX_CHILDREN};
pub use query::{Ancestors, Descendants};
pub use record::{parse_records, Record, RecordParseError};
