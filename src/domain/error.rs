//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the forest's structural rules.
/// These are independent of file or terminal concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person {parent_id} already has the maximum of {max} children")]
    CapacityExceeded { parent_id: u32, max: usize },

    #[error("duplicate person id: {0}")]
    DuplicateId(u32),

    #[error("person {0} cannot be its own parent")]
    SelfParent(u32),

    #[error("person {child_id} already has a parent")]
    AlreadyAttached { child_id: u32 },

    #[error("cycle detected: person {0} is an ancestor of the new parent")]
    CycleDetected(u32),

    #[error("node not found in forest")]
    NodeNotFound,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
