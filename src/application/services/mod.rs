//! Application services

pub mod family;

pub use family::{FamilyService, LoadedForest, PersonSelector};
