//! Canonical data model shared by all pipeline stages.

pub mod series;
pub mod summary;
