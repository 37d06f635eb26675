//! Browser-facing helpers: persisted session storage and route guarding.

pub mod guard;
pub mod storage;
