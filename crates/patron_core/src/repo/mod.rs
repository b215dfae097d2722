//! Repository layer for patron storage.
//!
//! # Responsibility
//! - Define the storage contract used by the controller.
//! - Keep map/ordering details out of orchestration code.
//!
//! # Invariants
//! - Repositories only accept already-validated `Patron` values.
//! - Absence and duplicates are reported as `bool`/`Option`, not errors.

pub mod patron_repo;
