//! Domain model for the patron registry.
//!
//! # Responsibility
//! - Define the canonical patron record used by repository and controller.
//!
//! # Invariants
//! - A `Patron` value is always fully validated; there is no partially built
//!   or mutable patron.

pub mod patron;
