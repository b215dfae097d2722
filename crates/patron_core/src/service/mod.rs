//! Use-case layer.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls behind a narrow API.
//! - Keep the interactive shell decoupled from storage details.

pub mod patron_controller;
