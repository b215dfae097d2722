//! Core domain logic for the library patron registry.
//! This crate is the single source of truth for patron validation rules.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::patron::{
    contains_digit, is_fine_in_range, is_valid_patron_id, parse_fine, FineParseError, Patron,
    PatronValidationError, MAX_FINE,
};
pub use repo::patron_repo::{InMemoryPatronRepository, PatronRepository};
pub use service::patron_controller::{
    AddPatronError, ImportError, ImportReport, PatronController, SkipReason, SkippedLine,
};

/// Controller wired to process-local storage.
pub type RegistryController = PatronController<InMemoryPatronRepository>;

/// Creates an empty registry controller.
pub fn new_registry() -> RegistryController {
    PatronController::new(InMemoryPatronRepository::new())
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, new_registry};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn new_registry_starts_empty() {
        assert!(new_registry().list_patrons().is_empty());
    }
}
