//! Patron controller: use-case facade over the repository.
//!
//! # Responsibility
//! - Turn raw field input into validated `Patron` values.
//! - Delegate storage and queries to a `PatronRepository`.
//! - Bulk-import patrons from `id-name-address-fine` text lines.
//!
//! # Invariants
//! - Boolean/count APIs never surface errors to callers; diagnostics are
//!   logged at the boundary where they occur.
//! - Import keeps every record added before a failure; nothing is rolled back.
//! - Logs carry ids and counts only, never names or addresses.

use crate::model::patron::{parse_fine, FineParseError, Patron, PatronValidationError};
use crate::repo::patron_repo::PatronRepository;
use log::{error, info, warn};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Field separator used by import files.
pub const IMPORT_FIELD_SEPARATOR: char = '-';
const IMPORT_FIELD_COUNT: usize = 4;

/// Reason a single add request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddPatronError {
    /// Field input failed entity validation.
    Validation(PatronValidationError),
    /// Another patron already owns this id.
    DuplicateId(String),
}

impl Display for AddPatronError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "patron id already registered: {id}"),
        }
    }
}

impl Error for AddPatronError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<PatronValidationError> for AddPatronError {
    fn from(value: PatronValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Import source could not be opened.
#[derive(Debug)]
pub enum ImportError {
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileUnreadable { path, source } => {
                write!(f, "cannot read import file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileUnreadable { source, .. } => Some(source),
        }
    }
}

/// Why one import line was not counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Line did not split into exactly four fields.
    MalformedLine { field_count: usize },
    /// Fourth field is not a decimal number.
    UnparsableFine(FineParseError),
    /// Fields parsed but failed entity validation.
    Rejected(PatronValidationError),
    /// Id already present in the repository.
    DuplicateId(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedLine { field_count } => write!(
                f,
                "expected {IMPORT_FIELD_COUNT} `{IMPORT_FIELD_SEPARATOR}`-separated fields, found {field_count}"
            ),
            Self::UnparsableFine(err) => write!(f, "{err}"),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "patron id already registered: {id}"),
        }
    }
}

/// One skipped import line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Patrons added to the repository.
    pub imported: usize,
    /// Lines skipped, in source order.
    pub skipped: Vec<SkippedLine>,
    /// Read failure that stopped the import early, if any.
    pub read_error: Option<String>,
}

/// Controller facade consumed by interactive and bulk callers.
#[derive(Debug)]
pub struct PatronController<R: PatronRepository> {
    repo: R,
}

impl<R: PatronRepository> PatronController<R> {
    /// Creates a controller owning the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates input and stores a new patron.
    ///
    /// # Errors
    /// - `Validation` when any field fails `Patron::create`.
    /// - `DuplicateId` when the id is already registered.
    pub fn try_add_patron(
        &mut self,
        id: &str,
        name: &str,
        address: &str,
        fine: Decimal,
    ) -> Result<(), AddPatronError> {
        let patron = Patron::create(id, name, address, fine)?;
        if !self.repo.add(patron) {
            return Err(AddPatronError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// Boolean view of [`Self::try_add_patron`].
    ///
    /// Validation failures are logged; `false` also signals a duplicate id.
    pub fn add_patron(&mut self, id: &str, name: &str, address: &str, fine: Decimal) -> bool {
        match self.try_add_patron(id, name, address, fine) {
            Ok(()) => true,
            Err(AddPatronError::Validation(err)) => {
                warn!(
                    "event=patron_add module=controller status=error reason=validation error=\"{}\"",
                    err
                );
                false
            }
            Err(AddPatronError::DuplicateId(_)) => false,
        }
    }

    pub fn remove_patron(&mut self, id: &str) -> bool {
        self.repo.remove(id)
    }

    pub fn list_patrons(&self) -> Vec<Patron> {
        self.repo.list_all()
    }

    pub fn search_by_id(&self, id: &str) -> Option<Patron> {
        self.repo.find_by_id(id)
    }

    pub fn search_by_name(&self, name: &str) -> Vec<Patron> {
        self.repo.find_by_name(name)
    }

    /// Imports patrons from a text file and returns how many were added.
    ///
    /// An unreadable file is logged and yields `0`; a read failure part way
    /// through keeps and counts the records added before it.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> usize {
        match self.import_report_from_file(path) {
            Ok(report) => report.imported,
            Err(err) => {
                error!(
                    "event=patron_import module=controller status=error error=\"{}\"",
                    err
                );
                0
            }
        }
    }

    /// Imports patrons from a text file with per-line detail.
    ///
    /// # Errors
    /// - `FileUnreadable` when the file cannot be opened.
    pub fn import_report_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ImportReport, ImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ImportError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.import_from_reader(BufReader::new(file)))
    }

    /// Imports `id-name-address-fine` lines from any buffered reader.
    ///
    /// Bad lines are skipped and recorded; they never abort the import.
    /// Bytes that are not valid UTF-8 are replaced, not treated as failures.
    /// Only an I/O error stops the import early.
    pub fn import_from_reader(&mut self, mut reader: impl BufRead) -> ImportReport {
        let mut report = ImportReport::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => line_number += 1,
                Err(err) => {
                    error!(
                        "event=patron_import module=controller status=error line={} error=\"{}\"",
                        line_number + 1,
                        err
                    );
                    report.read_error = Some(err.to_string());
                    break;
                }
            }

            let line = String::from_utf8_lossy(strip_line_ending(&buffer));
            match self.import_line(&line) {
                Ok(()) => report.imported += 1,
                Err(reason) => {
                    warn!(
                        "event=patron_import_line module=controller status=skip line={} reason=\"{}\"",
                        line_number, reason
                    );
                    report.skipped.push(SkippedLine {
                        line_number,
                        reason,
                    });
                }
            }
        }

        info!(
            "event=patron_import module=controller status={} imported={} skipped={}",
            if report.read_error.is_some() { "partial" } else { "ok" },
            report.imported,
            report.skipped.len()
        );
        report
    }

    fn import_line(&mut self, line: &str) -> Result<(), SkipReason> {
        let fields = split_record_fields(line);
        let [id, name, address, fine] = fields.as_slice() else {
            return Err(SkipReason::MalformedLine {
                field_count: fields.len(),
            });
        };

        let fine = parse_fine(fine).map_err(SkipReason::UnparsableFine)?;
        self.try_add_patron(id.trim(), name.trim(), address.trim(), fine)
            .map_err(|err| match err {
                AddPatronError::Validation(err) => SkipReason::Rejected(err),
                AddPatronError::DuplicateId(id) => SkipReason::DuplicateId(id),
            })
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Splits one import line on `-`, dropping trailing empty fields.
///
/// `1234567-Jane-Main St-10-` therefore still yields four fields.
pub fn split_record_fields(line: &str) -> Vec<&str> {
    let mut fields = line.split(IMPORT_FIELD_SEPARATOR).collect::<Vec<_>>();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::{split_record_fields, strip_line_ending};

    #[test]
    fn strip_line_ending_handles_lf_crlf_and_final_line() {
        assert_eq!(strip_line_ending(b"a-b\n"), b"a-b");
        assert_eq!(strip_line_ending(b"a-b\r\n"), b"a-b");
        assert_eq!(strip_line_ending(b"a-b"), b"a-b");
    }

    #[test]
    fn split_keeps_inner_empty_fields() {
        assert_eq!(split_record_fields("a--c-d"), vec!["a", "", "c", "d"]);
    }

    #[test]
    fn split_drops_trailing_empty_fields() {
        assert_eq!(
            split_record_fields("1234567-Jane-Main St-10--"),
            vec!["1234567", "Jane", "Main St", "10"]
        );
        assert!(split_record_fields("").is_empty());
    }

    #[test]
    fn split_counts_hyphenated_fields_separately() {
        assert_eq!(split_record_fields("1234567-Mary-Jane-Elm St-5").len(), 5);
    }
}
