//! Patron domain model.
//!
//! # Responsibility
//! - Define the canonical library patron record.
//! - Validate every field before a `Patron` value can exist.
//!
//! # Invariants
//! - `id` is exactly seven ASCII digits and never changes.
//! - `name` and `address` are non-empty after trimming.
//! - `fine` lies in `[0, 250]` and is stored with exactly two decimal places,
//!   rounded half-up.
//! - Fields are private; a constructed `Patron` is immutable.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Number of decimal places kept for fines.
pub const FINE_SCALE: u32 = 2;
/// Largest fine a patron may carry, inclusive.
pub const MAX_FINE: Decimal = Decimal::from_parts(250, 0, 0, false, 0);

// `\d` is Unicode-aware in `regex`; ids are ASCII only.
static PATRON_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7}$").expect("valid patron id regex"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid digit regex"));
static FINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("valid fine regex")
});

/// Validation failure raised while constructing a [`Patron`].
///
/// Variants are ordered the way checks run; the first failing rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatronValidationError {
    /// Id is not exactly seven ASCII digits.
    InvalidId(String),
    /// Name is empty or whitespace only.
    InvalidName,
    /// Address is empty or whitespace only.
    InvalidAddress,
    /// Fine lies outside `[0, 250]`.
    InvalidFine(Decimal),
}

impl Display for PatronValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "invalid patron id `{id}`: must be 7 digits"),
            Self::InvalidName => write!(f, "patron name cannot be empty"),
            Self::InvalidAddress => write!(f, "patron address cannot be empty"),
            Self::InvalidFine(fine) => {
                write!(f, "invalid fine {fine}: must be between 0 and {MAX_FINE}")
            }
        }
    }
}

impl Error for PatronValidationError {}

/// Raised when fine text is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineParseError {
    input: String,
}

impl FineParseError {
    /// Returns the rejected input text.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for FineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fine `{}` is not a decimal number", self.input)
    }
}

impl Error for FineParseError {}

/// Registered library patron.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PatronRecord")]
pub struct Patron {
    id: String,
    name: String,
    address: String,
    fine: Decimal,
}

impl Patron {
    /// Validates all fields and builds an immutable patron.
    ///
    /// # Errors
    /// - `InvalidId` when `id` is not exactly seven ASCII digits.
    /// - `InvalidName` / `InvalidAddress` when the value is blank after trim.
    /// - `InvalidFine` when `fine` is negative or greater than 250.
    pub fn create(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        fine: Decimal,
    ) -> Result<Self, PatronValidationError> {
        let id = id.into();
        if !is_valid_patron_id(&id) {
            return Err(PatronValidationError::InvalidId(id));
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(PatronValidationError::InvalidName);
        }

        let address = address.into();
        if address.trim().is_empty() {
            return Err(PatronValidationError::InvalidAddress);
        }

        if !is_fine_in_range(fine) {
            return Err(PatronValidationError::InvalidFine(fine));
        }

        Ok(Self {
            id,
            name,
            address,
            fine: round_fine(fine),
        })
    }

    /// Seven-digit primary key.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Outstanding fine, always carrying two decimal places.
    pub fn fine(&self) -> Decimal {
        self.fine
    }
}

/// Fixed-width table row: id (10) | name (20) | address (30) | fine (6).
impl Display for Patron {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} | {:<20} | {:<30} | {:>6.2}",
            self.id, self.name, self.address, self.fine
        )
    }
}

/// Unvalidated wire shape; converted through [`Patron::create`].
#[derive(Deserialize)]
struct PatronRecord {
    id: String,
    name: String,
    address: String,
    fine: Decimal,
}

impl TryFrom<PatronRecord> for Patron {
    type Error = PatronValidationError;

    fn try_from(value: PatronRecord) -> Result<Self, Self::Error> {
        Self::create(value.id, value.name, value.address, value.fine)
    }
}

/// Returns whether `id` is exactly seven ASCII digits.
pub fn is_valid_patron_id(id: &str) -> bool {
    PATRON_ID_RE.is_match(id)
}

/// Returns whether `value` contains any ASCII digit.
///
/// Used by interactive input, which forbids digits in names.
pub fn contains_digit(value: &str) -> bool {
    DIGIT_RE.is_match(value)
}

/// Returns whether `fine` lies in the inclusive range `[0, 250]`.
pub fn is_fine_in_range(fine: Decimal) -> bool {
    fine >= Decimal::ZERO && fine <= MAX_FINE
}

/// Parses fine text as a decimal number.
///
/// Accepts an optional sign and scientific notation (`1.5e2`). Surrounding
/// whitespace is ignored; digit separators such as `1_000` are rejected.
pub fn parse_fine(input: &str) -> Result<Decimal, FineParseError> {
    let trimmed = input.trim();
    let error = || FineParseError {
        input: trimmed.to_string(),
    };
    if !FINE_RE.is_match(trimmed) {
        return Err(error());
    }

    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };
    parsed.map_err(|_| error())
}

fn round_fine(fine: Decimal) -> Decimal {
    // Midpoint-away-from-zero equals half-up on the non-negative range.
    let mut rounded =
        fine.round_dp_with_strategy(FINE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(FINE_SCALE);
    rounded
}
