//! Validation error types.

use std::fmt;

/// Result type for payload validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A required field of an account payload.
///
/// Variants are declared in alphabetical order so that sorting a list of
/// fields yields the order in which they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The `active` flag.
    Active,
    /// The `balance` amount.
    Balance,
    /// The account holder's `name`.
    Name,
}

impl Field {
    /// All required fields, in reporting order.
    pub const REQUIRED: [Field; 3] = [Field::Active, Field::Balance, Field::Name];

    /// The JSON key of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Balance => "balance",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while parsing a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BalanceError {
    /// The input does not follow the numeric grammar.
    #[error("Balance is not a valid number")]
    NotANumber,

    /// The input carries a leading minus sign.
    #[error("Negative balances not allowed")]
    NegativeBalance,

    /// More than two digits follow the decimal point.
    #[error("More than two digits after the decimal")]
    TooManyDecimals,

    /// The amount does not fit in the fixed-point representation.
    #[error("Balance is too large")]
    OutOfRange,
}

/// Errors produced while validating an account payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body is valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// One or more required fields are absent.
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// The name is blank or contains characters other than letters and spaces.
    #[error("Invalid name.")]
    InvalidName,

    /// The balance failed to parse.
    #[error(transparent)]
    Balance(#[from] BalanceError),

    /// The active flag is not one of `0`, `1`, `true`, `false`.
    #[error("Invalid active flag.")]
    InvalidActive,

    /// The account type is not a known code.
    #[error("Invalid account type.")]
    InvalidAccountType,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
