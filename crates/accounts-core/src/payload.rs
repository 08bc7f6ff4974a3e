//! Create/update request validation.
//!
//! The request body is parsed once into an [`AccountPayload`]. Checks run in
//! this order and the first failure wins:
//!
//! 1. the body is a JSON object
//! 2. `active`, `balance`, and `name` are all present (reported together)
//! 3. `name`
//! 4. `balance`
//! 5. `active`
//! 6. `accounttype`, optional, defaults to checking

use serde_json::{Map, Value};

use crate::account::field;
use crate::error::{Result, ValidationError};
use crate::{AccountType, Balance, Field};

/// A validated create or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPayload {
    /// Holder name.
    pub name: String,
    /// Parsed balance.
    pub balance: Balance,
    /// Active flag.
    pub active: bool,
    /// Account type, [`AccountType::Checking`] when omitted.
    pub account_type: AccountType,
}

impl AccountPayload {
    /// Validate a decoded JSON request body.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn from_json(body: &Value) -> Result<Self> {
        let map = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let missing = find_missing_fields(map);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let name = match &map[field::NAME] {
            Value::String(name) => validate_name(name)?,
            _ => return Err(ValidationError::InvalidName),
        };

        let balance = parse_balance(&map[field::BALANCE])?;
        let active = parse_active(&map[field::ACTIVE])?;

        let account_type = match map.get(field::ACCOUNT_TYPE) {
            None | Some(Value::Null) => AccountType::default(),
            Some(raw) => parse_account_type(raw)?,
        };

        Ok(Self {
            name,
            balance,
            active,
            account_type,
        })
    }
}

/// Required fields absent from `payload`, in alphabetical order.
#[must_use]
pub fn find_missing_fields(payload: &Map<String, Value>) -> Vec<Field> {
    Field::REQUIRED
        .into_iter()
        .filter(|f| !payload.contains_key(f.as_str()))
        .collect()
}

/// Check that a name has at least one letter and only letters and spaces.
///
/// # Errors
///
/// Returns `ValidationError::InvalidName` otherwise.
pub fn validate_name(raw: &str) -> Result<String> {
    let has_letter = raw.chars().any(|c| c.is_ascii_alphabetic());
    let letters_and_spaces = raw.chars().all(|c| c.is_ascii_alphabetic() || c == ' ');
    if has_letter && letters_and_spaces {
        Ok(raw.to_string())
    } else {
        Err(ValidationError::InvalidName)
    }
}

fn parse_balance(raw: &Value) -> Result<Balance> {
    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(crate::BalanceError::NotANumber.into()),
    };
    Ok(text.parse::<Balance>()?)
}

fn parse_active(raw: &Value) -> Result<bool> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ValidationError::InvalidActive),
        },
        Value::String(s) => match s.as_str() {
            "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            _ => Err(ValidationError::InvalidActive),
        },
        _ => Err(ValidationError::InvalidActive),
    }
}

fn parse_account_type(raw: &Value) -> Result<AccountType> {
    let code = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(ValidationError::InvalidAccountType),
    };
    AccountType::from_code(&code).ok_or(ValidationError::InvalidAccountType)
}
