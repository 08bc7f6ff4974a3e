//! Account records.
//!
//! An account is persisted as a flat hash of string fields under its id key.
//! [`Account::to_fields`] and [`Account::from_fields`] convert between the two.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use crate::{AccountId, AccountPayload, Balance};

/// A flat string-keyed hash record as held by the store.
pub type Fields = BTreeMap<String, String>;

/// Format of the `created_time` field.
pub const CREATED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record field names.
pub mod field {
    /// Account id.
    pub const ID: &str = "id";
    /// Holder name.
    pub const NAME: &str = "name";
    /// Canonical balance.
    pub const BALANCE: &str = "balance";
    /// Active flag, `"0"` or `"1"`.
    pub const ACTIVE: &str = "active";
    /// Account type code.
    pub const ACCOUNT_TYPE: &str = "accounttype";
    /// Creation timestamp.
    pub const CREATED_TIME: &str = "created_time";
}

/// Kind of account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccountType {
    /// Code `0`.
    #[default]
    Checking,
    /// Code `1`.
    Savings,
    /// Code `2`.
    Business,
}

impl AccountType {
    /// The wire code of this type.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Checking => "0",
            Self::Savings => "1",
            Self::Business => "2",
        }
    }

    /// Look up a type by its wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Checking),
            "1" => Some(Self::Savings),
            "2" => Some(Self::Business),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A stored record could not be read back as an account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required field is absent from the record.
    #[error("record {id} is missing field {field}")]
    MissingField {
        /// Record key.
        id: AccountId,
        /// Field name.
        field: &'static str,
    },

    /// A field holds a value that does not parse.
    #[error("record {id} has invalid {field}: {value}")]
    InvalidField {
        /// Record key.
        id: AccountId,
        /// Field name.
        field: &'static str,
        /// Raw stored value.
        value: String,
    },
}

/// A bank account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Identifier, assigned at creation and never changed.
    pub id: AccountId,

    /// Holder name.
    pub name: String,

    /// Current balance.
    pub balance: Balance,

    /// Whether the account is active.
    pub active: bool,

    /// Kind of account.
    pub account_type: AccountType,

    /// When the account was created, truncated to whole seconds.
    pub created_time: DateTime<Utc>,
}

impl Account {
    /// Create an account from a validated payload.
    #[must_use]
    pub fn new(id: AccountId, payload: AccountPayload, now: DateTime<Utc>) -> Self {
        let created_time = now.with_nanosecond(0).unwrap_or(now);
        Self {
            id,
            name: payload.name,
            balance: payload.balance,
            active: payload.active,
            account_type: payload.account_type,
            created_time,
        }
    }

    /// Replace the mutable fields with those of `payload`.
    ///
    /// The id and creation time are kept.
    pub fn apply(&mut self, payload: AccountPayload) {
        self.name = payload.name;
        self.balance = payload.balance;
        self.active = payload.active;
        self.account_type = payload.account_type;
    }

    /// The `"0"`/`"1"` form of the active flag.
    #[must_use]
    pub const fn active_flag(&self) -> &'static str {
        if self.active {
            "1"
        } else {
            "0"
        }
    }

    /// `created_time` in its wire format.
    #[must_use]
    pub fn created_time_string(&self) -> String {
        self.created_time.format(CREATED_TIME_FORMAT).to_string()
    }

    /// Flatten into a hash record.
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(field::ID.into(), self.id.to_string());
        fields.insert(field::NAME.into(), self.name.clone());
        fields.insert(field::BALANCE.into(), self.balance.to_string());
        fields.insert(field::ACTIVE.into(), self.active_flag().into());
        fields.insert(field::ACCOUNT_TYPE.into(), self.account_type.code().into());
        fields.insert(field::CREATED_TIME.into(), self.created_time_string());
        fields
    }

    /// Rebuild an account from the record stored under `id`.
    ///
    /// Records written before `accounttype` and `created_time` existed read
    /// back with the default type and the Unix epoch respectively.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if a required field is missing or malformed.
    pub fn from_fields(id: AccountId, fields: &Fields) -> Result<Self, RecordError> {
        let get = |name: &'static str| {
            fields
                .get(name)
                .ok_or(RecordError::MissingField { id, field: name })
        };
        let invalid = |name: &'static str, value: &str| RecordError::InvalidField {
            id,
            field: name,
            value: value.to_string(),
        };

        let name = get(field::NAME)?.clone();

        let raw = get(field::BALANCE)?;
        let balance = raw
            .parse::<Balance>()
            .map_err(|_| invalid(field::BALANCE, raw))?;

        let raw = get(field::ACTIVE)?;
        let active = match raw.as_str() {
            "1" => true,
            "0" => false,
            _ => return Err(invalid(field::ACTIVE, raw)),
        };

        let account_type = match fields.get(field::ACCOUNT_TYPE) {
            Some(raw) => {
                AccountType::from_code(raw).ok_or_else(|| invalid(field::ACCOUNT_TYPE, raw))?
            }
            None => AccountType::default(),
        };

        let created_time = match fields.get(field::CREATED_TIME) {
            Some(raw) => NaiveDateTime::parse_from_str(raw, CREATED_TIME_FORMAT)
                .map_err(|_| invalid(field::CREATED_TIME, raw))?
                .and_utc(),
            None => DateTime::UNIX_EPOCH,
        };

        Ok(Self {
            id,
            name,
            balance,
            active,
            account_type,
            created_time,
        })
    }
}
