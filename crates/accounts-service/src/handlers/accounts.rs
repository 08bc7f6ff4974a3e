//! Account management handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use accounts_core::{Account, AccountId, AccountPayload, AccountType};
use accounts_store::AccountStore;

use crate::error::ApiError;
use crate::state::AppState;

/// Account response.
///
/// Every field is a string; `balance` is in canonical two-decimal form and
/// `active` is `"0"` or `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: String,
    /// Holder name.
    pub name: String,
    /// Balance, e.g. `"1000.00"`.
    pub balance: String,
    /// Active flag.
    pub active: String,
    /// Account type code.
    pub accounttype: String,
    /// Created timestamp, `YYYY-MM-DD HH:MM:SS` UTC.
    pub created_time: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            balance: account.balance.to_string(),
            active: account.active_flag().to_string(),
            accounttype: account.account_type.code().to_string(),
            created_time: account.created_time_string(),
        }
    }
}

/// Account list query parameters. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsQuery {
    /// Exact holder name.
    pub name: Option<String>,
    /// Account type code.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

impl ListAccountsQuery {
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    fn account_type(&self) -> Option<&str> {
        self.account_type.as_deref().filter(|s| !s.is_empty())
    }

    fn is_filtered(&self) -> bool {
        self.name().is_some() || self.account_type().is_some()
    }

    fn matches(&self, account: &Account) -> bool {
        let name_ok = self.name().map_or(true, |name| account.name == name);
        let type_ok = self.account_type().map_or(true, |code| {
            AccountType::from_code(code) == Some(account.account_type)
        });
        name_ok && type_ok
    }
}

/// Resolve a path id. The reserved counter key and malformed ids are
/// reported as not found.
fn parse_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Account {raw} was not found")))
}

fn not_found(id: AccountId) -> ApiError {
    ApiError::NotFound(format!("Account {id} was not found"))
}

/// List accounts, optionally filtered by `name` and `type`.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListAccountsQuery>, QueryRejection>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let Query(query) = query?;
    let accounts: Vec<AccountResponse> = state
        .store
        .list_accounts()?
        .iter()
        .filter(|account| query.matches(account))
        .map(AccountResponse::from)
        .collect();

    if accounts.is_empty() && query.is_filtered() {
        tracing::debug!(?query, "No accounts matched filter");
        return Err(ApiError::NotFound(
            "No accounts found matching the given filter".into(),
        ));
    }

    Ok(Json(accounts))
}

/// Get an account by id.
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_id(&id)?;
    let account = state.store.get_account(id)?.ok_or_else(|| not_found(id))?;

    Ok(Json(AccountResponse::from(&account)))
}

/// Create an account under the next allocated id.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(body) = body?;
    let payload = AccountPayload::from_json(&body)?;

    let id = state.ids.allocate_id()?;
    let account = Account::new(id, payload, chrono::Utc::now());

    if !state.store.insert_account(&account)? {
        tracing::warn!(account_id = %id, "Allocated id already in use");
        return Err(ApiError::Conflict(format!("Account {id} already exists")));
    }

    tracing::info!(account_id = %id, "Account created");

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// Replace an account's name, balance, active flag, and type.
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(body) = body?;
    let id = parse_id(&id)?;
    let mut account = state.store.get_account(id)?.ok_or_else(|| not_found(id))?;

    let payload = AccountPayload::from_json(&body)?;
    account.apply(payload);
    if !state.store.put_account(&account)? {
        return Err(not_found(id));
    }

    tracing::info!(account_id = %id, "Account updated");

    Ok(Json(AccountResponse::from(&account)))
}

/// Mark an account inactive.
pub async fn deactivate_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_id(&id)?;
    let mut account = state.store.get_account(id)?.ok_or_else(|| not_found(id))?;

    account.active = false;
    if !state.store.put_account(&account)? {
        return Err(not_found(id));
    }

    tracing::info!(account_id = %id, "Account deactivated");

    Ok(Json(AccountResponse::from(&account)))
}

/// Delete an account. Absent and reserved ids still answer 204.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Ok(id) = id.parse::<AccountId>() else {
        tracing::debug!(raw_id = %id, "Delete of non-account key ignored");
        return Ok(StatusCode::NO_CONTENT);
    };

    if state.store.delete_account(id)? {
        tracing::info!(account_id = %id, "Account deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}
