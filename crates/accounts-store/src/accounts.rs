//! Account operations on top of a [`Store`].
//!
//! Accounts live under their decimal id key. Keys that do not parse as an
//! [`AccountId`], the `nextId` counter among them, are never returned as
//! accounts.

use accounts_core::{Account, AccountId};

use crate::error::Result;
use crate::Store;

/// Account-level operations, available on every [`Store`].
pub trait AccountStore {
    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the record is corrupt.
    fn get_account(&self, id: AccountId) -> Result<Option<Account>>;

    /// All accounts, ordered by numeric id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a record is corrupt.
    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Ids of every stored account, ordered numerically.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn account_ids(&self) -> Result<Vec<AccountId>>;

    /// Replace an existing account. Returns `false` without writing if the
    /// record is gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_account(&self, account: &Account) -> Result<bool>;

    /// Write a new account. Returns `false` if its id is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_account(&self, account: &Account) -> Result<bool>;

    /// Delete an account. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_account(&self, id: AccountId) -> Result<bool>;
}

impl<S: Store + ?Sized> AccountStore for S {
    fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let Some(fields) = self.get_hash(&id.key())? else {
            return Ok(None);
        };
        Ok(Some(Account::from_fields(id, &fields)?))
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = Vec::new();
        for id in self.account_ids()? {
            // A key deleted between the scan and the read is skipped.
            if let Some(account) = self.get_account(id)? {
                accounts.push(account);
            }
        }
        Ok(accounts)
    }

    fn account_ids(&self) -> Result<Vec<AccountId>> {
        let mut ids: Vec<AccountId> = self
            .keys()?
            .iter()
            .filter_map(|key| key.parse().ok())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn put_account(&self, account: &Account) -> Result<bool> {
        self.set_hash_if_present(&account.id.key(), &account.to_fields())
    }

    fn insert_account(&self, account: &Account) -> Result<bool> {
        self.set_hash_if_absent(&account.id.key(), &account.to_fields())
    }

    fn delete_account(&self, id: AccountId) -> Result<bool> {
        self.delete(&id.key())
    }
}
