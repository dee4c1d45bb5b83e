//! In-memory ledger for tests and offline resolution.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use arc82::Address;

use crate::{AccountInfo, ApplicationInfo, LedgerClient, LedgerError, TokenInfo};

/// In-memory [`LedgerClient`].
///
/// Holds applications, boxes, accounts and tokens in maps behind `RwLock`s,
/// so records can be inserted through a shared reference while queries run.
///
/// # Examples
///
/// ```
/// use arc82_query::{ApplicationInfo, MemoryLedger, StateEntry, query_from_uri};
///
/// let ledger = MemoryLedger::new();
/// ledger.insert_application(ApplicationInfo {
///     id: 2345,
///     global_state: vec![StateEntry::bytes("name", "arc82")],
///     ..ApplicationInfo::default()
/// });
///
/// let outcome = futures::executor::block_on(
///     query_from_uri("algorand://app/2345?global=bmFtZQ", &ledger),
/// )
/// .unwrap();
/// assert!(outcome.success());
/// ```
#[derive(Debug, Default)]
pub struct MemoryLedger {
    applications: RwLock<HashMap<u64, ApplicationInfo>>,
    boxes: RwLock<HashMap<(u64, Vec<u8>), Vec<u8>>>,
    accounts: RwLock<HashMap<String, AccountInfo>>,
    tokens: RwLock<HashMap<u64, TokenInfo>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an application, keyed by its id.
    pub fn insert_application(&self, info: ApplicationInfo) {
        write(&self.applications).insert(info.id, info);
    }

    /// Inserts or replaces a box of an application.
    pub fn insert_box(&self, app_id: u64, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        write(&self.boxes).insert((app_id, key.into()), value.into());
    }

    /// Inserts or replaces an account, keyed by its address.
    pub fn insert_account(&self, info: AccountInfo) {
        write(&self.accounts).insert(info.address.to_string(), info);
    }

    /// Inserts or replaces a token, keyed by its id.
    pub fn insert_token(&self, info: TokenInfo) {
        write(&self.tokens).insert(info.id, info);
    }

    /// Returns the number of records of every kind.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.applications).len()
            + read(&self.boxes).len()
            + read(&self.accounts).len()
            + read(&self.tokens).len()
    }

    /// Returns true if the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LedgerClient for MemoryLedger {
    async fn application_info(&self, app_id: u64) -> Result<ApplicationInfo, LedgerError> {
        read(&self.applications)
            .get(&app_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("application {app_id}")))
    }

    async fn box_value(&self, app_id: u64, key: &[u8]) -> Result<Vec<u8>, LedgerError> {
        read(&self.boxes)
            .get(&(app_id, key.to_vec()))
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("box of application {app_id}")))
    }

    async fn account_info(&self, address: &Address) -> Result<AccountInfo, LedgerError> {
        read(&self.accounts)
            .get(address.as_str())
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("account {address}")))
    }

    async fn token_info(&self, token_id: u64) -> Result<TokenInfo, LedgerError> {
        read(&self.tokens)
            .get(&token_id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("token {token_id}")))
    }
}
