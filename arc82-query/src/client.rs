//! Ledger read-client capability.

use std::future::Future;

use arc82::Address;

use crate::{AccountInfo, ApplicationInfo, LedgerError, TokenInfo};

/// Read-only ledger access used by the executors.
///
/// Implementations wrap an algod/indexer client, or hold state in memory
/// like [`MemoryLedger`](crate::MemoryLedger). Deadlines and retries belong
/// to the implementation: a read that gives up should return
/// [`LedgerError::Timeout`], and a missing record [`LedgerError::NotFound`].
///
/// Implementations may use `async fn` directly.
pub trait LedgerClient: Send + Sync {
    /// Fetches application metadata, including global state and programs.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such application exists.
    fn application_info(
        &self,
        app_id: u64,
    ) -> impl Future<Output = Result<ApplicationInfo, LedgerError>> + Send;

    /// Reads one box of an application.
    ///
    /// # Errors
    ///
    /// `NotFound` if the box does not exist.
    fn box_value(
        &self,
        app_id: u64,
        key: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, LedgerError>> + Send;

    /// Fetches account information, including local state.
    ///
    /// # Errors
    ///
    /// `NotFound` if the account is unknown.
    fn account_info(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<AccountInfo, LedgerError>> + Send;

    /// Fetches token parameters.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such token exists.
    fn token_info(
        &self,
        token_id: u64,
    ) -> impl Future<Output = Result<TokenInfo, LedgerError>> + Send;
}
