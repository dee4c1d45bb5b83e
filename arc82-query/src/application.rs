//! Application query executor.

use std::pin::pin;

use arc82::{
    LocalQuery, ParsedQuery, ResourceType, decode_base64url_bytes, encode_base64url_bytes,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::state::StateIndex;
use crate::{ItemError, LedgerClient, QueryConfig, QueryError, TealValue};

/// A box that was read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoxItem {
    /// The key as given in the URI
    pub key: String,
    /// Raw box contents
    pub value: Vec<u8>,
}

impl BoxItem {
    /// Returns the contents as standard (padded) base64.
    #[must_use]
    pub fn value_base64(&self) -> String {
        STANDARD.encode(&self.value)
    }
}

/// A global state entry that was found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlobalItem {
    /// The key as given in the URI
    pub key: String,
    /// Typed value
    pub value: TealValue,
    /// UTF-8 reading of a byte value, when it is valid UTF-8
    pub decoded: Option<String>,
}

/// A local state entry that was found. Its account is opted in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocalItem {
    /// The key as given in the URI
    pub key: String,
    /// The account that was read
    pub address: arc82::Address,
    /// Typed value
    pub value: TealValue,
    /// UTF-8 reading of a byte value, when it is valid UTF-8
    pub decoded: Option<String>,
}

/// Approval and clear-state program bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProgramCode {
    /// Approval program
    pub approval: Vec<u8>,
    /// Clear-state program
    pub clear: Vec<u8>,
}

/// Result of an application query.
///
/// `exists` is false when the application itself was not found; then
/// `failure` says why and no items are present. `failure` on an existing
/// application means reads stopped part-way; items gathered before that are
/// kept. Each item carries its own outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApplicationOutcome {
    /// Application id
    pub app_id: u64,
    /// Whether the application exists
    pub exists: bool,
    /// First failure that stopped the query, if any
    pub failure: Option<String>,
    /// Box reads, in request order
    pub boxes: Vec<Result<BoxItem, ItemError>>,
    /// Global state lookups, in request order
    pub global: Vec<Result<GlobalItem, ItemError>>,
    /// Local state lookups, in request order
    pub local: Vec<Result<LocalItem, ItemError>>,
    /// Program bytecode, when requested and no read aborted the query
    pub program_code: Option<ProgramCode>,
}

impl ApplicationOutcome {
    fn found(app_id: u64) -> Self {
        Self {
            app_id,
            exists: true,
            failure: None,
            boxes: Vec::new(),
            global: Vec::new(),
            local: Vec::new(),
            program_code: None,
        }
    }

    fn not_found(app_id: u64, message: String) -> Self {
        Self {
            exists: false,
            failure: Some(message),
            ..Self::found(app_id)
        }
    }

    /// True when the application exists and no read aborted the query.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exists && self.failure.is_none()
    }

    /// Number of items (boxes, global and local) that were found.
    #[must_use]
    pub fn found_count(&self) -> usize {
        self.boxes.iter().filter(|r| r.is_ok()).count()
            + self.global.iter().filter(|r| r.is_ok()).count()
            + self.local.iter().filter(|r| r.is_ok()).count()
    }
}

/// Runs an application query with the default configuration.
///
/// # Errors
///
/// Returns `QueryError::WrongResourceType` for a token query, or
/// `QueryError::Ledger` if fetching the application fails for a reason
/// other than not-found.
pub async fn query_application<C>(
    query: &ParsedQuery,
    client: &C,
) -> Result<ApplicationOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    query_application_with(query, client, &QueryConfig::default()).await
}

/// Runs an application query.
///
/// Reads the application once, then boxes, global keys, local keys and
/// program code in that order. Box misses and failures stay item-level. A
/// timeout or transport failure on a local read records that item, sets
/// `failure`, and skips the remaining local keys and the program code.
///
/// # Errors
///
/// As [`query_application`].
pub async fn query_application_with<C>(
    query: &ParsedQuery,
    client: &C,
    config: &QueryConfig,
) -> Result<ApplicationOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    let params = query
        .application_params()
        .ok_or(QueryError::WrongResourceType {
            expected: ResourceType::Application,
            found: query.resource_type(),
        })?;
    let app_id = query.id().get();

    debug!(app_id, "fetching application");
    let info = match client.application_info(app_id).await {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            debug!(app_id, "application not found");
            return Ok(ApplicationOutcome::not_found(app_id, e.to_string()));
        }
        Err(e) => {
            warn!(app_id, error = %e, "application fetch failed");
            return Err(QueryError::Ledger(e));
        }
    };

    let mut outcome = ApplicationOutcome::found(app_id);

    outcome.boxes = stream::iter(&params.boxes)
        .map(|key| read_box(client, app_id, key))
        .buffered(config.concurrency())
        .collect()
        .await;

    let global_state = StateIndex::new(&info.global_state);
    outcome.global = params
        .global
        .iter()
        .map(|key| {
            let (canonical, _) = canonical_key(key)?;
            let value = global_state
                .get(&canonical)
                .ok_or_else(|| ItemError::NotFound { key: key.clone() })?;
            Ok(GlobalItem {
                key: key.clone(),
                decoded: value.decoded(),
                value: value.clone(),
            })
        })
        .collect();

    let mut reads = pin!(
        stream::iter(&params.local)
            .map(|request| read_local(client, app_id, request))
            .buffered(config.concurrency())
    );
    while let Some(result) = reads.next().await {
        let fatal = result.as_ref().err().filter(|e| e.is_fatal()).map(ToString::to_string);
        outcome.local.push(result);
        if let Some(message) = fatal {
            warn!(app_id, error = %message, "local state read failed; skipping remaining keys");
            outcome.failure = Some(message);
            break;
        }
    }

    if params.program_code && outcome.failure.is_none() {
        outcome.program_code = Some(ProgramCode {
            approval: info.approval_program,
            clear: info.clear_program,
        });
    }

    debug!(
        app_id,
        found = outcome.found_count(),
        success = outcome.success(),
        "application query complete"
    );
    Ok(outcome)
}

/// Decodes a transported key and re-encodes it canonically.
fn canonical_key(key: &str) -> Result<(String, Vec<u8>), ItemError> {
    let bytes = decode_base64url_bytes(key).map_err(|e| ItemError::InvalidKey {
        key: key.to_string(),
        reason: e.kind.to_string(),
    })?;
    Ok((encode_base64url_bytes(&bytes), bytes))
}

async fn read_box<C>(client: &C, app_id: u64, key: &str) -> Result<BoxItem, ItemError>
where
    C: LedgerClient + ?Sized,
{
    let (_, bytes) = canonical_key(key)?;
    debug!(app_id, key, "reading box");
    match client.box_value(app_id, &bytes).await {
        Ok(value) => Ok(BoxItem {
            key: key.to_string(),
            value,
        }),
        Err(e) if e.is_not_found() => Err(ItemError::NotFound {
            key: key.to_string(),
        }),
        Err(e) => {
            warn!(app_id, key, error = %e, "box read failed");
            Err(ItemError::Ledger(e))
        }
    }
}

async fn read_local<C>(client: &C, app_id: u64, request: &LocalQuery) -> Result<LocalItem, ItemError>
where
    C: LedgerClient + ?Sized,
{
    let (canonical, _) = canonical_key(&request.key)?;
    debug!(app_id, address = %request.address, key = %request.key, "reading local state");

    let account = match client.account_info(&request.address).await {
        Ok(account) => account,
        Err(e) if e.is_not_found() => {
            return Err(ItemError::NotOptedIn {
                address: request.address.clone(),
            });
        }
        Err(e) => return Err(ItemError::Ledger(e)),
    };

    let local_state = account.local_state(app_id).ok_or_else(|| ItemError::NotOptedIn {
        address: request.address.clone(),
    })?;
    let index = StateIndex::new(&local_state.key_value);
    let value = index.get(&canonical).ok_or_else(|| ItemError::NotFound {
        key: request.key.clone(),
    })?;

    Ok(LocalItem {
        key: request.key.clone(),
        address: request.address.clone(),
        decoded: value.decoded(),
        value: value.clone(),
    })
}
