//! Token query executor.

use arc82::{ParsedQuery, ResourceType, TokenField, TokenQueryParams};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::{LedgerClient, QueryError, TokenInfo};

/// The requested subset of a token's parameters.
///
/// A field is `Some` only when it was requested and the ledger record has a
/// value for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TokenParameters {
    /// Total supply
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub total: Option<u64>,
    /// Decimal places
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decimals: Option<u32>,
    /// Whether holdings start frozen
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub frozen_default: Option<bool>,
    /// Unit name
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub unit_name: Option<String>,
    /// Asset name
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub asset_name: Option<String>,
    /// Metadata URL
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,
    /// Metadata hash, standard base64
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub metadata_hash: Option<String>,
    /// Manager address
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub manager: Option<String>,
    /// Reserve address
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub reserve: Option<String>,
    /// Freeze address
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub freeze: Option<String>,
    /// Clawback address
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub clawback: Option<String>,
}

impl TokenParameters {
    /// Copies the requested fields out of a token record.
    #[must_use]
    pub fn extract(info: &TokenInfo, requested: &TokenQueryParams) -> Self {
        let mut params = Self::default();
        for field in requested.iter() {
            match field {
                TokenField::Total => params.total = Some(info.total),
                TokenField::Decimals => params.decimals = Some(info.decimals),
                TokenField::FrozenDefault => params.frozen_default = Some(info.default_frozen),
                TokenField::UnitName => params.unit_name.clone_from(&info.unit_name),
                TokenField::AssetName => params.asset_name.clone_from(&info.name),
                TokenField::Url => params.url.clone_from(&info.url),
                TokenField::MetadataHash => {
                    params.metadata_hash = info.metadata_hash.as_ref().map(|h| STANDARD.encode(h));
                }
                TokenField::Manager => params.manager.clone_from(&info.manager),
                TokenField::Reserve => params.reserve.clone_from(&info.reserve),
                TokenField::Freeze => params.freeze.clone_from(&info.freeze),
                TokenField::Clawback => params.clawback.clone_from(&info.clawback),
            }
        }
        params
    }

    /// Returns true if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of a token query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenOutcome {
    /// Token id
    pub token_id: u64,
    /// Whether the token exists
    pub exists: bool,
    /// Requested parameters; empty when the token does not exist
    pub parameters: TokenParameters,
    /// Why the query did not succeed, if it did not
    pub failure: Option<String>,
}

impl TokenOutcome {
    /// True when the token exists and its fields were extracted.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exists && self.failure.is_none()
    }
}

/// Runs a token query: one token read, then field extraction.
///
/// # Errors
///
/// Returns `QueryError::WrongResourceType` for an application query, or
/// `QueryError::Ledger` if the read fails for a reason other than not-found.
pub async fn query_token<C>(query: &ParsedQuery, client: &C) -> Result<TokenOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    let requested = query.token_params().ok_or(QueryError::WrongResourceType {
        expected: ResourceType::Token,
        found: query.resource_type(),
    })?;
    let token_id = query.id().get();

    debug!(token_id, fields = requested.len(), "fetching token");
    let info = match client.token_info(token_id).await {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            debug!(token_id, "token not found");
            return Ok(TokenOutcome {
                token_id,
                exists: false,
                parameters: TokenParameters::default(),
                failure: Some(e.to_string()),
            });
        }
        Err(e) => {
            warn!(token_id, error = %e, "token fetch failed");
            return Err(QueryError::Ledger(e));
        }
    };

    Ok(TokenOutcome {
        token_id,
        exists: true,
        parameters: TokenParameters::extract(&info, requested),
        failure: None,
    })
}
