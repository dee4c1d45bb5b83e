//! Resolves a URI string by routing it to the matching executor.

use arc82::{ParsedQuery, ResourceParams, ResourceType};

use crate::{
    ApplicationOutcome, LedgerClient, QueryConfig, QueryError, TokenOutcome,
    query_application_with, query_token,
};

/// Outcome of a query of either resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum QueryOutcome {
    /// Outcome of an application query
    Application(ApplicationOutcome),
    /// Outcome of a token query
    Token(TokenOutcome),
}

impl QueryOutcome {
    /// Returns the resource type that was queried.
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        match self {
            Self::Application(_) => ResourceType::Application,
            Self::Token(_) => ResourceType::Token,
        }
    }

    /// Whether the queried resource exists.
    #[must_use]
    pub const fn exists(&self) -> bool {
        match self {
            Self::Application(o) => o.exists,
            Self::Token(o) => o.exists,
        }
    }

    /// Whether the query succeeded as a whole.
    #[must_use]
    pub const fn success(&self) -> bool {
        match self {
            Self::Application(o) => o.success(),
            Self::Token(o) => o.success(),
        }
    }

    /// Returns the application outcome, if this was an application query.
    #[must_use]
    pub const fn as_application(&self) -> Option<&ApplicationOutcome> {
        match self {
            Self::Application(o) => Some(o),
            Self::Token(_) => None,
        }
    }

    /// Returns the token outcome, if this was a token query.
    #[must_use]
    pub const fn as_token(&self) -> Option<&TokenOutcome> {
        match self {
            Self::Token(o) => Some(o),
            Self::Application(_) => None,
        }
    }
}

/// Runs an already parsed query of either type.
///
/// # Errors
///
/// Returns `QueryError::Ledger` if the top-level read fails for a reason
/// other than not-found.
pub async fn query<C>(
    parsed: &ParsedQuery,
    client: &C,
    config: &QueryConfig,
) -> Result<QueryOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    match parsed.params() {
        ResourceParams::Application(_) => query_application_with(parsed, client, config)
            .await
            .map(QueryOutcome::Application),
        ResourceParams::Token(_) => query_token(parsed, client).await.map(QueryOutcome::Token),
    }
}

/// Parses a URI and runs it with the default configuration.
///
/// # Errors
///
/// Returns `QueryError::Parse` for an invalid URI, otherwise as [`query`].
pub async fn query_from_uri<C>(uri: &str, client: &C) -> Result<QueryOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    query_from_uri_with(uri, client, &QueryConfig::default()).await
}

/// Parses a URI with the configured local pairing and runs it.
///
/// # Errors
///
/// As [`query_from_uri`].
pub async fn query_from_uri_with<C>(
    uri: &str,
    client: &C,
    config: &QueryConfig,
) -> Result<QueryOutcome, QueryError>
where
    C: LedgerClient + ?Sized,
{
    let parsed = ParsedQuery::parse_with(uri, config.pairing)?;
    tracing::debug!(
        resource = %parsed.resource_type(),
        id = parsed.id().get(),
        "resolving uri"
    );
    query(&parsed, client, config).await
}
