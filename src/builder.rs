//! Construction of ARC-82 URIs from an id and a parameter set.
//!
//! The free functions mirror the parser: [`build_application_uri`] and
//! [`build_token_uri`] produce strings that [`ParsedQuery::parse`] reads back
//! to the same id and parameters. The fluent builders wrap them for callers
//! assembling a query piece by piece.
//!
//! [`ParsedQuery::parse`]: crate::ParsedQuery::parse

use std::convert::Infallible;

use crate::address::Address;
use crate::base64url::validate_key;
use crate::constants::{
    ADDRESS_PARAM, BOX_PARAM, GLOBAL_PARAM, LOCAL_PARAM, SCHEME, TEALCODE_PARAM,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::params::{ApplicationQueryParams, TokenField, TokenQueryParams};
use crate::resource::{ResourceId, ResourceType};

impl From<Infallible> for ParseError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

fn base_uri(resource_type: ResourceType, id: ResourceId) -> String {
    format!("{SCHEME}://{}/{id}", resource_type.segment())
}

fn resolve_id<I>(id: I) -> Result<ResourceId, ParseError>
where
    I: TryInto<ResourceId>,
    I::Error: Into<ParseError>,
{
    id.try_into().map_err(Into::into)
}

/// Builds an application URI.
///
/// Box and global keys are emitted in the given order, each local request as
/// a `local=<key>&algorandaddress=<addr>` pair, and `tealcode` last. With no
/// parameters the query string is omitted.
///
/// # Errors
///
/// Returns `ParseError` if the id is negative or fractional, or a key is not
/// unpadded base64url.
///
/// # Examples
///
/// ```
/// use arc82::{build_application_uri, ApplicationQueryParams};
///
/// assert_eq!(build_application_uri(123, None).unwrap(), "algorand://app/123");
///
/// let params = ApplicationQueryParams::new()
///     .with_global("Z2xvYmFsX2tleQ")
///     .with_program_code();
/// assert_eq!(
///     build_application_uri(123, Some(&params)).unwrap(),
///     "algorand://app/123?global=Z2xvYmFsX2tleQ&tealcode"
/// );
///
/// assert!(build_application_uri(-1, None).is_err());
/// assert!(build_application_uri(1.5, None).is_err());
/// ```
pub fn build_application_uri<I>(
    id: I,
    params: Option<&ApplicationQueryParams>,
) -> Result<String, ParseError>
where
    I: TryInto<ResourceId>,
    I::Error: Into<ParseError>,
{
    let mut uri = base_uri(ResourceType::Application, resolve_id(id)?);
    let Some(params) = params else {
        return Ok(uri);
    };

    let mut entries = Vec::new();
    for key in &params.boxes {
        entries.push(key_entry(&uri, BOX_PARAM, key)?);
    }
    for key in &params.global {
        entries.push(key_entry(&uri, GLOBAL_PARAM, key)?);
    }
    for local in &params.local {
        entries.push(key_entry(&uri, LOCAL_PARAM, &local.key)?);
        entries.push(format!("{ADDRESS_PARAM}={}", local.address));
    }
    if params.program_code {
        entries.push(TEALCODE_PARAM.to_string());
    }

    if !entries.is_empty() {
        uri.push('?');
        uri.push_str(&entries.join("&"));
    }
    Ok(uri)
}

/// Builds a token URI with one bare key per requested field, in canonical
/// field order.
///
/// # Errors
///
/// Returns `ParseError` if the id is negative or fractional.
///
/// # Examples
///
/// ```
/// use arc82::{build_token_uri, TokenField, TokenQueryParams};
///
/// assert_eq!(build_token_uri(456, None).unwrap(), "algorand://asset/456");
///
/// let params = TokenQueryParams::new()
///     .with(TokenField::Url)
///     .with(TokenField::Decimals);
/// assert_eq!(
///     build_token_uri(456, Some(&params)).unwrap(),
///     "algorand://asset/456?decimals&url"
/// );
/// ```
pub fn build_token_uri<I>(id: I, params: Option<&TokenQueryParams>) -> Result<String, ParseError>
where
    I: TryInto<ResourceId>,
    I::Error: Into<ParseError>,
{
    let mut uri = base_uri(ResourceType::Token, resolve_id(id)?);
    if let Some(params) = params.filter(|p| !p.is_empty()) {
        let keys: Vec<&str> = params.iter().map(TokenField::query_key).collect();
        uri.push('?');
        uri.push_str(&keys.join("&"));
    }
    Ok(uri)
}

fn key_entry(uri: &str, param: &'static str, key: &str) -> Result<String, ParseError> {
    validate_key(key)
        .map(|()| format!("{param}={key}"))
        .map_err(|error| ParseError::new(uri, ParseErrorKind::InvalidKey { param, error }))
}

/// Fluent builder for application URIs.
///
/// # Examples
///
/// ```
/// use arc82::{encode_base64url, ApplicationUriBuilder, ResourceId};
///
/// let uri = ApplicationUriBuilder::new(ResourceId::new(42))
///     .box_key(encode_base64url("owner"))
///     .try_local("Y291bnRlcg", "ZZAF5ARA4MEC5PVDOP64JM5O5MQST63Q2KOY2FLYFLXXD3PFSNJJBYAFZM")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     uri,
///     "algorand://app/42?box=b3duZXI&local=Y291bnRlcg&algorandaddress=ZZAF5ARA4MEC5PVDOP64JM5O5MQST63Q2KOY2FLYFLXXD3PFSNJJBYAFZM"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationUriBuilder {
    id: ResourceId,
    params: ApplicationQueryParams,
}

impl ApplicationUriBuilder {
    /// Starts a builder for the given application.
    #[must_use]
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            params: ApplicationQueryParams::new(),
        }
    }

    /// Adds a box key (base64url).
    #[must_use]
    pub fn box_key(mut self, key: impl Into<String>) -> Self {
        self.params.boxes.push(key.into());
        self
    }

    /// Adds a global state key (base64url).
    #[must_use]
    pub fn global_key(mut self, key: impl Into<String>) -> Self {
        self.params.global.push(key.into());
        self
    }

    /// Adds a local state key read from `address`.
    #[must_use]
    pub fn local(mut self, key: impl Into<String>, address: Address) -> Self {
        self.params = self.params.with_local(key, address);
        self
    }

    /// Parses `address` and adds a local state key.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the address fails the shape check.
    pub fn try_local(self, key: impl Into<String>, address: &str) -> Result<Self, ParseError> {
        let address = Address::parse(address)
            .map_err(|e| ParseError::new(address, ParseErrorKind::InvalidAddress(e)))?;
        Ok(self.local(key, address))
    }

    /// Requests program code.
    #[must_use]
    pub fn program_code(mut self) -> Self {
        self.params.program_code = true;
        self
    }

    /// Returns the parameters collected so far.
    #[must_use]
    pub const fn params(&self) -> &ApplicationQueryParams {
        &self.params
    }

    /// Builds the URI.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if any key is not unpadded base64url.
    pub fn build(&self) -> Result<String, ParseError> {
        build_application_uri(self.id, Some(&self.params))
    }
}

/// Fluent builder for token URIs.
///
/// ```
/// use arc82::{ResourceId, TokenField, TokenUriBuilder};
///
/// let uri = TokenUriBuilder::new(ResourceId::new(31566704))
///     .field(TokenField::UnitName)
///     .field(TokenField::Total)
///     .build();
/// assert_eq!(uri, "algorand://asset/31566704?total&unitname");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TokenUriBuilder {
    id: ResourceId,
    params: TokenQueryParams,
}

impl TokenUriBuilder {
    /// Starts a builder for the given token.
    #[must_use]
    pub const fn new(id: ResourceId) -> Self {
        Self {
            id,
            params: TokenQueryParams::new(),
        }
    }

    /// Requests a field.
    #[must_use]
    pub const fn field(mut self, field: TokenField) -> Self {
        self.params = self.params.with(field);
        self
    }

    /// Requests every field.
    #[must_use]
    pub const fn all_fields(mut self) -> Self {
        self.params = TokenQueryParams::all();
        self
    }

    /// Builds the URI.
    #[must_use]
    pub fn build(&self) -> String {
        let mut uri = base_uri(ResourceType::Token, self.id);
        if !self.params.is_empty() {
            let keys: Vec<&str> = self.params.iter().map(TokenField::query_key).collect();
            uri.push('?');
            uri.push_str(&keys.join("&"));
        }
        uri
    }
}
