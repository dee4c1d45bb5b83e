//! Parsed ARC-82 query URI.

use std::fmt;
use std::str::FromStr;

use crate::address::Address;
use crate::base64url::validate_key;
use crate::builder::{build_application_uri, build_token_uri};
use crate::constants::{
    ADDRESS_PARAM, APP_MARKER, ASSET_MARKER, BOX_PARAM, GLOBAL_PARAM, LOCAL_PARAM, SCHEME_PREFIX,
    TEALCODE_PARAM,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::params::{ApplicationQueryParams, LocalQuery, TokenField, TokenQueryParams};
use crate::query::{QueryPair, QueryPairs};
use crate::resource::{ResourceId, ResourceType};

/// How `local=` keys are paired with `algorandaddress=` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalPairing {
    /// Every local key reads from the first address in the URI.
    #[default]
    FirstAddress,
    /// The n-th local key reads from the n-th address; counts must match.
    Strict,
}

/// Parameters attached to a parsed query, by resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "params", rename_all = "lowercase"))]
pub enum ResourceParams {
    /// Application storage and code requests
    Application(ApplicationQueryParams),
    /// Token field requests
    Token(TokenQueryParams),
}

/// A parsed and validated ARC-82 URI.
///
/// # Structure
///
/// ```text
/// algorand://app/<id>?box=<b64url>&global=<b64url>&local=<b64url>&algorandaddress=<addr>&tealcode
/// algorand://asset/<id>?total&decimals&frozen&unitname&assetname&url&metadatahash&manager&reserve&freeze&clawback
/// ```
///
/// # Examples
///
/// ```
/// use arc82::{ParsedQuery, ResourceType};
///
/// let query = ParsedQuery::parse("algorand://app/2345?box=YWxnb3JvbmQ%3D").unwrap();
/// assert_eq!(query.resource_type(), ResourceType::Application);
/// assert_eq!(query.id().get(), 2345);
/// assert_eq!(query.application_params().unwrap().boxes, vec!["YWxnb3JvbmQ"]);
///
/// let query = ParsedQuery::parse("algorand://asset/456?total&decimals").unwrap();
/// assert_eq!(query.token_params().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    id: ResourceId,
    params: ResourceParams,
    original: String,
}

impl ParsedQuery {
    /// Parses a URI, pairing every `local` key with the first address.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The URI is empty or does not start with `algorand:`
    /// - Neither `//app/` nor `//asset/` is followed by a valid id
    /// - A `box`, `global` or `local` value is not base64url
    /// - A `local` key has no `algorandaddress`, or an address is malformed
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, LocalPairing::FirstAddress)
    }

    /// Parses a URI with an explicit local pairing mode.
    ///
    /// # Errors
    ///
    /// As [`ParsedQuery::parse`], plus `UnpairedLocal` under
    /// [`LocalPairing::Strict`] when key and address counts differ or a
    /// `local` key is not immediately followed by its `algorandaddress`.
    pub fn parse_with(input: &str, pairing: LocalPairing) -> Result<Self, ParseError> {
        Self::parse_inner(input, pairing).map_err(|kind| ParseError::new(input, kind))
    }

    /// Returns the resource type.
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        match self.params {
            ResourceParams::Application(_) => ResourceType::Application,
            ResourceParams::Token(_) => ResourceType::Token,
        }
    }

    /// Returns the resource id.
    #[must_use]
    pub const fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn params(&self) -> &ResourceParams {
        &self.params
    }

    /// Returns application parameters for an application URI.
    #[must_use]
    pub const fn application_params(&self) -> Option<&ApplicationQueryParams> {
        match &self.params {
            ResourceParams::Application(p) => Some(p),
            ResourceParams::Token(_) => None,
        }
    }

    /// Returns token parameters for a token URI.
    #[must_use]
    pub const fn token_params(&self) -> Option<&TokenQueryParams> {
        match &self.params {
            ResourceParams::Token(p) => Some(p),
            ResourceParams::Application(_) => None,
        }
    }

    /// Returns the URI exactly as given to the parser.
    #[must_use]
    pub fn original_uri(&self) -> &str {
        &self.original
    }

    /// Rebuilds the URI in canonical form: `algorand://<type>/<id>` followed
    /// by parameters in builder order.
    #[must_use]
    pub fn canonical(&self) -> String {
        let built = match &self.params {
            ResourceParams::Application(p) => build_application_uri(self.id, Some(p)),
            ResourceParams::Token(p) => build_token_uri(self.id, Some(p)),
        };
        // Parameters were validated on the way in, so rebuilding cannot fail.
        built.unwrap_or_else(|_| self.original.clone())
    }

    fn parse_inner(input: &str, pairing: LocalPairing) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        if !input.starts_with(SCHEME_PREFIX) {
            let found = input.split_once(':').map(|(scheme, _)| scheme.to_string());
            return Err(ParseErrorKind::InvalidScheme { found });
        }

        let (resource_type, id) = Self::detect_resource(input)?;
        let query = QueryPairs::from_uri(input)?;

        let params = match resource_type {
            ResourceType::Application => {
                ResourceParams::Application(Self::application_params_from(&query, pairing)?)
            }
            ResourceType::Token => ResourceParams::Token(Self::token_params_from(&query)),
        };

        Ok(Self {
            id,
            params,
            original: input.to_string(),
        })
    }

    /// Finds the first `//app/` (else `//asset/`) anywhere in the input and
    /// reads the digit run right after it.
    fn detect_resource(input: &str) -> Result<(ResourceType, ResourceId), ParseErrorKind> {
        let (resource_type, start) = if let Some(idx) = input.find(APP_MARKER) {
            (ResourceType::Application, idx + APP_MARKER.len())
        } else if let Some(idx) = input.find(ASSET_MARKER) {
            (ResourceType::Token, idx + ASSET_MARKER.len())
        } else {
            return Err(ParseErrorKind::MissingResource);
        };

        let rest = &input[start..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let id = ResourceId::parse(&rest[..digits_end]).map_err(ParseErrorKind::InvalidId)?;

        Ok((resource_type, id))
    }

    fn application_params_from(
        query: &QueryPairs,
        pairing: LocalPairing,
    ) -> Result<ApplicationQueryParams, ParseErrorKind> {
        let boxes = canonical_keys(query, BOX_PARAM)?;
        let global = canonical_keys(query, GLOBAL_PARAM)?;
        let local_keys = canonical_keys(query, LOCAL_PARAM)?;

        let addresses = query
            .values(ADDRESS_PARAM)
            .map(|a| Address::parse(a).map_err(ParseErrorKind::InvalidAddress))
            .collect::<Result<Vec<_>, _>>()?;

        let local = if local_keys.is_empty() {
            Vec::new()
        } else {
            match pairing {
                LocalPairing::FirstAddress => {
                    let address = addresses.first().ok_or(ParseErrorKind::MissingAddress {
                        local_count: local_keys.len(),
                    })?;
                    local_keys
                        .into_iter()
                        .map(|key| LocalQuery::new(key, address.clone()))
                        .collect()
                }
                LocalPairing::Strict => {
                    if addresses.is_empty() {
                        return Err(ParseErrorKind::MissingAddress {
                            local_count: local_keys.len(),
                        });
                    }
                    let unpaired = ParseErrorKind::UnpairedLocal {
                        locals: local_keys.len(),
                        addresses: addresses.len(),
                    };
                    if addresses.len() != local_keys.len() {
                        return Err(unpaired);
                    }
                    let paired = adjacent_addresses(query)?;
                    if paired.len() != local_keys.len() {
                        return Err(unpaired);
                    }
                    local_keys
                        .into_iter()
                        .zip(paired)
                        .map(|(key, address)| LocalQuery::new(key, address))
                        .collect()
                }
            }
        };

        Ok(ApplicationQueryParams {
            boxes,
            global,
            local,
            program_code: query.contains(TEALCODE_PARAM),
        })
    }

    fn token_params_from(query: &QueryPairs) -> TokenQueryParams {
        TokenField::ALL
            .into_iter()
            .filter(|f| query.contains(f.query_key()))
            .collect()
    }
}

/// The address directly following each `local` entry, in order. Stops at
/// the first `local` that is not immediately followed by an address.
fn adjacent_addresses(query: &QueryPairs) -> Result<Vec<Address>, ParseErrorKind> {
    let entries: Vec<&QueryPair> = query.iter().collect();
    entries
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name == LOCAL_PARAM)
        .map_while(|(i, _)| entries.get(i + 1).filter(|next| next.name == ADDRESS_PARAM))
        .map(|pair| {
            Address::parse(pair.value.as_deref().unwrap_or("")).map_err(ParseErrorKind::InvalidAddress)
        })
        .collect()
}

/// Validates every value of `param` and returns them without padding.
fn canonical_keys(query: &QueryPairs, param: &'static str) -> Result<Vec<String>, ParseErrorKind> {
    query
        .values(param)
        .map(|raw| {
            let key = raw.trim_end_matches('=');
            validate_key(key)
                .map(|()| key.to_string())
                .map_err(|error| ParseErrorKind::InvalidKey { param, error })
        })
        .collect()
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for ParsedQuery {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ParsedQuery {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl TryFrom<&str> for ParsedQuery {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParsedQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ParsedQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parses a URI. Shorthand for [`ParsedQuery::parse`].
///
/// # Errors
///
/// See [`ParsedQuery::parse`].
pub fn parse(input: &str) -> Result<ParsedQuery, ParseError> {
    ParsedQuery::parse(input)
}

/// Returns true if the input parses as an ARC-82 URI.
///
/// ```
/// assert!(arc82::is_valid_uri("algorand://app/123"));
/// assert!(!arc82::is_valid_uri("http://example.com"));
/// ```
#[must_use]
pub fn is_valid_uri(input: &str) -> bool {
    ParsedQuery::parse(input).is_ok()
}

/// Returns the resource id, or `None` if the input does not parse.
#[must_use]
pub fn extract_id(input: &str) -> Option<u64> {
    ParsedQuery::parse(input).ok().map(|q| q.id().get())
}

/// Returns the resource type, or `None` if the input does not parse.
#[must_use]
pub fn extract_type(input: &str) -> Option<ResourceType> {
    ParsedQuery::parse(input).ok().map(|q| q.resource_type())
}
