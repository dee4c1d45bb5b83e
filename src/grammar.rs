//! Strict structural validation against the ARC-82 grammar.
//!
//! [`ParsedQuery::parse`](crate::ParsedQuery::parse) is deliberately lenient:
//! it finds the resource marker anywhere in the string and ignores unknown
//! keys. [`validate_grammar`] checks the shape exactly:
//!
//! ```text
//! algorand://app/<uint>  (box=<b64url>)* (global=<b64url>)* (local=<b64url>&algorandaddress=<addr>)* (tealcode)?
//! algorand://asset/<uint> (total)? (decimals)? (frozen)? (unitname)? (assetname)? (url)?
//!                         (metadatahash)? (manager)? (reserve)? (freeze)? (clawback)?
//! ```

use crate::address::Address;
use crate::base64url::validate_key;
use crate::constants::{
    ADDRESS_PARAM, BOX_PARAM, GLOBAL_PARAM, LOCAL_PARAM, SCHEME, TEALCODE_PARAM,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::params::TokenField;
use crate::query::{QueryPair, QueryPairs};
use crate::resource::{ResourceId, ResourceType};

/// Validates a URI against the strict grammar.
///
/// # Errors
///
/// Returns `ParseError` describing the first violation.
///
/// # Examples
///
/// ```
/// use arc82::validate_grammar;
///
/// assert!(validate_grammar("algorand://app/1?box=YQ&tealcode").is_ok());
/// assert!(validate_grammar("algorand://asset/1?total=5").is_err());
/// assert!(validate_grammar("algorand://app/1?local=YQ").is_err());
/// ```
pub fn validate_grammar(input: &str) -> Result<(), ParseError> {
    validate_inner(input).map_err(|kind| ParseError::new(input, kind))
}

fn validate_inner(input: &str) -> Result<(), ParseErrorKind> {
    if input.is_empty() {
        return Err(ParseErrorKind::Empty);
    }

    let prefix = format!("{SCHEME}://");
    let Some(rest) = input.strip_prefix(&prefix) else {
        let found = input.split_once(':').map(|(scheme, _)| scheme.to_string());
        return Err(ParseErrorKind::InvalidScheme { found });
    };

    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let resource_type = validate_path(path)?;
    let pairs = QueryPairs::parse(query)?;

    match resource_type {
        ResourceType::Application => validate_application(&pairs),
        ResourceType::Token => validate_token(&pairs),
    }
}

fn validate_path(path: &str) -> Result<ResourceType, ParseErrorKind> {
    let (segment, id) = path.split_once('/').ok_or(ParseErrorKind::MalformedPath)?;
    let resource_type = [ResourceType::Application, ResourceType::Token]
        .into_iter()
        .find(|t| t.segment() == segment)
        .ok_or(ParseErrorKind::MalformedPath)?;
    ResourceId::parse(id).map_err(ParseErrorKind::InvalidId)?;
    Ok(resource_type)
}

fn validate_application(pairs: &QueryPairs) -> Result<(), ParseErrorKind> {
    let entries: Vec<&QueryPair> = pairs.iter().collect();
    let count = |name: &str| entries.iter().filter(|p| p.name == name).count();

    for (i, pair) in entries.iter().enumerate() {
        match pair.name.as_str() {
            name @ (BOX_PARAM | GLOBAL_PARAM | LOCAL_PARAM) => {
                let param = match name {
                    BOX_PARAM => BOX_PARAM,
                    GLOBAL_PARAM => GLOBAL_PARAM,
                    _ => LOCAL_PARAM,
                };
                let value = pair.value.as_deref().unwrap_or("");
                validate_key(value).map_err(|error| ParseErrorKind::InvalidKey { param, error })?;

                let next_is_address = entries.get(i + 1).is_some_and(|p| p.name == ADDRESS_PARAM);
                if param == LOCAL_PARAM && !next_is_address {
                    return Err(ParseErrorKind::MissingAddress {
                        local_count: count(LOCAL_PARAM),
                    });
                }
            }
            ADDRESS_PARAM => {
                let follows_local = i > 0 && entries[i - 1].name == LOCAL_PARAM;
                if !follows_local {
                    return Err(ParseErrorKind::UnpairedLocal {
                        locals: count(LOCAL_PARAM),
                        addresses: count(ADDRESS_PARAM),
                    });
                }
                Address::parse(pair.value.as_deref().unwrap_or(""))
                    .map_err(ParseErrorKind::InvalidAddress)?;
            }
            TEALCODE_PARAM => {
                if pair.value.is_some() {
                    return Err(ParseErrorKind::UnexpectedValue {
                        name: pair.name.clone(),
                    });
                }
            }
            _ => {
                return Err(ParseErrorKind::UnknownParam {
                    name: pair.name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn validate_token(pairs: &QueryPairs) -> Result<(), ParseErrorKind> {
    for pair in pairs.iter() {
        if TokenField::from_query_key(&pair.name).is_none() {
            return Err(ParseErrorKind::UnknownParam {
                name: pair.name.clone(),
            });
        }
        if pair.value.is_some() {
            return Err(ParseErrorKind::UnexpectedValue {
                name: pair.name.clone(),
            });
        }
    }
    Ok(())
}
