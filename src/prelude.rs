//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use arc82::prelude::*;
//!
//! let query = ParsedQuery::parse("algorand://asset/456?total").unwrap();
//! assert_eq!(query.resource_type(), ResourceType::Token);
//! ```

pub use crate::{
    // Core types
    Address, ApplicationQueryParams, LocalPairing, LocalQuery, ParsedQuery, ResourceId,
    ResourceParams, ResourceType, TokenField, TokenQueryParams,
    // Builders
    ApplicationUriBuilder, TokenUriBuilder, build_application_uri, build_token_uri,
    // Codec
    decode_base64url, encode_base64url,
    // Validation
    extract_id, extract_type, is_valid_uri, validate_grammar,
    // Errors
    AddressError, Base64UrlError, IdError, ParseError, ParseErrorKind,
};
