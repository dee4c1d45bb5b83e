//! Parser, builder and validator for the `algorand://` ARC-82 query URI scheme.
//!
//! ARC-82 URIs describe a read-only query against ledger state: storage of a
//! deployed application, or the parameters of a native token. This crate
//! turns such a string into a typed [`ParsedQuery`] and back. Executing the
//! query against a ledger lives in the companion `arc82-query` crate.
//!
//! # Overview
//!
//! ```text
//! algorand://app/<id>?box=<b64url>&global=<b64url>&local=<b64url>&algorandaddress=<addr>&tealcode
//! algorand://asset/<id>?total&decimals&frozen&unitname&assetname&url&metadatahash&manager&reserve&freeze&clawback
//! ```
//!
//! Storage keys travel as unpadded base64url so arbitrary bytes survive the
//! URI; see [`encode_base64url`] and [`decode_base64url`].
//!
//! # Quick Start
//!
//! ```rust
//! use arc82::{ParsedQuery, ResourceType, decode_base64url};
//!
//! let query = ParsedQuery::parse("algorand://app/12345?global=Z2xvYmFsX2tleQ&tealcode").unwrap();
//! assert_eq!(query.resource_type(), ResourceType::Application);
//! assert_eq!(query.id().get(), 12345);
//!
//! let params = query.application_params().unwrap();
//! assert_eq!(decode_base64url(&params.global[0]).unwrap(), "global_key");
//! assert!(params.program_code);
//! ```
//!
//! # Building
//!
//! ```rust
//! use arc82::{build_token_uri, TokenField, TokenQueryParams};
//!
//! let params = TokenQueryParams::new()
//!     .with(TokenField::Total)
//!     .with(TokenField::Decimals);
//! assert_eq!(
//!     build_token_uri(31566704, Some(&params)).unwrap(),
//!     "algorand://asset/31566704?total&decimals"
//! );
//! ```
//!
//! # Lenient parsing, strict validation
//!
//! [`ParsedQuery::parse`] locates `//app/` or `//asset/` anywhere in the
//! input and pairs every `local` key with the first `algorandaddress`.
//! [`ParsedQuery::parse_with`] with [`LocalPairing::Strict`] requires one
//! address per local key, and [`validate_grammar`] checks the exact shape.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod address;
mod base64url;
mod builder;
mod constants;
mod error;
mod grammar;
#[cfg(kani)]
mod kani_impls;
mod params;
pub mod prelude;
mod query;
mod resource;
mod samples;
mod uri;

pub use address::Address;
pub use base64url::{
    decode_base64url, decode_base64url_bytes, encode_base64url, encode_base64url_bytes,
    is_valid_char as is_base64url_char,
};
pub use builder::{ApplicationUriBuilder, TokenUriBuilder, build_application_uri, build_token_uri};
pub use constants::{
    ADDRESS_LENGTH, ADDRESS_PARAM, APP_MARKER, ASSET_MARKER, BOX_PARAM, GLOBAL_PARAM, LOCAL_PARAM,
    SCHEME, SCHEME_PREFIX, TEALCODE_PARAM,
};
pub use error::{AddressError, Base64UrlError, IdError, ParseError, ParseErrorKind};
pub use grammar::validate_grammar;
pub use params::{ApplicationQueryParams, LocalQuery, TokenField, TokenQueryParams};
pub use resource::{ResourceId, ResourceType};
pub use samples::example_uris;
pub use uri::{
    LocalPairing, ParsedQuery, ResourceParams, extract_id, extract_type, is_valid_uri, parse,
};
