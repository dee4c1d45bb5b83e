//! Error types for ARC-82 URI parsing and construction.

use std::fmt;

/// Errors that can occur when parsing or building an ARC-82 URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// URI is empty
    Empty,
    /// Missing or invalid scheme (expected "algorand:")
    InvalidScheme {
        /// The scheme that was found, if any
        found: Option<String>,
    },
    /// Neither `//app/` nor `//asset/` appears in the URI
    MissingResource,
    /// Resource id is missing or out of range
    InvalidId(IdError),
    /// A query value is not valid base64url
    InvalidKey {
        /// Name of the parameter carrying the key
        param: &'static str,
        /// The codec failure
        error: Base64UrlError,
    },
    /// Standalone base64url decoding failed
    InvalidBase64Url(Base64UrlError),
    /// A `local` query was given without any `algorandaddress`
    MissingAddress {
        /// Number of `local` entries found
        local_count: usize,
    },
    /// An `algorandaddress` value has the wrong shape
    InvalidAddress(AddressError),
    /// Strict pairing found a `local` key without its own address
    UnpairedLocal {
        /// Number of `local` entries
        locals: usize,
        /// Number of `algorandaddress` entries
        addresses: usize,
    },
    /// The path is not `app/<uint>` or `asset/<uint>` right after the scheme
    MalformedPath,
    /// A query key outside the resource's namespace
    UnknownParam {
        /// The offending key
        name: String,
    },
    /// A query key that must be bare carries a value
    UnexpectedValue {
        /// The offending key
        name: String,
    },
    /// A query value could not be percent-decoded to UTF-8
    InvalidPercentEncoding {
        /// The raw value
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse ARC-82 URI '{}': {}", self.input, self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::InvalidScheme { found } => match found {
                Some(s) => write!(f, "expected scheme 'algorand:', found '{s}'"),
                None => write!(f, "missing scheme; URI must start with 'algorand:'"),
            },
            ParseErrorKind::MissingResource => {
                write!(f, "resource type not found; expected '//app/<id>' or '//asset/<id>'")
            }
            ParseErrorKind::InvalidId(e) => write!(f, "invalid resource id: {e}"),
            ParseErrorKind::InvalidKey { param, error } => {
                write!(f, "invalid base64url value for '{param}': {error}")
            }
            ParseErrorKind::InvalidBase64Url(e) => write!(f, "invalid base64url: {e}"),
            ParseErrorKind::MissingAddress { local_count } => write!(
                f,
                "{local_count} local storage {} an 'algorandaddress' parameter",
                if *local_count == 1 { "query requires" } else { "queries require" }
            ),
            ParseErrorKind::InvalidAddress(e) => write!(f, "invalid algorandaddress: {e}"),
            ParseErrorKind::UnpairedLocal { locals, addresses } => write!(
                f,
                "strict pairing requires one 'algorandaddress' per 'local' key; found {locals} keys and {addresses} addresses"
            ),
            ParseErrorKind::MalformedPath => {
                write!(f, "path must be 'app/<id>' or 'asset/<id>' directly after 'algorand://'")
            }
            ParseErrorKind::UnknownParam { name } => {
                write!(f, "unknown query parameter '{name}' for this resource type")
            }
            ParseErrorKind::UnexpectedValue { name } => {
                write!(f, "query parameter '{name}' takes no value")
            }
            ParseErrorKind::InvalidPercentEncoding { value } => {
                write!(f, "invalid percent encoding in '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl std::error::Error for ParseErrorKind {}

/// Errors for resource id parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// No digits follow the resource marker
    Missing,
    /// The id is negative
    Negative {
        /// The rejected value
        value: String,
    },
    /// The id has a fractional part or is not finite
    NotInteger {
        /// The rejected value
        value: String,
    },
    /// The id does not fit in 64 bits
    Overflow {
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no digits follow the resource marker"),
            Self::Negative { value } => write!(f, "id {value} is negative"),
            Self::NotInteger { value } => write!(f, "id {value} is not an integer"),
            Self::Overflow { value } => write!(f, "id {value} exceeds the 64-bit range"),
        }
    }
}

impl std::error::Error for IdError {}

/// Errors for base64url encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base64UrlError {
    /// Character outside `[A-Za-z0-9-_]`
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Length leaves a dangling sextet (length % 4 == 1)
    InvalidLength {
        /// Input length without padding
        length: usize,
    },
    /// The decoded bytes are not valid UTF-8
    NotUtf8,
}

impl fmt::Display for Base64UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => write!(
                f,
                "invalid character '{char}' at position {position}; allowed: A-Z, a-z, 0-9, '-', '_'"
            ),
            Self::InvalidLength { length } => {
                write!(f, "length {length} cannot be produced by base64url encoding")
            }
            Self::NotUtf8 => write!(f, "decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for Base64UrlError {}

/// Errors for account address shape checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Address is not exactly 58 characters
    WrongLength {
        /// Required length
        expected: usize,
        /// Actual length
        actual: usize,
    },
    /// Character outside `[A-Z2-7]`
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "address has {actual} characters, expected {expected}")
            }
            Self::InvalidChar { char, position } => write!(
                f,
                "invalid character '{char}' at position {position}; only A-Z and 2-7 allowed"
            ),
        }
    }
}

impl std::error::Error for AddressError {}
