//! Custom error types for query execution.

use std::fmt;

use arc82::{Address, ParseError, ResourceType};

/// Errors reported by a [`LedgerClient`](crate::LedgerClient).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LedgerError {
    /// The requested record does not exist.
    NotFound {
        /// Description of the missing record
        resource: String,
    },
    /// The read did not complete before the client's deadline.
    Timeout {
        /// Description of the read that timed out
        operation: String,
    },
    /// Any other client or network failure.
    Transport {
        /// Error message
        message: String,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { resource } => write!(f, "{resource} not found"),
            Self::Timeout { operation } => write!(f, "{operation} timed out"),
            Self::Transport { message } => write!(f, "ledger read failed: {message}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl LedgerError {
    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a `Timeout` error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true for `NotFound`.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that abort a query as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// An executor was handed a query for the other resource type.
    WrongResourceType {
        /// The type the executor handles
        expected: ResourceType,
        /// The type of the query it was given
        found: ResourceType,
    },
    /// The URI did not parse.
    Parse(ParseError),
    /// The top-level resource read failed for a reason other than not-found.
    Ledger(LedgerError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongResourceType { expected, found } => {
                write!(f, "{found} query passed to {expected} executor")
            }
            Self::Parse(e) => write!(f, "{e}"),
            Self::Ledger(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WrongResourceType { .. } => None,
            Self::Parse(e) => Some(e),
            Self::Ledger(e) => Some(e),
        }
    }
}

impl From<ParseError> for QueryError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Failure of a single requested item. Other items are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemError {
    /// The requested key could not be decoded.
    InvalidKey {
        /// The key as given in the URI
        key: String,
        /// Decoder message
        reason: String,
    },
    /// No box or state entry under this key.
    ///
    /// For a local key the account exists and is opted in to the
    /// application; otherwise the item is [`ItemError::NotOptedIn`].
    NotFound {
        /// The key as given in the URI
        key: String,
    },
    /// The account has no local state for the application.
    NotOptedIn {
        /// The account that was read
        address: Address,
    },
    /// The ledger read for this item failed.
    Ledger(LedgerError),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey { key, reason } => write!(f, "invalid key '{key}': {reason}"),
            Self::NotFound { key } => write!(f, "key '{key}' not found"),
            Self::NotOptedIn { address } => {
                write!(f, "account {address} is not opted in to the application")
            }
            Self::Ledger(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ItemError {}

impl ItemError {
    /// Returns true if this failure should stop further reads: a timeout or
    /// transport error, as opposed to a plain miss.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Ledger(e) if !e.is_not_found())
    }
}
