//! Resource type and numeric id.

use std::fmt;
use std::str::FromStr;

use crate::constants::{APP_MARKER, ASSET_MARKER};
use crate::error::{IdError, ParseError, ParseErrorKind};

/// The kind of ledger resource a URI addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceType {
    /// A deployed application (`//app/<id>`)
    Application,
    /// A native token (`//asset/<id>`)
    Token,
}

impl ResourceType {
    /// Returns the path marker that introduces this resource's id.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Application => APP_MARKER,
            Self::Token => ASSET_MARKER,
        }
    }

    /// Returns the path segment name (`app` or `asset`).
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Application => "app",
            Self::Token => "asset",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Application => f.write_str("application"),
            Self::Token => f.write_str("token"),
        }
    }
}

/// A non-negative resource id.
///
/// Conversions from signed and floating point values reject negative and
/// fractional inputs, so builders accepting `impl TryInto<ResourceId>` fail
/// the same way for `-1` and `1.5`.
///
/// # Examples
///
/// ```
/// use arc82::ResourceId;
///
/// assert_eq!(ResourceId::try_from(42i64).unwrap().get(), 42);
/// assert!(ResourceId::try_from(-1i64).is_err());
/// assert!(ResourceId::try_from(1.5f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceId(u64);

impl ResourceId {
    /// Creates an id from an unsigned value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses a run of ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the input is empty, not all digits, or too large.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        if input.is_empty() {
            return Err(IdError::Missing);
        }
        if let Some(rest) = input.strip_prefix('-')
            && !rest.is_empty()
            && rest.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(IdError::Negative {
                value: input.to_string(),
            });
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NotInteger {
                value: input.to_string(),
            });
        }
        input.parse().map(Self).map_err(|_| IdError::Overflow {
            value: input.to_string(),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ResourceId> for u64 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

fn id_error(value: impl fmt::Display, error: IdError) -> ParseError {
    ParseError::new(value.to_string(), ParseErrorKind::InvalidId(error))
}

impl TryFrom<u64> for ResourceId {
    type Error = ParseError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Ok(Self(id))
    }
}

impl TryFrom<u32> for ResourceId {
    type Error = ParseError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Ok(Self(u64::from(id)))
    }
}

impl TryFrom<i64> for ResourceId {
    type Error = ParseError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u64::try_from(id).map(Self).map_err(|_| {
            id_error(
                id,
                IdError::Negative {
                    value: id.to_string(),
                },
            )
        })
    }
}

impl TryFrom<i32> for ResourceId {
    type Error = ParseError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(id))
    }
}

impl TryFrom<f64> for ResourceId {
    type Error = ParseError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn try_from(id: f64) -> Result<Self, Self::Error> {
        let value = id.to_string();
        if !id.is_finite() || id.fract() != 0.0 {
            return Err(id_error(&value, IdError::NotInteger { value: value.clone() }));
        }
        if id < 0.0 {
            return Err(id_error(&value, IdError::Negative { value: value.clone() }));
        }
        // 2^64 is exactly representable; anything at or above it overflows.
        if id >= u64::MAX as f64 {
            return Err(id_error(&value, IdError::Overflow { value: value.clone() }));
        }
        Ok(Self(id as u64))
    }
}

impl TryFrom<&str> for ResourceId {
    type Error = ParseError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::parse(id).map_err(|e| id_error(id, e))
    }
}
