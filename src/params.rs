//! Typed query parameter sets for the two resource types.

use std::fmt;

use crate::address::Address;

/// A local-state request: a base64url key read from one account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalQuery {
    /// Base64url state key
    pub key: String,
    /// Account whose opt-in record is read
    pub address: Address,
}

impl LocalQuery {
    /// Creates a local-state request.
    #[must_use]
    pub fn new(key: impl Into<String>, address: Address) -> Self {
        Self {
            key: key.into(),
            address,
        }
    }
}

/// Parameters of an application query.
///
/// Keys are stored in canonical base64url form (no padding) and keep the
/// order in which they appeared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplicationQueryParams {
    /// Box storage keys
    pub boxes: Vec<String>,
    /// Global state keys
    pub global: Vec<String>,
    /// Local state requests
    pub local: Vec<LocalQuery>,
    /// Whether approval/clear program bytes are requested
    pub program_code: bool,
}

impl ApplicationQueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.global.is_empty() && self.local.is_empty() && !self.program_code
    }

    /// Adds a box key.
    #[must_use]
    pub fn with_box(mut self, key: impl Into<String>) -> Self {
        self.boxes.push(key.into());
        self
    }

    /// Adds a global state key.
    #[must_use]
    pub fn with_global(mut self, key: impl Into<String>) -> Self {
        self.global.push(key.into());
        self
    }

    /// Adds a local state request.
    #[must_use]
    pub fn with_local(mut self, key: impl Into<String>, address: Address) -> Self {
        self.local.push(LocalQuery::new(key, address));
        self
    }

    /// Requests program code.
    #[must_use]
    pub const fn with_program_code(mut self) -> Self {
        self.program_code = true;
        self
    }
}

/// A token parameter field that can be requested by a bare query key.
///
/// Variants are declared in canonical order; [`TokenField::ALL`] and URI
/// construction follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TokenField {
    /// Total supply
    Total,
    /// Decimal places
    Decimals,
    /// Whether holdings start frozen
    FrozenDefault,
    /// Unit name
    UnitName,
    /// Asset name
    AssetName,
    /// Metadata URL
    Url,
    /// 32-byte metadata hash
    MetadataHash,
    /// Manager address
    Manager,
    /// Reserve address
    Reserve,
    /// Freeze address
    Freeze,
    /// Clawback address
    Clawback,
}

impl TokenField {
    /// All fields in canonical order.
    pub const ALL: [Self; 11] = [
        Self::Total,
        Self::Decimals,
        Self::FrozenDefault,
        Self::UnitName,
        Self::AssetName,
        Self::Url,
        Self::MetadataHash,
        Self::Manager,
        Self::Reserve,
        Self::Freeze,
        Self::Clawback,
    ];

    /// Returns the query key for this field.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Decimals => "decimals",
            Self::FrozenDefault => "frozen",
            Self::UnitName => "unitname",
            Self::AssetName => "assetname",
            Self::Url => "url",
            Self::MetadataHash => "metadatahash",
            Self::Manager => "manager",
            Self::Reserve => "reserve",
            Self::Freeze => "freeze",
            Self::Clawback => "clawback",
        }
    }

    /// Looks up a field by its query key.
    #[must_use]
    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.query_key() == key)
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

/// Parameters of a token query: one flag per [`TokenField`].
///
/// # Examples
///
/// ```
/// use arc82::{TokenField, TokenQueryParams};
///
/// let params = TokenQueryParams::new()
///     .with(TokenField::Manager)
///     .with(TokenField::Total);
/// assert!(params.contains(TokenField::Total));
/// // iteration follows canonical order, not insertion order
/// let fields: Vec<_> = params.iter().collect();
/// assert_eq!(fields, vec![TokenField::Total, TokenField::Manager]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenQueryParams {
    flags: u16,
}

impl TokenQueryParams {
    /// Creates a parameter set with every flag false.
    #[must_use]
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Creates a parameter set with every flag true.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            flags: (1 << TokenField::ALL.len()) - 1,
        }
    }

    /// Returns the set with `field` switched on.
    #[must_use]
    pub const fn with(mut self, field: TokenField) -> Self {
        self.flags |= field.bit();
        self
    }

    /// Switches a field on or off.
    pub fn set(&mut self, field: TokenField, enabled: bool) {
        if enabled {
            self.flags |= field.bit();
        } else {
            self.flags &= !field.bit();
        }
    }

    /// Returns true if the field is requested.
    #[must_use]
    pub const fn contains(&self, field: TokenField) -> bool {
        self.flags & field.bit() != 0
    }

    /// Returns true if no field is requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flags == 0
    }

    /// Returns the number of requested fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.flags.count_ones() as usize
    }

    /// Iterates requested fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = TokenField> + '_ {
        TokenField::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<TokenField> for TokenQueryParams {
    fn from_iter<I: IntoIterator<Item = TokenField>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TokenQueryParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TokenQueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = Vec::<TokenField>::deserialize(deserializer)?;
        Ok(fields.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keys_roundtrip() {
        for field in TokenField::ALL {
            assert_eq!(TokenField::from_query_key(field.query_key()), Some(field));
        }
        assert_eq!(TokenField::from_query_key("frozenDefault"), None);
    }

    #[test]
    fn frozen_default_uses_short_key() {
        assert_eq!(TokenField::FrozenDefault.query_key(), "frozen");
    }

    #[test]
    fn flags_set_and_clear() {
        let mut params = TokenQueryParams::new().with(TokenField::Url);
        assert!(params.contains(TokenField::Url));
        params.set(TokenField::Url, false);
        assert!(params.is_empty());
    }

    #[test]
    fn all_contains_every_field() {
        let params = TokenQueryParams::all();
        assert_eq!(params.len(), 11);
        assert!(TokenField::ALL.iter().all(|f| params.contains(*f)));
    }

    #[test]
    fn iter_is_canonical() {
        let params: TokenQueryParams =
            [TokenField::Clawback, TokenField::Decimals, TokenField::Total]
                .into_iter()
                .collect();
        let fields: Vec<_> = params.iter().collect();
        assert_eq!(
            fields,
            vec![TokenField::Total, TokenField::Decimals, TokenField::Clawback]
        );
    }

    #[test]
    fn application_params_builder() {
        let params = ApplicationQueryParams::new()
            .with_box("Ym94")
            .with_global("Z2xvYmFs")
            .with_program_code();
        assert_eq!(params.boxes, vec!["Ym94"]);
        assert_eq!(params.global, vec!["Z2xvYmFs"]);
        assert!(params.program_code);
        assert!(!params.is_empty());
        assert!(ApplicationQueryParams::new().is_empty());
    }
}
