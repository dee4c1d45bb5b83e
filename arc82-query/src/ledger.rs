//! Ledger records returned by a [`LedgerClient`](crate::LedgerClient).

use arc82::Address;

/// A typed state value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "lowercase"))]
pub enum TealValue {
    /// Raw byte string
    Bytes(Vec<u8>),
    /// Unsigned 64-bit integer
    Uint(u64),
}

impl TealValue {
    /// Returns the bytes of a byte value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            Self::Uint(_) => None,
        }
    }

    /// Returns the integer of an integer value.
    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(n) => Some(*n),
            Self::Bytes(_) => None,
        }
    }

    /// Decodes a byte value as UTF-8 when it is valid UTF-8.
    #[must_use]
    pub fn decoded(&self) -> Option<String> {
        self.as_bytes()
            .and_then(|b| std::str::from_utf8(b).ok())
            .map(str::to_string)
    }
}

/// One key/value entry of global or local state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateEntry {
    /// Raw key bytes
    pub key: Vec<u8>,
    /// Typed value
    pub value: TealValue,
}

impl StateEntry {
    /// Creates a byte-valued entry.
    #[must_use]
    pub fn bytes(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: TealValue::Bytes(value.into()),
        }
    }

    /// Creates an integer-valued entry.
    #[must_use]
    pub fn uint(key: impl Into<Vec<u8>>, value: u64) -> Self {
        Self {
            key: key.into(),
            value: TealValue::Uint(value),
        }
    }
}

/// Application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplicationInfo {
    /// Application id
    pub id: u64,
    /// Global state entries
    pub global_state: Vec<StateEntry>,
    /// Approval program bytecode
    pub approval_program: Vec<u8>,
    /// Clear-state program bytecode
    pub clear_program: Vec<u8>,
}

/// An account's opt-in record for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalState {
    /// Application id
    pub app_id: u64,
    /// Local state entries
    pub key_value: Vec<StateEntry>,
}

/// Account information relevant to local state reads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountInfo {
    /// Account address
    pub address: Address,
    /// Local state per opted-in application
    pub apps_local_state: Vec<LocalState>,
}

impl AccountInfo {
    /// Creates an account with no opt-ins.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            apps_local_state: Vec::new(),
        }
    }

    /// Returns the local state record for an application.
    #[must_use]
    pub fn local_state(&self, app_id: u64) -> Option<&LocalState> {
        self.apps_local_state.iter().find(|s| s.app_id == app_id)
    }
}

/// Token parameter record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenInfo {
    /// Token id
    pub id: u64,
    /// Total supply in base units
    pub total: u64,
    /// Decimal places
    pub decimals: u32,
    /// Whether holdings start frozen
    pub default_frozen: bool,
    /// Unit name
    pub unit_name: Option<String>,
    /// Asset name
    pub name: Option<String>,
    /// Metadata URL
    pub url: Option<String>,
    /// Raw metadata hash
    pub metadata_hash: Option<Vec<u8>>,
    /// Manager address
    pub manager: Option<String>,
    /// Reserve address
    pub reserve: Option<String>,
    /// Freeze address
    pub freeze: Option<String>,
    /// Clawback address
    pub clawback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_only_for_utf8_bytes() {
        assert_eq!(TealValue::Bytes(b"hello".to_vec()).decoded().as_deref(), Some("hello"));
        assert_eq!(TealValue::Bytes(vec![0xff, 0x00]).decoded(), None);
        assert_eq!(TealValue::Uint(5).decoded(), None);
    }

    #[test]
    fn accessors() {
        assert_eq!(TealValue::Uint(5).as_uint(), Some(5));
        assert_eq!(TealValue::Uint(5).as_bytes(), None);
        assert_eq!(TealValue::Bytes(vec![1]).as_bytes(), Some(&[1u8][..]));
    }
}
