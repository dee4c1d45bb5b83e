//! Account address type.

use std::fmt;
use std::str::FromStr;

use crate::constants::ADDRESS_LENGTH;
use crate::error::AddressError;

/// An account address that passed the syntactic shape check.
///
/// The check is exactly 58 characters from the base32 alphabet `[A-Z2-7]`.
/// The embedded checksum is not verified.
///
/// # Examples
///
/// ```
/// use arc82::Address;
///
/// let addr = Address::parse(&"A".repeat(58)).unwrap();
/// assert_eq!(addr.as_str().len(), 58);
///
/// assert!(Address::parse("too-short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Address(String);

impl Address {
    /// Parses an address.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if the length is not 58 or a character falls
    /// outside `[A-Z2-7]`.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let actual = input.chars().count();
        if actual != ADDRESS_LENGTH {
            return Err(AddressError::WrongLength {
                expected: ADDRESS_LENGTH,
                actual,
            });
        }

        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(AddressError::InvalidChar { char: c, position: i });
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the character is in the address alphabet.
    #[must_use]
    pub const fn is_valid_char(c: char) -> bool {
        matches!(c, 'A'..='Z' | '2'..='7')
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}
