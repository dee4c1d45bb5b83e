//! Raw query string splitting.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::ParseErrorKind;

/// A single `name[=value]` entry from a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueryPair {
    pub name: String,
    /// `None` for a bare key such as `tealcode`.
    pub value: Option<String>,
}

/// Ordered query entries, duplicates preserved.
///
/// Both `&` and `?` separate entries, so `?box=a?box=b` and `?box=a&box=b`
/// read the same.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct QueryPairs {
    pairs: Vec<QueryPair>,
}

impl QueryPairs {
    /// Splits the part of `uri` after the first `?`.
    pub fn from_uri(uri: &str) -> Result<Self, ParseErrorKind> {
        match uri.split_once('?') {
            Some((_, query)) => Self::parse(query),
            None => Ok(Self::default()),
        }
    }

    /// Parses a query string (without leading '?').
    pub fn parse(input: &str) -> Result<Self, ParseErrorKind> {
        let mut pairs = Vec::new();

        for raw in input.split(['&', '?']) {
            if raw.is_empty() {
                continue;
            }

            let (name, value) = match raw.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (raw, None),
            };

            pairs.push(QueryPair {
                name: decode(name)?,
                value: value.map(decode).transpose()?,
            });
        }

        Ok(Self { pairs })
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryPair> {
        self.pairs.iter()
    }

    /// Values of every entry named `name`, in order. Bare keys yield "".
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |p| p.name == name)
            .map(|p| p.value.as_deref().unwrap_or(""))
    }

    /// Returns true if any entry is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|p| p.name == name)
    }
}

fn decode(raw: &str) -> Result<String, ParseErrorKind> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ParseErrorKind::InvalidPercentEncoding {
            value: raw.to_string(),
        })
}
