//! Keyed view over a fetched state blob.

use std::collections::HashMap;

use arc82::encode_base64url_bytes;

use crate::{StateEntry, TealValue};

/// Maps each entry's base64url-encoded key to its value.
///
/// Built once per fetched global or local state, so every requested key is a
/// single lookup. When the ledger returns a key twice, the first entry wins.
#[derive(Debug)]
pub(crate) struct StateIndex<'a> {
    entries: HashMap<String, &'a TealValue>,
}

impl<'a> StateIndex<'a> {
    pub fn new(state: &'a [StateEntry]) -> Self {
        let mut entries = HashMap::with_capacity(state.len());
        for entry in state {
            entries
                .entry(encode_base64url_bytes(&entry.key))
                .or_insert(&entry.value);
        }
        Self { entries }
    }

    /// Looks up a canonical (unpadded) base64url key.
    pub fn get(&self, key: &str) -> Option<&'a TealValue> {
        self.entries.get(key).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
