//! Configuration for query execution.

use arc82::LocalPairing;

/// Configuration for the query executors.
///
/// The default reproduces the reference behaviour: one read at a time, in
/// request order, with legacy first-address pairing for `local` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// How `local` keys pair with addresses when parsing a URI.
    ///
    /// Only used by [`query_from_uri_with`](crate::query_from_uri_with).
    /// Default: [`LocalPairing::FirstAddress`]
    pub pairing: LocalPairing,

    /// Maximum number of item reads in flight at once.
    ///
    /// Results keep request order regardless. Values below 1 are treated as 1.
    /// Default: 1
    pub max_concurrent_reads: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            pairing: LocalPairing::FirstAddress,
            max_concurrent_reads: 1,
        }
    }
}

impl QueryConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the local pairing mode.
    #[must_use]
    pub const fn with_pairing(mut self, pairing: LocalPairing) -> Self {
        self.pairing = pairing;
        self
    }

    /// Sets the read concurrency.
    #[must_use]
    pub const fn with_max_concurrent_reads(mut self, max: usize) -> Self {
        self.max_concurrent_reads = max;
        self
    }

    pub(crate) fn concurrency(&self) -> usize {
        self.max_concurrent_reads.max(1)
    }
}
