//! Query execution for `algorand://` ARC-82 URIs.
//!
//! This crate resolves a parsed [`arc82::ParsedQuery`] into ledger reads:
//!
//! - **Client seam**: the [`LedgerClient`] trait, implemented by whatever
//!   talks to an algod or indexer node
//! - **Executors**: [`query_application`] for boxes, global and local state
//!   and program code; [`query_token`] for token parameters
//! - **Dispatch**: [`query_from_uri`] parses a string and routes it
//! - **In-memory ledger**: [`MemoryLedger`] for tests and offline use
//!
//! # Outcomes
//!
//! Every requested item carries its own `Result`, so one missing box does
//! not hide the others. A resource that does not exist is an `Ok` outcome
//! with `exists == false`; only wrong resource types, unparsable URIs and
//! top-level ledger failures are returned as [`QueryError`].
//!
//! # Quick Start
//!
//! ```rust
//! use arc82::ParsedQuery;
//! use arc82_query::{ApplicationInfo, MemoryLedger, query_application};
//!
//! let ledger = MemoryLedger::new();
//! ledger.insert_application(ApplicationInfo { id: 2345, ..ApplicationInfo::default() });
//! ledger.insert_box(2345, "algorond", "value");
//!
//! // "YWxnb3JvbmQ" is base64url for "algorond"; "bWlzc2luZw" for "missing"
//! let query = ParsedQuery::parse("algorand://app/2345?box=YWxnb3JvbmQ&box=bWlzc2luZw").unwrap();
//! let outcome = futures::executor::block_on(query_application(&query, &ledger)).unwrap();
//!
//! assert!(outcome.success());
//! assert_eq!(outcome.boxes[0].as_ref().unwrap().value, b"value");
//! assert!(outcome.boxes[1].is_err());
//! ```
//!
//! # Concurrency
//!
//! Item reads run one at a time by default. [`QueryConfig`] raises the
//! number of reads in flight; results keep request order either way.
//!
//! ```rust
//! use arc82_query::QueryConfig;
//!
//! let config = QueryConfig::new().with_max_concurrent_reads(8);
//! assert_eq!(config.max_concurrent_reads, 8);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod application;
mod client;
mod config;
mod dispatch;
mod error;
mod ledger;
mod memory;
mod state;
mod token;

pub use application::{
    ApplicationOutcome, BoxItem, GlobalItem, LocalItem, ProgramCode, query_application,
    query_application_with,
};
pub use client::LedgerClient;
pub use config::QueryConfig;
pub use dispatch::{QueryOutcome, query, query_from_uri, query_from_uri_with};
pub use error::{ItemError, LedgerError, QueryError};
pub use ledger::{AccountInfo, ApplicationInfo, LocalState, StateEntry, TealValue, TokenInfo};
pub use memory::MemoryLedger;
pub use token::{TokenOutcome, TokenParameters, query_token};
