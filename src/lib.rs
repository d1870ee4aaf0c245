//! SSL-Toolbox Library
//!
//! DNS and TLS helpers behind the `ssl` command:
//! - Domain filtering by A record prefix and nameserver patterns
//! - `dig` and native (hickory) DNS lookup backends
//! - Certificate and CSR decoding
//! - PFX (PKCS#12) packing and extraction
//! - Highlighting of `openssl s_client` output
//!
//! # Usage
//!
//! ```rust,ignore
//! use ssl_toolbox::dns::DigLookup;
//! use ssl_toolbox::filter::{DomainFilter, MatchCriteria};
//!
//! #[tokio::main]
//! async fn main() {
//!     let criteria = MatchCriteria::new("5.249", ["*.uniweb.no"]);
//!     let filter = DomainFilter::new(DigLookup::new(), criteria).with_parallel(5);
//!     let run = filter
//!         .run_files("domains.txt".as_ref(), "matches.txt".as_ref())
//!         .await
//!         .unwrap();
//!     println!("{} matched", run.summary.accepted);
//! }
//! ```

pub mod cert_ops;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dns;
pub mod filter;
pub mod models;
pub mod output;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use dns::RecordLookup;
pub use filter::{DomainFilter, FilterRun, MatchCriteria};
pub use models::{DomainReport, FilterSummary, LookupOutcome, RecordType, Verdict};
pub use utils::{Result, ToolkitError};
