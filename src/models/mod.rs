//! Data models for ssl-toolbox
//!
//! This module contains the data structures shared between the filter
//! pipeline, the certificate tools and the output layer.

pub mod certificate;
pub mod dns_result;
pub mod verdict;

pub use certificate::{Decoded, DecodedCertificate, DecodedCsr};
pub use dns_result::{LookupOutcome, RecordType};
pub use verdict::{DomainReport, FilterSummary, Verdict};
