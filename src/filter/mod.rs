//! Domain filter pipeline
//!
//! Reads candidate domains, resolves their A and NS records and keeps the
//! ones whose A record starts with a configured prefix and which are served
//! by at least one matching nameserver.

pub mod input;
pub mod matcher;
pub mod pipeline;

pub use input::{parse_domains, read_domains};
pub use matcher::{matches_a, matches_ns, MatchCriteria, NameserverPattern};
pub use pipeline::{DomainFilter, FilterRun};

use crate::config::FilterSettings;

impl From<&FilterSettings> for MatchCriteria {
    fn from(settings: &FilterSettings) -> Self {
        MatchCriteria::new(settings.a_record_prefix.clone(), &settings.nameservers)
            .with_ignore_case(settings.ignore_case)
    }
}
