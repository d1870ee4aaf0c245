//! Per-domain filter verdicts and run summaries

use super::RecordType;
use serde::Serialize;
use std::fmt;

/// Why a domain was kept or dropped by the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// A record and at least one nameserver matched
    Accepted { a_record: String, nameserver: String },
    /// The A lookup answered without any IPv4 address
    NoARecord,
    /// The A record does not start with the configured prefix
    ARecordMismatch { a_record: String },
    /// The NS lookup answered without nameservers
    NoNameservers,
    /// None of the nameservers matched a pattern
    NameserverMismatch { nameservers: Vec<String> },
    /// The lookup itself failed (process error, resolver error, timeout)
    LookupFailed {
        record_type: RecordType,
        reason: String,
    },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted {
                a_record,
                nameserver,
            } => write!(f, "accepted (A {}, NS {})", a_record, nameserver),
            Verdict::NoARecord => write!(f, "no A record"),
            Verdict::ARecordMismatch { a_record } => write!(f, "A record {} does not match", a_record),
            Verdict::NoNameservers => write!(f, "no nameservers"),
            Verdict::NameserverMismatch { nameservers } => {
                write!(f, "no matching nameserver in [{}]", nameservers.join(", "))
            }
            Verdict::LookupFailed {
                record_type,
                reason,
            } => write!(f, "{} lookup failed: {}", record_type, reason),
        }
    }
}

/// Verdict for one input domain, tagged with its 1-based input position
#[derive(Debug, Clone, Serialize)]
pub struct DomainReport {
    pub index: usize,
    pub domain: String,
    pub verdict: Verdict,
}

/// Counters for a whole filter run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total: usize,
    pub accepted: usize,
    pub a_record_mismatch: usize,
    pub nameserver_mismatch: usize,
    pub unresolved: usize,
    pub lookup_failures: usize,
}

impl FilterSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Accepted { .. } => self.accepted += 1,
            Verdict::ARecordMismatch { .. } => self.a_record_mismatch += 1,
            Verdict::NameserverMismatch { .. } => self.nameserver_mismatch += 1,
            Verdict::NoARecord | Verdict::NoNameservers => self.unresolved += 1,
            Verdict::LookupFailed { .. } => self.lookup_failures += 1,
        }
    }

    /// Domains that were looked at but not written
    pub fn rejected(&self) -> usize {
        self.total - self.accepted
    }
}
