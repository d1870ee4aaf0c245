//! DNS lookup result types

use crate::utils::LookupError;
use serde::Serialize;
use std::fmt;

/// Record types the filter pipeline queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordType {
    A,
    #[serde(rename = "NS")]
    Ns,
}

impl RecordType {
    /// Record type as passed to `dig`
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single DNS lookup.
///
/// `Resolved` may hold an empty list when the server answered without
/// records. `Failed` carries the reason the lookup could not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved(Vec<String>),
    Failed(LookupError),
}

impl LookupOutcome {
    /// Records of a resolved lookup, empty for a failed one
    pub fn records(&self) -> &[String] {
        match self {
            LookupOutcome::Resolved(records) => records,
            LookupOutcome::Failed(_) => &[],
        }
    }

    /// First record of a resolved lookup
    pub fn first(&self) -> Option<&str> {
        self.records().first().map(String::as_str)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_display() {
        assert_eq!(RecordType::A.to_string(), "A");
        assert_eq!(RecordType::Ns.to_string(), "NS");
    }

    #[test]
    fn test_failed_outcome_has_no_records() {
        let outcome = LookupOutcome::Failed(LookupError::Spawn {
            command: "dig".to_string(),
            message: "not found".to_string(),
        });
        assert!(outcome.is_failed());
        assert!(outcome.records().is_empty());
        assert_eq!(outcome.first(), None);
    }

    #[test]
    fn test_resolved_first() {
        let outcome = LookupOutcome::Resolved(vec!["5.249.1.1".into(), "5.249.1.2".into()]);
        assert_eq!(outcome.first(), Some("5.249.1.1"));
        assert!(!outcome.is_failed());
    }
}
