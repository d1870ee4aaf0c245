//! A-record and nameserver predicates

use std::fmt;

/// One nameserver rule: an exact host name or a `*suffix` wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameserverPattern {
    Exact(String),
    /// Matches any name ending with the text after the leading `*`
    Suffix(String),
}

impl NameserverPattern {
    /// Parse a rule. A trailing root dot is dropped, so `ns1.example.com.`
    /// and `*.example.com.` compare like the answers they were copied from.
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim();
        match pattern.strip_prefix('*') {
            Some(suffix) => NameserverPattern::Suffix(suffix.trim_end_matches('.').to_string()),
            None => NameserverPattern::Exact(pattern.trim_end_matches('.').to_string()),
        }
    }

    pub fn matches(&self, nameserver: &str, ignore_case: bool) -> bool {
        let nameserver = nameserver.trim_end_matches('.');
        match (self, ignore_case) {
            (NameserverPattern::Exact(name), false) => nameserver == name,
            (NameserverPattern::Exact(name), true) => nameserver.eq_ignore_ascii_case(name),
            (NameserverPattern::Suffix(suffix), false) => nameserver.ends_with(suffix.as_str()),
            (NameserverPattern::Suffix(suffix), true) => nameserver
                .to_ascii_lowercase()
                .ends_with(&suffix.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for NameserverPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameserverPattern::Exact(name) => f.write_str(name),
            NameserverPattern::Suffix(suffix) => write!(f, "*{}", suffix),
        }
    }
}

/// Criteria a domain must meet to be written to the output
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    a_record_prefix: String,
    patterns: Vec<NameserverPattern>,
    ignore_case: bool,
}

impl MatchCriteria {
    pub fn new<I, S>(a_record_prefix: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            a_record_prefix: a_record_prefix.into(),
            patterns: patterns
                .into_iter()
                .filter(|p| !p.as_ref().trim().is_empty())
                .map(|p| NameserverPattern::parse(p.as_ref()))
                .collect(),
            ignore_case: false,
        }
    }

    /// Compare nameservers without regard to ASCII case
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn a_record_prefix(&self) -> &str {
        &self.a_record_prefix
    }

    pub fn patterns(&self) -> &[NameserverPattern] {
        &self.patterns
    }

    pub fn matches_a(&self, record: &str) -> bool {
        matches_a(record, &self.a_record_prefix)
    }

    /// First nameserver that satisfies any pattern
    pub fn matching_nameserver<'a>(&self, nameservers: &'a [String]) -> Option<&'a str> {
        nameservers
            .iter()
            .find(|ns| {
                self.patterns
                    .iter()
                    .any(|pattern| pattern.matches(ns, self.ignore_case))
            })
            .map(String::as_str)
    }

    pub fn matches_ns(&self, nameservers: &[String]) -> bool {
        self.matching_nameserver(nameservers).is_some()
    }
}

/// True iff `record` starts with `prefix`
pub fn matches_a(record: &str, prefix: &str) -> bool {
    record.starts_with(prefix)
}

/// True iff any nameserver satisfies any pattern, compared literally
pub fn matches_ns<N, P>(nameservers: &[N], patterns: &[P]) -> bool
where
    N: AsRef<str>,
    P: AsRef<str>,
{
    nameservers.iter().any(|ns| {
        patterns
            .iter()
            .any(|p| NameserverPattern::parse(p.as_ref()).matches(ns.as_ref(), false))
    })
}
