//! Domain filter orchestration
//!
//! Each domain is resolved as its own unit of work, with up to `parallel`
//! units in flight. Results are consumed in input order by a single writer,
//! so the output file lists accepted domains in the order they were read,
//! and each line is flushed as soon as the domain's turn comes.

use crate::dns::{query, RecordLookup};
use crate::filter::input::read_domains;
use crate::filter::matcher::MatchCriteria;
use crate::models::{DomainReport, FilterSummary, LookupOutcome, RecordType, Verdict};
use crate::utils::FilterError;
use futures::stream::{self, StreamExt};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Everything a finished run produced besides the output file
#[derive(Debug, Clone, Default)]
pub struct FilterRun {
    pub summary: FilterSummary,
    pub reports: Vec<DomainReport>,
}

impl FilterRun {
    /// Accepted domains in input order
    pub fn accepted(&self) -> impl Iterator<Item = &str> {
        self.reports
            .iter()
            .filter(|r| r.verdict.is_accepted())
            .map(|r| r.domain.as_str())
    }
}

/// Filters domains by A-record prefix and nameserver patterns
pub struct DomainFilter<L> {
    lookup: L,
    criteria: MatchCriteria,
    parallel: usize,
}

impl<L: RecordLookup> DomainFilter<L> {
    pub fn new(lookup: L, criteria: MatchCriteria) -> Self {
        Self {
            lookup,
            criteria,
            parallel: 5,
        }
    }

    /// Maximum number of domains resolved concurrently (at least 1)
    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel.max(1);
        self
    }

    pub fn criteria(&self) -> &MatchCriteria {
        &self.criteria
    }

    /// Decide whether one domain qualifies.
    ///
    /// The NS lookup only happens once the A record has matched.
    pub async fn evaluate(&self, domain: &str) -> Verdict {
        let a_record = match query(&self.lookup, domain, RecordType::A).await {
            LookupOutcome::Failed(e) => {
                return Verdict::LookupFailed {
                    record_type: RecordType::A,
                    reason: e.to_string(),
                }
            }
            LookupOutcome::Resolved(records) => match records.into_iter().next() {
                Some(record) => record,
                None => return Verdict::NoARecord,
            },
        };

        if !self.criteria.matches_a(&a_record) {
            tracing::debug!(
                "Skipping {}: A record {} does not start with {}",
                domain,
                a_record,
                self.criteria.a_record_prefix()
            );
            return Verdict::ARecordMismatch { a_record };
        }

        let nameservers = match query(&self.lookup, domain, RecordType::Ns).await {
            LookupOutcome::Failed(e) => {
                return Verdict::LookupFailed {
                    record_type: RecordType::Ns,
                    reason: e.to_string(),
                }
            }
            LookupOutcome::Resolved(records) if records.is_empty() => {
                return Verdict::NoNameservers
            }
            LookupOutcome::Resolved(records) => records,
        };

        match self.criteria.matching_nameserver(&nameservers) {
            Some(hit) => {
                tracing::info!("Matching NS found: {}", hit);
                Verdict::Accepted {
                    nameserver: hit.to_string(),
                    a_record,
                }
            }
            None => Verdict::NameserverMismatch { nameservers },
        }
    }

    /// Filter `domains`, writing each accepted domain as a line to `sink`
    pub async fn run<W>(&self, domains: &[String], sink: &mut W) -> std::io::Result<FilterRun>
    where
        W: AsyncWrite + Unpin,
    {
        let total = domains.len();
        let mut run = FilterRun {
            summary: FilterSummary::new(total),
            reports: Vec::with_capacity(total),
        };

        let mut reports = stream::iter(domains.iter().enumerate())
            .map(|(i, domain)| async move {
                let index = i + 1;
                tracing::info!("Processing {}/{}: {}", index, total, domain);
                let verdict = self.evaluate(domain).await;
                DomainReport {
                    index,
                    domain: domain.clone(),
                    verdict,
                }
            })
            .buffered(self.parallel);

        while let Some(report) = reports.next().await {
            if report.verdict.is_accepted() {
                sink.write_all(report.domain.as_bytes()).await?;
                sink.write_all(b"\n").await?;
                sink.flush().await?;
            }
            run.summary.record(&report.verdict);
            run.reports.push(report);
        }

        Ok(run)
    }

    /// Read domains from `input`, filter them and write the result to `output`.
    ///
    /// The output file is only created once the input has been read, and is
    /// truncated if it already exists.
    pub async fn run_files(&self, input: &Path, output: &Path) -> Result<FilterRun, FilterError> {
        let domains = read_domains(input).await?;
        tracing::info!("Loaded {} domains from {}", domains.len(), input.display());

        let mut file =
            tokio::fs::File::create(output)
                .await
                .map_err(|e| FilterError::OutputUnwritable {
                    path: output.display().to_string(),
                    message: e.to_string(),
                })?;

        self.run(&domains, &mut file)
            .await
            .map_err(|e| FilterError::WriteFailed {
                path: output.display().to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::LookupError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers every A query with one address and every NS query with one name
    struct OneAnswer {
        a: LookupOutcome,
        ns: LookupOutcome,
        calls: Mutex<Vec<RecordType>>,
    }

    impl OneAnswer {
        fn new(a: LookupOutcome, ns: LookupOutcome) -> Self {
            Self {
                a,
                ns,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RecordLookup for OneAnswer {
        async fn lookup(&self, _domain: &str, record_type: RecordType) -> LookupOutcome {
            self.calls.lock().unwrap().push(record_type);
            match record_type {
                RecordType::A => self.a.clone(),
                RecordType::Ns => self.ns.clone(),
            }
        }
    }

    fn resolved(records: &[&str]) -> LookupOutcome {
        LookupOutcome::Resolved(records.iter().map(|s| s.to_string()).collect())
    }

    fn criteria() -> MatchCriteria {
        MatchCriteria::new("5.249", ["ns01.no.brand.one.com", "*.uniweb.no"])
    }

    #[tokio::test]
    async fn test_accepted() {
        let filter = DomainFilter::new(
            OneAnswer::new(resolved(&["5.249.1.1"]), resolved(&["dns1.uniweb.no"])),
            criteria(),
        );
        assert_eq!(
            filter.evaluate("a.com").await,
            Verdict::Accepted {
                a_record: "5.249.1.1".into(),
                nameserver: "dns1.uniweb.no".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_a_mismatch_skips_ns_lookup() {
        let lookup = OneAnswer::new(resolved(&["1.2.3.4"]), resolved(&["dns1.uniweb.no"]));
        let filter = DomainFilter::new(lookup, criteria());

        let verdict = filter.evaluate("b.com").await;
        assert!(matches!(verdict, Verdict::ARecordMismatch { .. }));
        assert_eq!(*filter.lookup.calls.lock().unwrap(), vec![RecordType::A]);
    }

    #[tokio::test]
    async fn test_failed_a_lookup_skips_ns_lookup() {
        let failure = LookupOutcome::Failed(LookupError::CommandFailed {
            command: "dig +short A c.com".into(),
            code: Some(9),
            stderr: "connection timed out".into(),
        });
        let lookup = OneAnswer::new(failure, resolved(&["ns01.no.brand.one.com"]));
        let filter = DomainFilter::new(lookup, criteria());

        let verdict = filter.evaluate("c.com").await;
        assert!(matches!(
            verdict,
            Verdict::LookupFailed {
                record_type: RecordType::A,
                ..
            }
        ));
        assert_eq!(*filter.lookup.calls.lock().unwrap(), vec![RecordType::A]);
    }

    #[tokio::test]
    async fn test_empty_nameservers() {
        let filter = DomainFilter::new(
            OneAnswer::new(resolved(&["5.249.9.9"]), resolved(&[])),
            criteria(),
        );
        assert_eq!(filter.evaluate("d.com").await, Verdict::NoNameservers);
    }

    #[tokio::test]
    async fn test_run_writes_lines() {
        let filter = DomainFilter::new(
            OneAnswer::new(resolved(&["5.249.1.1"]), resolved(&["ns01.no.brand.one.com"])),
            criteria(),
        );
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        let mut sink: Vec<u8> = Vec::new();

        let run = filter.run(&domains, &mut sink).await.unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "a.com\nb.com\n");
        assert_eq!(run.summary.accepted, 2);
        assert_eq!(run.accepted().collect::<Vec<_>>(), vec!["a.com", "b.com"]);
    }
}
