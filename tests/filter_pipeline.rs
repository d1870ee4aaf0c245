//! Integration tests for the domain filter pipeline

use async_trait::async_trait;
use ssl_toolbox::dns::RecordLookup;
use ssl_toolbox::filter::{DomainFilter, MatchCriteria};
use ssl_toolbox::models::{LookupOutcome, RecordType, Verdict};
use ssl_toolbox::utils::{FilterError, LookupError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Answers from a fixed table, recording every query it receives
#[derive(Default)]
struct ScriptedLookup {
    answers: HashMap<(String, RecordType), (LookupOutcome, Duration)>,
    calls: Mutex<Vec<(String, RecordType)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedLookup {
    fn new() -> Self {
        Self::default()
    }

    fn answer(mut self, domain: &str, record_type: RecordType, records: &[&str]) -> Self {
        self.answers.insert(
            (domain.to_string(), record_type),
            (
                LookupOutcome::Resolved(records.iter().map(|r| r.to_string()).collect()),
                Duration::ZERO,
            ),
        );
        self
    }

    fn fail(mut self, domain: &str, record_type: RecordType) -> Self {
        self.answers.insert(
            (domain.to_string(), record_type),
            (
                LookupOutcome::Failed(LookupError::CommandFailed {
                    command: format!("dig +short {} {}", record_type, domain),
                    code: Some(9),
                    stderr: "connection timed out; no servers could be reached".to_string(),
                }),
                Duration::ZERO,
            ),
        );
        self
    }

    fn delay(mut self, domain: &str, record_type: RecordType, delay: Duration) -> Self {
        if let Some(entry) = self.answers.get_mut(&(domain.to_string(), record_type)) {
            entry.1 = delay;
        }
        self
    }

    fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }

    fn queried(&self, domain: &str, record_type: RecordType) -> bool {
        self.calls()
            .iter()
            .any(|(d, t)| d == domain && *t == record_type)
    }
}

#[async_trait]
impl RecordLookup for ScriptedLookup {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((domain.to_string(), record_type));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (outcome, delay) = self
            .answers
            .get(&(domain.to_string(), record_type))
            .cloned()
            .unwrap_or((LookupOutcome::Resolved(Vec::new()), Duration::ZERO));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

fn default_criteria() -> MatchCriteria {
    MatchCriteria::new(
        "5.249",
        [
            "ns01.no.brand.one.com",
            "ns02.no.brand.one.com",
            "*.uniweb.no",
            "*.fastname.no",
        ],
    )
}

fn domains(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

async fn run_to_string<L: RecordLookup>(
    filter: &DomainFilter<L>,
    names: &[&str],
) -> (String, ssl_toolbox::FilterRun) {
    let mut sink = Vec::new();
    let run = filter.run(&domains(names), &mut sink).await.unwrap();
    (String::from_utf8(sink).unwrap(), run)
}

#[tokio::test]
async fn test_prefix_and_nameserver_must_both_match() {
    let lookup = ScriptedLookup::new()
        .answer("a.com", RecordType::A, &["5.249.1.1"])
        .answer("a.com", RecordType::Ns, &["ns01.no.brand.one.com"])
        .answer("b.com", RecordType::A, &["1.2.3.4"])
        .answer("b.com", RecordType::Ns, &["ns01.no.brand.one.com"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (output, run) = run_to_string(&filter, &["a.com", "b.com"]).await;

    assert_eq!(output, "a.com\n");
    assert_eq!(run.summary.total, 2);
    assert_eq!(run.summary.accepted, 1);
    assert_eq!(run.summary.a_record_mismatch, 1);
}

#[tokio::test]
async fn test_nameserver_lookup_skipped_after_a_mismatch() {
    let lookup = ScriptedLookup::new()
        .answer("b.com", RecordType::A, &["1.2.3.4"])
        .answer("b.com", RecordType::Ns, &["ns01.no.brand.one.com"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let verdict = filter.evaluate("b.com").await;

    assert_eq!(
        verdict,
        Verdict::ARecordMismatch {
            a_record: "1.2.3.4".to_string()
        }
    );
}

#[tokio::test]
async fn test_short_circuit_visible_in_call_log() {
    let lookup = std::sync::Arc::new(
        ScriptedLookup::new()
            .answer("a.com", RecordType::A, &["5.249.1.1"])
            .answer("a.com", RecordType::Ns, &["ns01.no.brand.one.com"])
            .answer("b.com", RecordType::A, &["1.2.3.4"])
            .answer("c.com", RecordType::A, &[]),
    );
    let filter = DomainFilter::new(lookup.clone(), default_criteria());

    let mut sink = Vec::new();
    filter
        .run(&domains(&["a.com", "b.com", "c.com"]), &mut sink)
        .await
        .unwrap();

    assert!(lookup.queried("a.com", RecordType::Ns));
    assert!(lookup.queried("b.com", RecordType::A));
    assert!(!lookup.queried("b.com", RecordType::Ns));
    assert!(!lookup.queried("c.com", RecordType::Ns));
    assert_eq!(lookup.calls().len(), 4);
}

#[tokio::test]
async fn test_wildcard_nameservers() {
    let lookup = ScriptedLookup::new()
        .answer("c.com", RecordType::A, &["5.249.9.9"])
        .answer("c.com", RecordType::Ns, &["ns3.uniweb.no"])
        .answer("d.com", RecordType::A, &["5.249.9.9"])
        .answer("d.com", RecordType::Ns, &["uniweb.no"])
        .answer("e.com", RecordType::A, &["5.249.9.9"])
        .answer("e.com", RecordType::Ns, &["dns.example.net", "a.b.fastname.no"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (output, run) = run_to_string(&filter, &["c.com", "d.com", "e.com"]).await;

    assert_eq!(output, "c.com\ne.com\n");
    assert_eq!(run.summary.nameserver_mismatch, 1);
    assert_eq!(
        run.reports[2].verdict,
        Verdict::Accepted {
            a_record: "5.249.9.9".to_string(),
            nameserver: "a.b.fastname.no".to_string(),
        }
    );
}

#[tokio::test]
async fn test_only_first_a_record_is_checked() {
    let lookup = ScriptedLookup::new()
        .answer("multi.com", RecordType::A, &["1.2.3.4", "5.249.1.1"])
        .answer("multi.com", RecordType::Ns, &["ns01.no.brand.one.com"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (output, _) = run_to_string(&filter, &["multi.com"]).await;
    assert_eq!(output, "");
}

#[tokio::test]
async fn test_lookup_failures_do_not_abort_the_run() {
    let lookup = ScriptedLookup::new()
        .fail("broken.com", RecordType::A)
        .answer("halfway.com", RecordType::A, &["5.249.0.1"])
        .fail("halfway.com", RecordType::Ns)
        .answer("ok.com", RecordType::A, &["5.249.0.2"])
        .answer("ok.com", RecordType::Ns, &["ns02.no.brand.one.com"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (output, run) = run_to_string(&filter, &["broken.com", "halfway.com", "ok.com"]).await;

    assert_eq!(output, "ok.com\n");
    assert_eq!(run.summary.lookup_failures, 2);
    assert!(matches!(
        run.reports[0].verdict,
        Verdict::LookupFailed {
            record_type: RecordType::A,
            ..
        }
    ));
    assert!(matches!(
        run.reports[1].verdict,
        Verdict::LookupFailed {
            record_type: RecordType::Ns,
            ..
        }
    ));
}

#[tokio::test]
async fn test_empty_answers_are_unresolved() {
    let lookup = ScriptedLookup::new()
        .answer("nothing.com", RecordType::A, &[])
        .answer("nons.com", RecordType::A, &["5.249.3.3"])
        .answer("nons.com", RecordType::Ns, &[]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (output, run) = run_to_string(&filter, &["nothing.com", "nons.com"]).await;

    assert_eq!(output, "");
    assert_eq!(run.reports[0].verdict, Verdict::NoARecord);
    assert_eq!(run.reports[1].verdict, Verdict::NoNameservers);
    assert_eq!(run.summary.unresolved, 2);
}

#[tokio::test]
async fn test_empty_input_yields_empty_output() {
    let filter = DomainFilter::new(ScriptedLookup::new(), default_criteria());

    let (output, run) = run_to_string(&filter, &[]).await;

    assert_eq!(output, "");
    assert_eq!(run.summary.total, 0);
    assert!(run.reports.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_output_keeps_input_order_under_reversed_latency() {
    let names = ["one.com", "two.com", "three.com", "four.com"];
    let mut lookup = ScriptedLookup::new();
    for (i, name) in names.iter().enumerate() {
        let slower = Duration::from_millis(100 * (names.len() - i) as u64);
        lookup = lookup
            .answer(name, RecordType::A, &["5.249.1.1"])
            .delay(name, RecordType::A, slower)
            .answer(name, RecordType::Ns, &["ns01.no.brand.one.com"]);
    }
    let filter = DomainFilter::new(lookup, default_criteria()).with_parallel(4);

    let (output, run) = run_to_string(&filter, &names).await;

    assert_eq!(output, "one.com\ntwo.com\nthree.com\nfour.com\n");
    let indices: Vec<usize> = run.reports.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    assert_eq!(run.accepted().collect::<Vec<_>>(), names.to_vec());
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_lookups_bounded_by_parallel() {
    let names: Vec<String> = (0..12).map(|i| format!("d{}.com", i)).collect();
    let mut lookup = ScriptedLookup::new();
    for name in &names {
        lookup = lookup
            .answer(name, RecordType::A, &["5.249.1.1"])
            .delay(name, RecordType::A, Duration::from_millis(50))
            .answer(name, RecordType::Ns, &["ns.other.net"])
            .delay(name, RecordType::Ns, Duration::from_millis(50));
    }
    let lookup = std::sync::Arc::new(lookup);
    let filter = DomainFilter::new(lookup.clone(), default_criteria()).with_parallel(3);

    let mut sink = Vec::new();
    let run = filter.run(&names, &mut sink).await.unwrap();

    assert_eq!(run.summary.nameserver_mismatch, 12);
    assert_eq!(lookup.max_in_flight.load(Ordering::SeqCst), 3);
    assert_eq!(lookup.in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_parallel_zero_runs_serially() {
    let names: Vec<String> = (0..4).map(|i| format!("s{}.com", i)).collect();
    let mut lookup = ScriptedLookup::new();
    for name in &names {
        lookup = lookup
            .answer(name, RecordType::A, &["5.249.1.1"])
            .delay(name, RecordType::A, Duration::from_millis(10));
    }
    let lookup = std::sync::Arc::new(lookup);
    let filter = DomainFilter::new(lookup.clone(), default_criteria()).with_parallel(0);

    let mut sink = Vec::new();
    filter.run(&names, &mut sink).await.unwrap();

    assert_eq!(lookup.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let lookup = ScriptedLookup::new()
        .answer("a.com", RecordType::A, &["5.249.1.1"])
        .answer("a.com", RecordType::Ns, &["x.fastname.no"])
        .answer("b.com", RecordType::A, &["5.2491.0.1"])
        .answer("b.com", RecordType::Ns, &["x.fastname.no"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let (first, _) = run_to_string(&filter, &["a.com", "b.com"]).await;
    let (second, _) = run_to_string(&filter, &["a.com", "b.com"]).await;

    assert_eq!(first, second);
    // Plain string prefix, not an octet comparison
    assert_eq!(first, "a.com\nb.com\n");
}

#[tokio::test]
async fn test_run_files_reads_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("domains.txt");
    let output = dir.path().join("matches.txt");
    std::fs::write(&input, "# candidates\n  a.com  \n\nb.com\n").unwrap();
    std::fs::write(&output, "stale.com\nstale2.com\n").unwrap();

    let lookup = ScriptedLookup::new()
        .answer("a.com", RecordType::A, &["5.249.1.1"])
        .answer("a.com", RecordType::Ns, &["ns01.no.brand.one.com"])
        .answer("b.com", RecordType::A, &["1.2.3.4"]);
    let filter = DomainFilter::new(lookup, default_criteria());

    let run = filter.run_files(&input, &output).await.unwrap();

    assert_eq!(run.summary.total, 2);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "a.com\n");
}

#[tokio::test]
async fn test_run_files_empty_input_creates_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, "").unwrap();

    let filter = DomainFilter::new(ScriptedLookup::new(), default_criteria());
    filter.run_files(&input, &output).await.unwrap();

    assert!(output.exists());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn test_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.txt");
    let output = dir.path().join("out.txt");

    let lookup = std::sync::Arc::new(ScriptedLookup::new());
    let filter = DomainFilter::new(lookup.clone(), default_criteria());
    let err = filter.run_files(&input, &output).await.unwrap_err();

    assert!(matches!(err, FilterError::InputUnavailable { .. }));
    assert!(!output.exists());
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn test_unwritable_output_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("domains.txt");
    let output = dir.path().join("no-such-dir").join("out.txt");
    std::fs::write(&input, "a.com\n").unwrap();

    let lookup = std::sync::Arc::new(ScriptedLookup::new());
    let filter = DomainFilter::new(lookup.clone(), default_criteria());
    let err = filter.run_files(&input, &output).await.unwrap_err();

    assert!(matches!(err, FilterError::OutputUnwritable { .. }));
    assert!(lookup.calls().is_empty());
}
