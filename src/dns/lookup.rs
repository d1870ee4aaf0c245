//! The lookup seam shared by the DNS backends

use crate::models::{LookupOutcome, RecordType};
use async_trait::async_trait;
use std::sync::Arc;

/// A source of A and NS records.
///
/// Implementations never return errors directly: a lookup that cannot
/// complete is reported as [`LookupOutcome::Failed`].
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome;
}

#[async_trait]
impl<T: RecordLookup + ?Sized> RecordLookup for Arc<T> {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome {
        (**self).lookup(domain, record_type).await
    }
}

#[async_trait]
impl<T: RecordLookup + ?Sized> RecordLookup for Box<T> {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome {
        (**self).lookup(domain, record_type).await
    }
}

/// Run a lookup and emit the per-query log line.
///
/// Successful answers log at `info`. Failures and empty answers log at
/// `error`, matching how the batch is audited afterwards.
pub async fn query<L: RecordLookup + ?Sized>(
    lookup: &L,
    domain: &str,
    record_type: RecordType,
) -> LookupOutcome {
    let outcome = lookup.lookup(domain, record_type).await;

    match &outcome {
        LookupOutcome::Resolved(records) if records.is_empty() => {
            tracing::error!("No {} records returned for {}", record_type, domain);
        }
        LookupOutcome::Resolved(records) => match record_type {
            RecordType::A => tracing::info!("A record for {}: {}", domain, records[0]),
            RecordType::Ns => tracing::info!("Nameservers for {}: {:?}", domain, records),
        },
        LookupOutcome::Failed(e) => {
            tracing::error!("Failed to fetch {} records for {}: {}", record_type, domain, e);
        }
    }

    outcome
}

/// Reject names that an external tool would parse as an option
pub(crate) fn is_queryable(domain: &str) -> bool {
    !domain.is_empty() && !domain.starts_with('-') && !domain.starts_with('+')
}
