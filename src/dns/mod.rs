//! DNS module for the domain filter
//!
//! This module provides:
//! - The `RecordLookup` seam used by the filter pipeline
//! - A `dig` subprocess backend
//! - A native hickory-resolver backend

pub mod dig;
pub mod lookup;
pub mod resolver;

pub use dig::{parse_dig_output, DigLookup};
pub use lookup::{query, RecordLookup};
pub use resolver::HickoryLookup;

use crate::config::{FilterSettings, LookupBackend};

/// Build the lookup backend selected in the settings
pub fn backend_from_settings(settings: &FilterSettings) -> crate::Result<Box<dyn RecordLookup>> {
    let timeout = settings.lookup_timeout();

    match settings.backend {
        LookupBackend::Dig => Ok(Box::new(
            DigLookup::new()
                .with_binary(settings.dig_path.clone())
                .with_timeout(timeout),
        )),
        LookupBackend::Native if settings.resolvers.is_empty() => {
            Ok(Box::new(HickoryLookup::system(timeout)?))
        }
        LookupBackend::Native => Ok(Box::new(HickoryLookup::with_servers(
            &settings.resolvers,
            timeout,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LookupOutcome, RecordType};

    #[tokio::test]
    async fn test_dig_backend_uses_configured_binary() {
        let settings = FilterSettings {
            backend: LookupBackend::Dig,
            dig_path: "/nonexistent/dig".to_string(),
            ..FilterSettings::default()
        };

        let lookup = backend_from_settings(&settings).unwrap();
        match lookup.lookup("a.com", RecordType::A).await {
            LookupOutcome::Failed(e) => assert!(e.to_string().contains("/nonexistent/dig")),
            other => panic!("expected spawn failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_native_backend_with_explicit_resolvers() {
        let settings = FilterSettings {
            backend: LookupBackend::Native,
            resolvers: vec![std::net::IpAddr::from([127, 0, 0, 1])],
            ..FilterSettings::default()
        };

        assert!(backend_from_settings(&settings).is_ok());
    }
}
