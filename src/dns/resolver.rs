//! Native DNS backend built on hickory-resolver

use crate::dns::lookup::{is_queryable, RecordLookup};
use crate::models::{LookupOutcome, RecordType};
use crate::utils::LookupError;
use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::Resolver;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Type alias for the Tokio async resolver
type TokioResolver = Resolver<TokioConnectionProvider>;

/// DNS resolver wrapper answering A and NS queries
pub struct HickoryLookup {
    resolver: TokioResolver,
    timeout: Duration,
}

impl HickoryLookup {
    /// Build a resolver from the system configuration (`/etc/resolv.conf`)
    pub fn system(timeout: Duration) -> Result<Self, LookupError> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| LookupError::Setup {
                message: format!("Failed to create system resolver: {}", e),
            })?
            .build();

        Ok(Self { resolver, timeout })
    }

    /// Build a resolver that only asks the given servers over UDP
    pub fn with_servers(servers: &[IpAddr], timeout: Duration) -> Self {
        let mut config = ResolverConfig::new();
        for server in servers {
            let socket_addr = SocketAddr::new(*server, 53);
            config.add_name_server(NameServerConfig::new(socket_addr, Protocol::Udp));
        }

        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build();

        Self { resolver, timeout }
    }
}

#[async_trait]
impl RecordLookup for HickoryLookup {
    async fn lookup(&self, domain: &str, record_type: RecordType) -> LookupOutcome {
        if !is_queryable(domain) {
            return LookupOutcome::Failed(LookupError::InvalidDomain {
                domain: domain.to_string(),
            });
        }

        let result = match record_type {
            RecordType::A => tokio::time::timeout(self.timeout, self.resolver.ipv4_lookup(domain))
                .await
                .map(|r| {
                    r.map(|lookup| lookup.iter().map(|a| a.to_string()).collect::<Vec<_>>())
                }),
            RecordType::Ns => tokio::time::timeout(self.timeout, self.resolver.ns_lookup(domain))
                .await
                .map(|r| {
                    r.map(|lookup| {
                        lookup
                            .iter()
                            .map(|ns| ns.to_string().trim_end_matches('.').to_string())
                            .collect::<Vec<_>>()
                    })
                }),
        };

        match result {
            Ok(Ok(records)) => LookupOutcome::Resolved(records),
            // NXDOMAIN and NODATA are answers, not failures
            Ok(Err(e)) if e.is_no_records_found() => LookupOutcome::Resolved(Vec::new()),
            Ok(Err(e)) => LookupOutcome::Failed(LookupError::Resolver {
                domain: domain.to_string(),
                record_type,
                message: e.to_string(),
            }),
            Err(_) => LookupOutcome::Failed(LookupError::Timeout {
                domain: domain.to_string(),
                record_type,
                timeout: self.timeout,
            }),
        }
    }
}
