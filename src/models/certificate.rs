//! Decoded certificate and CSR types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fields shown for a decoded X.509 certificate
#[derive(Debug, Clone, Serialize)]
pub struct DecodedCertificate {
    pub common_name: Option<String>,
    pub subject_alt_names: Vec<String>,
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// SHA-256 over the DER encoding, colon separated
    pub fingerprint: String,
}

impl DecodedCertificate {
    pub fn days_until_expiry(&self) -> i64 {
        (self.not_after - Utc::now()).num_days()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.not_after
    }
}

/// Fields shown for a decoded certificate signing request
#[derive(Debug, Clone, Serialize)]
pub struct DecodedCsr {
    pub common_name: Option<String>,
    pub subject: String,
    pub subject_alt_names: Vec<String>,
}

/// Either kind of decoded PEM object
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoded {
    Certificate(DecodedCertificate),
    Csr(DecodedCsr),
}
