//! Certificate and CSR decoding
//!
//! Analyzes X.509 certificates and PKCS#10 requests using x509-parser.

use crate::cert_ops::reader::{parse_pem_blocks, CERTIFICATE_TAG, CSR_TAGS};
use crate::models::{Decoded, DecodedCertificate, DecodedCsr};
use crate::utils::CertFileError;
use chrono::{DateTime, TimeZone, Utc};
use sha2::Digest;
use x509_parser::prelude::*;

/// Decode the first certificate or CSR found in PEM text
pub fn decode_pem(data: &[u8]) -> Result<Decoded, CertFileError> {
    let blocks = parse_pem_blocks(data)?;

    for block in &blocks {
        if block.tag() == CERTIFICATE_TAG {
            return decode_certificate(block.contents()).map(Decoded::Certificate);
        }
        if CSR_TAGS.contains(&block.tag()) {
            return decode_csr(block.contents()).map(Decoded::Csr);
        }
    }

    Err(CertFileError::MissingBlock {
        expected: "CERTIFICATE or CERTIFICATE REQUEST".to_string(),
    })
}

/// Parse a single DER-encoded certificate
pub fn decode_certificate(der: &[u8]) -> Result<DecodedCertificate, CertFileError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| CertFileError::ParseError {
        kind: "certificate".to_string(),
        message: format!("{:?}", e),
    })?;

    let subject_alt_names = match cert.subject_alternative_name() {
        Ok(Some(san)) => general_names(&san.value.general_names),
        _ => Vec::new(),
    };

    let mut hasher = sha2::Sha256::new();
    hasher.update(der);
    let fingerprint = hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":");

    Ok(DecodedCertificate {
        common_name: common_name(cert.subject()),
        subject_alt_names,
        issuer: cert.issuer().to_string(),
        not_before: asn1_time_to_datetime(cert.validity().not_before)?,
        not_after: asn1_time_to_datetime(cert.validity().not_after)?,
        fingerprint,
    })
}

/// Parse a single DER-encoded certificate signing request
pub fn decode_csr(der: &[u8]) -> Result<DecodedCsr, CertFileError> {
    let (_, csr) =
        X509CertificationRequest::from_der(der).map_err(|e| CertFileError::ParseError {
            kind: "certificate request".to_string(),
            message: format!("{:?}", e),
        })?;

    let mut subject_alt_names = Vec::new();
    if let Some(extensions) = csr.requested_extensions() {
        for extension in extensions {
            if let ParsedExtension::SubjectAlternativeName(san) = extension {
                subject_alt_names.extend(general_names(&san.general_names));
            }
        }
    }

    let subject = &csr.certification_request_info.subject;

    Ok(DecodedCsr {
        common_name: common_name(subject),
        subject: subject.to_string(),
        subject_alt_names,
    })
}

fn common_name(name: &X509Name) -> Option<String> {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string)
}

/// DNS names and IP addresses from a SAN extension
fn general_names(names: &[GeneralName]) -> Vec<String> {
    let mut sans = Vec::new();

    for name in names {
        match name {
            GeneralName::DNSName(dns) => sans.push(dns.to_string()),
            GeneralName::IPAddress(ip) => {
                if ip.len() == 4 {
                    sans.push(format!("{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]));
                } else if ip.len() == 16 {
                    let parts: Vec<String> = ip
                        .chunks(2)
                        .map(|c| format!("{:02x}{:02x}", c[0], c[1]))
                        .collect();
                    sans.push(parts.join(":"));
                }
            }
            _ => {}
        }
    }

    sans
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, CertFileError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or_else(|| CertFileError::ParseError {
            kind: "certificate".to_string(),
            message: "Invalid timestamp in certificate".to_string(),
        })
}
