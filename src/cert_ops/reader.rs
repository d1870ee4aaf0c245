//! PEM reading helpers
//!
//! Loads PEM blocks from files or pasted text and picks out certificates,
//! CSRs and private keys.

use crate::utils::CertFileError;
use std::io::BufRead;
use std::path::Path;

pub const CERTIFICATE_TAG: &str = "CERTIFICATE";
pub const CSR_TAGS: [&str; 2] = ["CERTIFICATE REQUEST", "NEW CERTIFICATE REQUEST"];
pub const PKCS8_KEY_TAG: &str = "PRIVATE KEY";
pub const RSA_KEY_TAG: &str = "RSA PRIVATE KEY";
pub const EC_KEY_TAG: &str = "EC PRIVATE KEY";

/// Read a whole file, mapping failures to `CertFileError`
pub fn read_file(path: &Path) -> Result<Vec<u8>, CertFileError> {
    std::fs::read(path).map_err(|e| CertFileError::FileReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Parse every PEM block in `data`
pub fn parse_pem_blocks(data: &[u8]) -> Result<Vec<::pem::Pem>, CertFileError> {
    let blocks = ::pem::parse_many(data).map_err(|e| CertFileError::PemError {
        message: e.to_string(),
    })?;

    if blocks.is_empty() {
        return Err(CertFileError::PemError {
            message: "no PEM blocks found".to_string(),
        });
    }

    Ok(blocks)
}

/// Read raw PEM blocks of any type from a file
pub fn read_pem_blocks(path: &Path) -> Result<Vec<::pem::Pem>, CertFileError> {
    let data = read_file(path)?;
    parse_pem_blocks(&data).map_err(|e| match e {
        CertFileError::PemError { message } => CertFileError::FileReadError {
            path: path.display().to_string(),
            message: format!("Failed to parse PEM: {}", message),
        },
        other => other,
    })
}

/// DER bytes of every CERTIFICATE block, in file order
pub fn certificates(blocks: &[::pem::Pem]) -> Vec<Vec<u8>> {
    blocks
        .iter()
        .filter(|p| p.tag() == CERTIFICATE_TAG)
        .map(|p| p.contents().to_vec())
        .collect()
}

/// The private key in `blocks` as PKCS#8 DER.
///
/// PKCS#1 RSA and SEC1 EC (P-256, P-384) keys are converted. Encrypted and
/// other key types are rejected.
pub fn private_key(blocks: &[::pem::Pem]) -> Result<Vec<u8>, CertFileError> {
    for block in blocks {
        match block.tag() {
            PKCS8_KEY_TAG => return Ok(block.contents().to_vec()),
            RSA_KEY_TAG => return pkcs1_to_pkcs8(block.contents()),
            EC_KEY_TAG => return sec1_to_pkcs8(block.contents()),
            _ => continue,
        }
    }

    match blocks.iter().find(|p| p.tag().ends_with("PRIVATE KEY")) {
        Some(other) => Err(CertFileError::UnsupportedKey {
            tag: other.tag().to_string(),
        }),
        None => Err(CertFileError::MissingBlock {
            expected: PKCS8_KEY_TAG.to_string(),
        }),
    }
}

fn pkcs1_to_pkcs8(der: &[u8]) -> Result<Vec<u8>, CertFileError> {
    use rsa::pkcs1::DecodeRsaPrivateKey;
    use rsa::pkcs8::EncodePrivateKey;

    let key = rsa::RsaPrivateKey::from_pkcs1_der(der).map_err(|e| CertFileError::ParseError {
        kind: "PKCS#1 RSA key".to_string(),
        message: e.to_string(),
    })?;

    key.to_pkcs8_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CertFileError::ParseError {
            kind: "PKCS#1 RSA key".to_string(),
            message: format!("Failed to encode as PKCS#8: {}", e),
        })
}

fn sec1_to_pkcs8(der: &[u8]) -> Result<Vec<u8>, CertFileError> {
    use p256::pkcs8::EncodePrivateKey;

    let encoded = if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
        key.to_pkcs8_der()
    } else if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
        key.to_pkcs8_der()
    } else {
        return Err(CertFileError::ParseError {
            kind: "SEC1 EC key".to_string(),
            message: "Unsupported EC curve (only P-256 and P-384 are supported)".to_string(),
        });
    };

    encoded
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| CertFileError::ParseError {
            kind: "SEC1 EC key".to_string(),
            message: format!("Failed to encode as PKCS#8: {}", e),
        })
}

/// Read pasted PEM text until the first `-----END ...-----` line or EOF
pub fn read_pasted_pem<R: BufRead>(reader: R) -> std::io::Result<String> {
    let mut text = String::new();

    for line in reader.lines() {
        let line = line?;
        let done = line.trim_end().starts_with("-----END ") && line.trim_end().ends_with("-----");
        text.push_str(&line);
        text.push('\n');
        if done {
            break;
        }
    }

    Ok(text)
}

/// Read one pasted section, up to a line containing only `END` or EOF.
///
/// The reader is borrowed so several sections can follow each other on the
/// same input. An immediate `END` yields an empty string.
pub fn read_pasted_section<R: BufRead>(reader: &mut R) -> std::io::Result<String> {
    let mut text = String::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line == "END" {
            break;
        }
        text.push_str(line);
        text.push('\n');
    }

    Ok(text)
}
