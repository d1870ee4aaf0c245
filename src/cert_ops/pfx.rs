//! PFX (PKCS#12) packing and extraction

use crate::cert_ops::reader::{certificates, parse_pem_blocks, private_key, read_file};
use crate::utils::CertFileError;
use std::path::{Path, PathBuf};

/// Contents pulled out of a PFX archive
#[derive(Debug, Clone, Default)]
pub struct ExtractedPfx {
    /// Leaf certificate (DER)
    pub certificate: Option<Vec<u8>>,
    /// Remaining chain certificates (DER), in archive order
    pub ca_chain: Vec<Vec<u8>>,
    /// PKCS#8 private key (DER)
    pub private_key: Option<Vec<u8>>,
}

/// Build a PKCS#12 archive from PEM inputs.
///
/// The first certificate of `cert_pem` is the leaf; every certificate in
/// `ca_pems` follows it in the chain.
pub fn pack_pfx(
    cert_pem: &[u8],
    key_pem: &[u8],
    ca_pems: &[Vec<u8>],
    password: &str,
) -> Result<Vec<u8>, CertFileError> {
    let cert_ders = certificates(&parse_pem_blocks(cert_pem)?);
    let leaf = cert_ders
        .first()
        .cloned()
        .ok_or_else(|| CertFileError::MissingBlock {
            expected: "CERTIFICATE".to_string(),
        })?;

    let key = private_key(&parse_pem_blocks(key_pem)?)?;

    let mut chain_ders = vec![leaf.clone()];
    for ca_pem in ca_pems {
        chain_ders.extend(certificates(&parse_pem_blocks(ca_pem)?));
    }

    let certs = chain_ders
        .iter()
        .map(|der| p12_keystore::Certificate::from_der(der))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CertFileError::Pkcs12Error {
            message: format!("Failed to parse certificate for PKCS#12: {}", e),
        })?;

    let local_key_id = {
        use sha2::Digest;
        let mut hasher = sha2::Sha256::new();
        hasher.update(&leaf);
        hasher.finalize().to_vec()
    };

    let chain = p12_keystore::PrivateKeyChain::new(key, &local_key_id, certs);

    let mut keystore = p12_keystore::KeyStore::new();
    keystore.add_entry("cert", p12_keystore::KeyStoreEntry::PrivateKeyChain(chain));

    keystore
        .writer(password)
        .write()
        .map_err(|e| CertFileError::Pkcs12Error {
            message: format!("Failed to serialize PKCS#12: {}", e),
        })
}

/// Pack PEM files into `output`
pub fn pack_pfx_files(
    cert_path: &Path,
    key_path: &Path,
    ca_paths: &[PathBuf],
    password: &str,
    output: &Path,
) -> Result<(), CertFileError> {
    let cert_pem = read_file(cert_path)?;
    let key_pem = read_file(key_path)?;
    let ca_pems = ca_paths
        .iter()
        .map(|p| read_file(p))
        .collect::<Result<Vec<_>, _>>()?;

    let pfx = pack_pfx(&cert_pem, &key_pem, &ca_pems, password)?;
    write_pfx(output, &pfx)
}

pub fn write_pfx(output: &Path, pfx: &[u8]) -> Result<(), CertFileError> {
    std::fs::write(output, pfx).map_err(|e| CertFileError::FileWriteError {
        path: output.display().to_string(),
        message: e.to_string(),
    })
}

/// Split a PKCS#12 archive into leaf, chain and key
pub fn extract_pfx(data: &[u8], password: &str) -> Result<ExtractedPfx, CertFileError> {
    let keystore = p12_keystore::KeyStore::from_pkcs12(data, password).map_err(|e| {
        CertFileError::Pkcs12Error {
            message: format!("Failed to parse PKCS#12: {}", e),
        }
    })?;

    let mut extracted = ExtractedPfx::default();
    let mut loose_certs = Vec::new();

    // The leaf comes from a key chain when there is one; loose certificates
    // only follow it.
    for (_alias, entry) in keystore.entries() {
        match entry {
            p12_keystore::KeyStoreEntry::PrivateKeyChain(chain) => {
                if extracted.private_key.is_none() {
                    extracted.private_key = Some(chain.key().to_vec());
                }
                for cert in chain.chain() {
                    push_certificate(&mut extracted, cert.as_der().to_vec());
                }
            }
            p12_keystore::KeyStoreEntry::Certificate(cert) => {
                loose_certs.push(cert.as_der().to_vec());
            }
        }
    }

    for der in loose_certs {
        push_certificate(&mut extracted, der);
    }

    if extracted.certificate.is_none() && extracted.private_key.is_none() {
        return Err(CertFileError::Pkcs12Error {
            message: "No certificates or keys found in PKCS#12 file".to_string(),
        });
    }

    Ok(extracted)
}

fn push_certificate(extracted: &mut ExtractedPfx, der: Vec<u8>) {
    if extracted.certificate.is_none() {
        extracted.certificate = Some(der);
    } else if extracted.certificate.as_ref() != Some(&der) && !extracted.ca_chain.contains(&der) {
        extracted.ca_chain.push(der);
    }
}

/// Write `<stem>.crt`, `<stem>.ca` and `<stem>.key` into `dir`.
///
/// Files are only written for parts present in the archive. Returns the
/// written paths.
pub fn write_extracted(
    extracted: &ExtractedPfx,
    dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, CertFileError> {
    let mut written = Vec::new();

    if let Some(cert) = &extracted.certificate {
        let path = dir.join(format!("{}.crt", stem));
        write_pem(&path, &[::pem::Pem::new("CERTIFICATE", cert.clone())])?;
        written.push(path);
    }

    if !extracted.ca_chain.is_empty() {
        let path = dir.join(format!("{}.ca", stem));
        let blocks: Vec<::pem::Pem> = extracted
            .ca_chain
            .iter()
            .map(|der| ::pem::Pem::new("CERTIFICATE", der.clone()))
            .collect();
        write_pem(&path, &blocks)?;
        written.push(path);
    }

    if let Some(key) = &extracted.private_key {
        let path = dir.join(format!("{}.key", stem));
        write_pem(&path, &[::pem::Pem::new("PRIVATE KEY", key.clone())])?;
        written.push(path);
    }

    Ok(written)
}

fn write_pem(path: &Path, blocks: &[::pem::Pem]) -> Result<(), CertFileError> {
    std::fs::write(path, ::pem::encode_many(blocks)).map_err(|e| CertFileError::FileWriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Output path for `pack`: `<name>.pfx`, defaulting the name to `certificate`
pub fn pfx_output_path(name: Option<&str>) -> PathBuf {
    let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("certificate");
    let name = name.strip_suffix(".pfx").unwrap_or(name);
    PathBuf::from(format!("{}.pfx", name))
}
