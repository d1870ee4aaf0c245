//! Certificate file operations module
//!
//! Provides decoding of certificates and CSRs, and packing/extracting of
//! PFX (PKCS#12) archives.

pub mod decode;
pub mod pfx;
pub mod reader;

pub use decode::{decode_certificate, decode_csr, decode_pem};
pub use pfx::{extract_pfx, pack_pfx, pack_pfx_files, write_extracted, ExtractedPfx};
