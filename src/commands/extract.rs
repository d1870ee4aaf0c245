//! PFX extract command

use super::prompt_password;
use crate::cert_ops::pfx::{extract_pfx, write_extracted, ExtractedPfx};
use crate::cert_ops::reader::read_file;
use crate::cli::ExtractArgs;
use crate::output::{print_success, print_warning};
use std::path::Path;
use tracing::debug;

pub fn run_extract(args: &ExtractArgs) -> anyhow::Result<()> {
    let data = read_file(&args.file)?;
    let extracted = open_pfx(&data, args.password.as_deref())?;

    let stem = args
        .file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("certificate");
    let dir = match &args.out_dir {
        Some(dir) => dir.as_path(),
        None => args.file.parent().unwrap_or(Path::new(".")),
    };

    if extracted.private_key.is_none() {
        print_warning("No private key found in the PFX file");
    }

    for path in write_extracted(&extracted, dir, stem)? {
        print_success(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

/// Open with the given password, or try an empty one before prompting
fn open_pfx(data: &[u8], password: Option<&str>) -> anyhow::Result<ExtractedPfx> {
    if let Some(password) = password {
        return Ok(extract_pfx(data, password)?);
    }

    match extract_pfx(data, "") {
        Ok(extracted) => Ok(extracted),
        Err(e) => {
            debug!("Empty password rejected: {}", e);
            match prompt_password("PFX password", false)? {
                Some(password) => Ok(extract_pfx(data, &password)?),
                None => Err(e.into()),
            }
        }
    }
}
