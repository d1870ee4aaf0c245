//! PFX pack command

use super::prompt_password;
use crate::cert_ops::pfx::{pack_pfx, pack_pfx_files, pfx_output_path, write_pfx};
use crate::cert_ops::reader::{read_file, read_pasted_section};
use crate::cli::PackArgs;
use crate::output::{print_prompt, print_success, print_warning};
use std::io::{BufRead, IsTerminal};
use std::path::Path;
use tracing::info;

pub fn run_pack(args: &PackArgs) -> anyhow::Result<()> {
    let output = pfx_output_path(args.name.as_deref());

    if let (Some(cert), Some(key)) = (&args.cert, &args.key) {
        let password = pack_password(args)?;
        info!(
            "Packing {} with {} and {} CA file(s)",
            cert.display(),
            key.display(),
            args.ca.len()
        );
        pack_pfx_files(cert, key, &args.ca, &password, &output)?;
    } else {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let attended = stdin.is_terminal();

        let cert_pem = file_or_pasted(args.cert.as_deref(), "certificate", attended, &mut input)?;
        let key_pem = file_or_pasted(args.key.as_deref(), "private key", attended, &mut input)?;
        let ca_pems = if args.ca.is_empty() {
            let ca = paste("CA certificate(s), blank for none", attended, &mut input)?;
            if ca.trim().is_empty() {
                Vec::new()
            } else {
                vec![ca.into_bytes()]
            }
        } else {
            args.ca
                .iter()
                .map(|p| read_file(p))
                .collect::<Result<Vec<_>, _>>()?
        };
        drop(input);

        let password = pack_password(args)?;
        info!("Packing pasted PEM input with {} CA block(s)", ca_pems.len());
        let pfx = pack_pfx(&cert_pem, &key_pem, &ca_pems, &password)?;
        write_pfx(&output, &pfx)?;
    }

    print_success(&format!("PFX file '{}' created", output.display()));
    Ok(())
}

fn pack_password(args: &PackArgs) -> anyhow::Result<String> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password("PFX password (leave blank for none)", true)?.unwrap_or_default(),
    };

    if password.is_empty() {
        print_warning("The PFX file will not be password protected");
    }
    Ok(password)
}

fn file_or_pasted<R: BufRead>(
    path: Option<&Path>,
    what: &str,
    attended: bool,
    input: &mut R,
) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => Ok(read_file(path)?),
        None => {
            let text = paste(what, attended, input)?;
            if text.trim().is_empty() {
                anyhow::bail!("No {} was pasted", what);
            }
            Ok(text.into_bytes())
        }
    }
}

fn paste<R: BufRead>(what: &str, attended: bool, input: &mut R) -> anyhow::Result<String> {
    if attended {
        print_prompt(&format!(
            "Paste the {} (PEM), then type END on its own line:",
            what
        ));
    }
    Ok(read_pasted_section(input)?)
}
