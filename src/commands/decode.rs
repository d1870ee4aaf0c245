//! Certificate / CSR decode command

use crate::cert_ops::decode_pem;
use crate::cert_ops::reader::{read_file, read_pasted_pem};
use crate::cli::DecodeArgs;
use crate::output::{print_decoded, print_json};
use console::style;
use std::io::{IsTerminal, Read};

pub fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let data = match &args.file {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };

    let decoded = decode_pem(&data)?;

    if args.json {
        print_json(&decoded)?;
    } else {
        print_decoded(&decoded);
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let stdin = std::io::stdin();

    if stdin.is_terminal() {
        eprintln!(
            "{}",
            style("Paste the certificate or CSR (input ends at the -----END line):").magenta()
        );
        return Ok(read_pasted_pem(stdin.lock())?.into_bytes());
    }

    let mut data = Vec::new();
    stdin.lock().read_to_end(&mut data)?;
    Ok(data)
}
