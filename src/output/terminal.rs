//! Rich terminal output formatting

use crate::models::{Decoded, DecodedCertificate, DecodedCsr, FilterSummary};
use console::style;
use std::path::Path;

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

/// Print a labelled field, magenta label and green value
pub fn print_field(label: &str, value: &str) {
    println!("{} {}", style(format!("{}:", label)).magenta(), style(value).green());
}

/// Print a decoded certificate or CSR
pub fn print_decoded(decoded: &Decoded) {
    match decoded {
        Decoded::Certificate(cert) => print_certificate(cert),
        Decoded::Csr(csr) => print_csr(csr),
    }
}

fn print_certificate(cert: &DecodedCertificate) {
    print_header("Certificate");

    print_field("Common Name", cert.common_name.as_deref().unwrap_or("(none)"));
    print_subject_alt_names(&cert.subject_alt_names);
    print_field("Issuer", &cert.issuer);

    println!("{}", style("Validity Period:").yellow());
    print_field(
        "Not Before",
        &cert.not_before.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    print_field(
        "Not After",
        &cert.not_after.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    println!(
        "{} {}",
        style("Expires:").magenta(),
        format_expiry_days(cert.days_until_expiry())
    );
    print_field("SHA-256", &cert.fingerprint);
}

fn print_csr(csr: &DecodedCsr) {
    print_header("Certificate Signing Request");

    print_field("Common Name", csr.common_name.as_deref().unwrap_or("(none)"));
    print_subject_alt_names(&csr.subject_alt_names);
    print_field("Subject", &csr.subject);
}

fn print_subject_alt_names(names: &[String]) {
    if names.is_empty() {
        println!("{}", style("No Subject Alternative Names found.").yellow());
    } else {
        print_field("Subject Alternative Names", &names.join(", "));
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an input prompt to stderr
pub fn print_prompt(message: &str) {
    eprintln!("{} {}", style("?").cyan().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

fn format_expiry_days(days: i64) -> String {
    if days < 0 {
        style(format!("Expired {} days ago", days.abs()))
            .red()
            .to_string()
    } else if days == 0 {
        style("Expires today!").red().bold().to_string()
    } else if days <= 7 {
        style(format!("{} days (critical)", days))
            .red()
            .bold()
            .to_string()
    } else if days <= 30 {
        style(format!("{} days (warning)", days)).yellow().to_string()
    } else {
        style(format!("{} days", days)).green().to_string()
    }
}

/// Print domain filter summary
pub fn print_filter_summary(summary: &FilterSummary, output: &Path) {
    print_header("Domain Filter Summary");

    println!("  Total domains checked: {}", style(summary.total).bold());
    println!("  Matched: {}", style(summary.accepted).green());
    println!("  Rejected: {}", summary.rejected());
    println!("  A record mismatch: {}", summary.a_record_mismatch);
    println!("  Nameserver mismatch: {}", summary.nameserver_mismatch);
    println!("  No records: {}", style(summary.unresolved).yellow());
    println!("  Lookup failures: {}", style(summary.lookup_failures).red());
    println!();
    println!("  Written to {}", style(output.display()).cyan());
}
