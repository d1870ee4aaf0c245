//! Output formatting module
//!
//! Provides:
//! - Rich terminal output with colors
//! - JSON export
//! - `openssl s_client` highlighting

pub mod highlight;
pub mod json;
pub mod terminal;

pub use highlight::Highlighter;
pub use json::print_json;
pub use terminal::{
    print_decoded, print_error, print_field, print_filter_summary, print_header, print_prompt,
    print_success, print_warning,
};
