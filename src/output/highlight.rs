//! Highlighting for `openssl s_client` output
//!
//! A marker colors the text from where it appears up to the next marker or
//! the end of the line.

use console::{Color, Style};
use std::io::{BufRead, Write};

/// Markers in priority order: at a given position the first match wins
const MARKERS: &[(&str, Color, bool)] = &[
    ("subject=", Color::Green, false),
    ("issuer=", Color::Magenta, false),
    ("s:CN =", Color::Green, false),
    ("i:C =", Color::Yellow, true),
    ("a:PKEY:", Color::Blue, false),
    ("v:NotBefore:", Color::Magenta, false),
    ("s:C =", Color::Yellow, true),
    ("i:OU =", Color::Yellow, true),
    ("O =", Color::Magenta, false),
    ("s:b", Color::Yellow, true),
    ("No client", Color::Cyan, true),
    ("Peer signing digest:", Color::Cyan, true),
    ("Peer signature type:", Color::Cyan, true),
    ("Server Temp Key:", Color::Cyan, true),
    ("SSL handshake", Color::Yellow, false),
    ("Verification", Color::Yellow, false),
    ("New,", Color::Cyan, false),
    ("Server public", Color::Cyan, false),
    ("Secure", Color::Cyan, false),
    ("Compression:", Color::Cyan, false),
    ("Expansion:", Color::Cyan, false),
    ("No ALPN", Color::Cyan, false),
    ("Early", Color::Cyan, false),
    ("SSL-", Color::Cyan, false),
    ("Post-Handshake", Color::Cyan, false),
    ("Verify", Color::Green, false),
];

/// Colors known `s_client` markers in text
pub struct Highlighter {
    enabled: bool,
}

impl Highlighter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Highlight only when the terminal supports colors
    pub fn for_stdout() -> Self {
        Self::new(console::colors_enabled())
    }

    fn marker_at(&self, text: &str) -> Option<(&'static str, Style)> {
        MARKERS
            .iter()
            .find(|(marker, _, _)| text.starts_with(marker))
            .map(|(marker, color, bright)| {
                let mut style = Style::new().fg(*color).force_styling(true);
                if *bright {
                    style = style.bright();
                }
                (*marker, style)
            })
    }

    /// Highlight a single line (without its line terminator)
    pub fn highlight_line(&self, line: &str) -> String {
        if !self.enabled {
            return line.to_string();
        }

        let mut out = String::with_capacity(line.len() * 2);
        let mut current: Option<Style> = None;
        let mut segment_start = 0;
        let mut i = 0;

        while i < line.len() {
            if let Some((marker, style)) = self.marker_at(&line[i..]) {
                push_segment(&mut out, &line[segment_start..i], current.as_ref());
                current = Some(style);
                segment_start = i;
                i += marker.len();
                continue;
            }
            i += line[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
        push_segment(&mut out, &line[segment_start..], current.as_ref());

        out
    }

    /// Copy `reader` to `writer` line by line, highlighting as it goes
    pub fn highlight_to<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> std::io::Result<()> {
        for line in reader.lines() {
            writeln!(writer, "{}", self.highlight_line(&line?))?;
        }
        writer.flush()
    }
}

fn push_segment(out: &mut String, text: &str, style: Option<&Style>) {
    if text.is_empty() {
        return;
    }
    match style {
        Some(style) => out.push_str(&style.apply_to(text).to_string()),
        None => out.push_str(text),
    }
}
