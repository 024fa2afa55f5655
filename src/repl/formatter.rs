//! Inline formatting of bot replies for terminal output
//!
//! The worker returns lightly-marked text: **bold** spans and bare URLs.
//! Render bold as ANSI bold and URLs as underlined links, leaving
//! everything else (including newlines) untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("url pattern is valid"));

/// Format a full bot reply for display.
pub fn format_reply(text: &str) -> String {
    let bolded = BOLD_RE.replace_all(text, "\x1b[1m$1\x1b[0m");
    URL_RE
        .replace_all(&bolded, |caps: &regex::Captures| {
            format!("\x1b[4m{}\x1b[0m", &caps[0])
        })
        .into_owned()
}
