//! moment.js format strings to chrono `strftime`.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Tokens are tried in order at each position, so longer tokens of the
/// same letter come first.
const TOKENS: &[(&str, &str)] = &[
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("dd", "%a"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("YYYY", "%Y"),
    ("yyyy", "%Y"),
    ("YY", "%y"),
    ("yy", "%y"),
    ("A", "%p"),
    ("a", "%P"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("SSSSSSSSS", "%9f"),
    ("SSSSSS", "%6f"),
    ("SSS", "%3f"),
    ("S", "%3f"),
    ("zz", "%Z"),
    ("z", "%Z"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
];

/// Translate a moment.js format into a chrono format string.
///
/// Unknown characters are copied and a literal `%` is escaped.
pub fn translate(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'scan: while let Some(c) = rest.chars().next() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }

        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Format `dt` with a moment.js format string.
pub fn format_moment<Tz>(dt: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(&translate(format)).to_string()
}
