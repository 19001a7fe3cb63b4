//! Cross-linking of body numerals to footnotes.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::FootnoteTable;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Separator (or start of text) followed by digits.
fn reference_candidate() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(^|[\s,"'()\[\].;:\-])([0-9]+)"#).expect("valid regex"))
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ",\"'().;:-[]".contains(c)
}

/// Check if `rest` starts with a full English month name.
fn starts_with_month(rest: &str) -> bool {
    let rest = rest.trim_start();
    MONTHS.iter().any(|month| rest.starts_with(month))
}

/// Rewrite numerals that refer to existing footnotes as `<sup>N</sup>`.
///
/// A numeral qualifies when it sits between separators (or the text
/// boundaries), is not followed by a month name, and names a footnote with
/// non-empty text. Returns the rewritten text and the number of links made.
pub fn link_references(text: &str, footnotes: &FootnoteTable) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut linked = 0;
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = reference_candidate().captures_at(text, search_from) {
        let (Some(whole), Some(sep), Some(digits)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };
        let rest = &text[whole.end()..];

        let bounded = rest.chars().next().map_or(true, is_separator);
        if !bounded {
            // The digits run into a letter; a later separator may still
            // start a valid reference inside this span.
            search_from = next_char_boundary(text, whole.start());
            continue;
        }
        search_from = whole.end();

        if starts_with_month(rest) || !footnotes.has_text(digits.as_str()) {
            continue;
        }

        out.push_str(&text[copied..sep.end()]);
        out.push_str("<sup>");
        out.push_str(digits.as_str());
        out.push_str("</sup>");
        copied = whole.end();
        linked += 1;
    }

    out.push_str(&text[copied..]);
    (out, linked)
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len(), |c| index + c.len_utf8())
}
