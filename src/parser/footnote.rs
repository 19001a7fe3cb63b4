//! Footnote reconstruction from footer paragraphs.
//!
//! Geometry alone cannot tell where one footnote ends and the next begins,
//! so reconstruction runs in two passes. The merge pass walks the footer
//! paragraphs of the whole document and attaches unnumbered paragraphs to
//! the footnote opened last. The split pass then cuts entries that still
//! hold several footnotes run together (`"... end. 4. Next note"`).

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{FootnoteTable, Paragraph};

/// Footnote start: number, optional `.` or `)`, whitespace, content.
fn footnote_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)[.)]?\s+(.*)$").expect("valid regex"))
}

/// A footnote start directly after the end of a sentence.
fn embedded_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\s+([0-9]+[.)]?\s+)").expect("valid regex"))
}

/// Split a footer line into footnote number and content, if it starts one.
pub fn parse_footnote_start(text: &str) -> Option<(&str, &str)> {
    let caps = footnote_start().captures(text)?;
    let number = caps.get(1)?.as_str();
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some((number, content))
}

/// Merge-pass state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MergeState {
    NoOpenFootnote,
    OpenFootnote(String),
}

/// Counters from a reconstruction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FootnoteReport {
    /// Footer paragraphs that started a footnote
    pub started: usize,
    /// Footer paragraphs attached to an open footnote
    pub continued: usize,
    /// Footer paragraphs dropped because no footnote was open
    pub dropped: usize,
    /// Footnotes created by the split pass
    pub split_off: usize,
}

/// Build the footnote table from all footer paragraphs, in document order.
pub fn reconstruct_footnotes(footers: &[Paragraph]) -> (FootnoteTable, FootnoteReport) {
    let mut report = FootnoteReport::default();
    let merged = merge_pass(footers, &mut report);
    let table = split_pass(&merged, &mut report);
    (table, report)
}

fn merge_pass(footers: &[Paragraph], report: &mut FootnoteReport) -> FootnoteTable {
    let mut table = FootnoteTable::new();
    let mut state = MergeState::NoOpenFootnote;

    for paragraph in footers {
        let text = paragraph.text.trim();
        match (parse_footnote_start(text), &state) {
            (Some((number, content)), _) => {
                table.insert_or_append(number, content);
                report.started += 1;
                state = MergeState::OpenFootnote(number.to_string());
            }
            // Continuation, possibly of a footnote opened on an earlier page.
            (None, MergeState::OpenFootnote(number)) => {
                table.append(number, text);
                report.continued += 1;
            }
            (None, MergeState::NoOpenFootnote) => {
                log::debug!(
                    "dropping footer text on page {} with no open footnote: {:?}",
                    paragraph.page,
                    text
                );
                report.dropped += 1;
            }
        }
    }

    table
}

/// Split text before every footnote start that follows a sentence end.
fn split_parts(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for caps in embedded_start().captures_iter(text) {
        if let Some(m) = caps.get(1) {
            parts.push(&text[start..m.start()]);
            start = m.start();
        }
    }
    parts.push(&text[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn split_pass(merged: &FootnoteTable, report: &mut FootnoteReport) -> FootnoteTable {
    let mut table = FootnoteTable::new();

    for (number, text) in merged.iter() {
        let parts = split_parts(text.trim());
        let Some((first, rest)) = parts.split_first() else {
            table.insert_or_append(number, "");
            continue;
        };

        if rest.is_empty() {
            table.insert_or_append(number, first);
            continue;
        }

        let head = parse_footnote_start(first).map_or(*first, |(_, content)| content.trim());
        table.insert_or_append(number, head);

        for part in rest {
            match parse_footnote_start(part) {
                Some((new_number, content)) => {
                    log::debug!("split footnote {} out of footnote {}", new_number, number);
                    if table.insert_or_append(new_number, content.trim()) {
                        report.split_off += 1;
                    }
                }
                None => {
                    if let Some(last) = table.last_created().map(str::to_string) {
                        table.append(&last, part);
                    }
                }
            }
        }
    }

    table
}
