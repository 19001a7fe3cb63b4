//! Footnote table built from footer paragraphs.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from footnote number to reconstructed text.
///
/// Numbers are kept as the digit strings found in the document, so `"01"`
/// and `"1"` are distinct keys. Two orders are tracked separately: the
/// insertion order, which reconstruction relies on, and the numeric order
/// used for display ([`FootnoteTable::sorted`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootnoteTable {
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl FootnoteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry, or append to it if the number already exists.
    ///
    /// Returns `true` if a new entry was created.
    pub fn insert_or_append(&mut self, number: &str, text: &str) -> bool {
        if self.append(number, text) {
            return false;
        }
        self.entries.insert(number.to_string(), text.to_string());
        self.order.push(number.to_string());
        true
    }

    /// Append text to an existing entry, space-separated.
    ///
    /// Returns `false` if there is no entry for `number`.
    pub fn append(&mut self, number: &str, text: &str) -> bool {
        match self.entries.get_mut(number) {
            Some(existing) => {
                if existing.is_empty() {
                    existing.push_str(text);
                } else if !text.is_empty() {
                    existing.push(' ');
                    existing.push_str(text);
                }
                true
            }
            None => false,
        }
    }

    /// Get the text for a footnote number.
    pub fn get(&self, number: &str) -> Option<&str> {
        self.entries.get(number).map(String::as_str)
    }

    /// Check if a footnote number exists.
    pub fn contains(&self, number: &str) -> bool {
        self.entries.contains_key(number)
    }

    /// Check if a footnote number exists and has non-empty text.
    pub fn has_text(&self, number: &str) -> bool {
        self.get(number).is_some_and(|t| !t.is_empty())
    }

    /// Footnote numbers in the order they were first created.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// The most recently created footnote number.
    pub fn last_created(&self) -> Option<&str> {
        self.order.last().map(String::as_str)
    }

    /// Number of footnotes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|n| (n.as_str(), self.entries.get(n).map_or("", String::as_str)))
    }

    /// Entries sorted by ascending numeric footnote number.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self.iter().collect();
        entries.sort_by(|a, b| compare_numbers(a.0, b.0));
        entries
    }
}

/// Compare two digit strings by numeric value without parsing.
///
/// Works for numbers of any length; ties (e.g. `"01"` vs `"1"`) fall back to
/// string order so the result is total.
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a_digits = a.trim_start_matches('0');
    let b_digits = b.trim_start_matches('0');
    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a.cmp(b))
}
