//! Rendered output with reconstruction statistics.

use serde::{Deserialize, Serialize};

/// HTML rendering of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutput {
    /// Body paragraphs with linked references
    pub main_html: String,

    /// Aggregated footnote block, empty when there are no footnotes
    pub footnotes_html: String,

    /// Counters collected while reconstructing and rendering
    pub stats: ReconstructionStats,
}

impl DocumentOutput {
    /// Create an output from the two markup parts.
    pub fn new(main_html: String, footnotes_html: String, stats: ReconstructionStats) -> Self {
        Self {
            main_html,
            footnotes_html,
            stats,
        }
    }

    /// Body followed by the footnote block, joined with a newline.
    pub fn to_html(&self) -> String {
        format!("{}\n{}", self.main_html, self.footnotes_html)
    }

    /// Check if nothing was reconstructed.
    pub fn is_empty(&self) -> bool {
        self.main_html.is_empty() && self.footnotes_html.is_empty()
    }
}

/// Statistics collected during reconstruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionStats {
    /// Pages that contributed runs
    pub page_count: u32,

    /// Pages skipped in lenient mode
    pub skipped_page_count: u32,

    /// Text runs read from the source
    pub run_count: u32,

    /// Isolated reference digits merged into a neighbouring run
    pub merged_number_count: u32,

    /// Paragraphs in the main region
    pub main_paragraph_count: u32,

    /// Paragraphs in the footer region
    pub footer_paragraph_count: u32,

    /// Footnotes in the final table
    pub footnote_count: u32,

    /// Footnotes created by splitting merged entries
    pub split_footnote_count: u32,

    /// Footer paragraphs dropped with no footnote open
    pub dropped_footer_count: u32,

    /// Body numerals rewritten as footnote references
    pub linked_reference_count: u32,
}

impl ReconstructionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReconstructionStats) {
        self.page_count += other.page_count;
        self.skipped_page_count += other.skipped_page_count;
        self.run_count += other.run_count;
        self.merged_number_count += other.merged_number_count;
        self.main_paragraph_count += other.main_paragraph_count;
        self.footer_paragraph_count += other.footer_paragraph_count;
        self.footnote_count += other.footnote_count;
        self.split_footnote_count += other.split_footnote_count;
        self.dropped_footer_count += other.dropped_footer_count;
        self.linked_reference_count += other.linked_reference_count;
    }
}
