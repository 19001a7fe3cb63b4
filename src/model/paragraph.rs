//! Assembled paragraphs.

use serde::{Deserialize, Serialize};

/// Page region a paragraph was assembled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Body text above the footer threshold
    #[default]
    Main,
    /// Footnote candidates in the lower part of the page
    Footer,
}

/// A paragraph built from one or more vertically close runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Space-joined trimmed text of the runs
    pub text: String,

    /// Baseline of the first run
    pub y: f32,

    /// Source page (1-indexed)
    pub page: u32,

    /// Region the paragraph belongs to
    #[serde(default)]
    pub region: Region,
}

impl Paragraph {
    /// Create a main-region paragraph.
    pub fn new(text: impl Into<String>, y: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            y,
            page,
            region: Region::Main,
        }
    }

    /// Create a footer-region paragraph.
    pub fn footer(text: impl Into<String>, y: f32, page: u32) -> Self {
        Self {
            region: Region::Footer,
            ..Self::new(text, y, page)
        }
    }

    /// Append text separated by a single space.
    pub fn append(&mut self, text: &str) {
        self.text.push(' ');
        self.text.push_str(text);
    }

    /// Check if this paragraph came from the footer region.
    pub fn is_footer(&self) -> bool {
        self.region == Region::Footer
    }
}
