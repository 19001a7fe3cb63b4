//! Positioned text runs, the raw input of reconstruction.

use serde::{Deserialize, Serialize};

/// A contiguous piece of extracted text with its baseline position.
///
/// Coordinates are in PDF page space: `y` grows towards the top of the page,
/// so larger values are read first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content, possibly with surrounding whitespace
    pub text: String,

    /// X position of the baseline origin
    #[serde(default)]
    pub x: f32,

    /// Y position of the baseline
    pub y: f32,

    /// Measured (or estimated) width of the run
    #[serde(default)]
    pub width: f32,

    /// Page number (1-indexed) the run was read from
    #[serde(default)]
    pub page: u32,
}

impl TextRun {
    /// Create a run at the given baseline with zero x and page 0.
    pub fn new(text: impl Into<String>, y: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x: 0.0,
            y,
            width,
            page: 0,
        }
    }

    /// Set the x position.
    pub fn at_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Set the source page.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the run carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// All runs read from one page, in provider order (unsorted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRuns {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page height in points at scale 1.0
    pub height: f32,

    /// Text runs on the page
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl PageRuns {
    /// Create an empty page.
    pub fn new(number: u32, height: f32) -> Self {
        Self {
            number,
            height,
            runs: Vec::new(),
        }
    }

    /// Create a US Letter page (792pt high).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 792.0)
    }

    /// Add a run, stamping it with this page's number.
    pub fn push(&mut self, run: TextRun) {
        self.runs.push(run.on_page(self.number));
    }

    /// Builder form of [`PageRuns::push`].
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.push(run);
        self
    }

    /// Stamp every run with this page's number.
    ///
    /// Runs deserialized from JSON usually omit the page field.
    pub fn normalize_pages(&mut self) {
        let number = self.number;
        for run in &mut self.runs {
            run.page = number;
        }
    }

    /// Number of runs on the page.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if the page has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
