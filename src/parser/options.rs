//! Reconstruction options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Fraction of the page height, measured from the bottom, treated as footer.
pub const DEFAULT_FOOTER_RATIO: f32 = 0.3;

/// Maximum vertical distance between chained runs of one paragraph.
pub const DEFAULT_LINE_THRESHOLD: f32 = 20.0;

/// Runs narrower than this can be stranded footnote reference digits.
pub const DEFAULT_ISOLATED_NUMBER_MAX_WIDTH: f32 = 10.0;

/// Options for reconstructing a document from text runs.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Footer region as a fraction of page height (from the bottom)
    pub footer_ratio: f32,

    /// Vertical proximity (layout units) that keeps runs in one paragraph
    pub line_threshold: f32,

    /// Width below which a bare 1-2 digit run may be merged forward
    pub isolated_number_max_width: f32,

    /// Error handling mode for unreadable pages
    pub error_mode: ErrorMode,

    /// Which pages take part in reconstruction
    pub pages: PageSelection,
}

impl ReconstructOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer ratio (clamped to 0.0..=1.0).
    pub fn with_footer_ratio(mut self, ratio: f32) -> Self {
        self.footer_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Set the paragraph line threshold.
    pub fn with_line_threshold(mut self, threshold: f32) -> Self {
        self.line_threshold = threshold.max(0.0);
        self
    }

    /// Set the width limit for isolated numbers.
    pub fn with_isolated_number_width(mut self, width: f32) -> Self {
        self.isolated_number_max_width = width.max(0.0);
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip unreadable pages instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Footer threshold y for a page of the given height.
    pub fn footer_threshold(&self, page_height: f32) -> f32 {
        page_height * self.footer_ratio
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            footer_ratio: DEFAULT_FOOTER_RATIO,
            line_threshold: DEFAULT_LINE_THRESHOLD,
            isolated_number_max_width: DEFAULT_ISOLATED_NUMBER_MAX_WIDTH,
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
        }
    }
}

/// Error handling mode for page reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Log and skip pages that cannot be read
    Lenient,
}

/// Page selection for reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed), sorted and deduplicated
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a selection such as `"all"`, `"2-5"` or `"1,3,7-9"`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (parse_page(start)?, parse_page(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => pages.extend(parse_page(start)?..=parse_page(end)?),
                None => pages.push(parse_page(part)?),
            }
        }
        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidPageRange(s.trim().to_string())),
    }
}
