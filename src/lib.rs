//! # pdfexcerpt
//!
//! Reading-order excerpts with linked footnotes from PDF text runs.
//!
//! Text runs (positioned pieces of text) are split into body and footer
//! regions, assembled into paragraphs, and the footer paragraphs are
//! rebuilt into a footnote table. Numerals in the body that refer to a
//! footnote are turned into `<sup>` references, and the result is rendered
//! as HTML. Map markers that link a document can be annotated with that
//! HTML in bulk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfexcerpt::excerpt_file;
//!
//! fn main() -> pdfexcerpt::Result<()> {
//!     let output = excerpt_file("report.pdf")?;
//!     println!("{}", output.to_html());
//!     Ok(())
//! }
//! ```
//!
//! ## Inputs
//!
//! - **PDF files**, read with `lopdf`
//! - **Runs JSON**, text runs extracted elsewhere:
//!   `{"pages": [{"number": 1, "height": 792, "runs": [{"text": "..", "y": 700}]}]}`

pub mod annotate;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use annotate::{
    annotate_maps, annotate_marker, annotate_markers, AnnotateOptions, AnnotationReport,
    MarkerOutcome, FAILED_EXCERPT,
};
pub use detect::{detect_input, InputKind};
pub use error::{Error, Result};
pub use model::{
    FootnoteTable, HighlightRule, HighlightTarget, MapsData, Marker, PageRuns, Paragraph,
    Region, RegionData, TextRun,
};
pub use parser::{ErrorMode, PageSelection, ReconstructOptions, Reconstruction};
pub use render::{DocumentOutput, JsonFormat, ReconstructionStats};
pub use source::{DocumentLoader, FileLoader, LopdfSource, MemorySource, TextRunSource};

use std::path::Path;

/// Reconstruct a PDF or runs JSON file.
///
/// # Example
///
/// ```no_run
/// use pdfexcerpt::reconstruct_file;
///
/// let doc = reconstruct_file("report.pdf").unwrap();
/// for (number, text) in doc.footnotes.sorted() {
///     println!("[{}] {}", number, text);
/// }
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P) -> Result<Reconstruction> {
    reconstruct_file_with_options(path, &ReconstructOptions::default())
}

/// Reconstruct a file with custom options.
pub fn reconstruct_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ReconstructOptions,
) -> Result<Reconstruction> {
    let source = source::open_path(path)?;
    parser::reconstruct(source.as_ref(), options)
}

/// Reconstruct a document held in memory (PDF bytes or runs JSON).
pub fn reconstruct_bytes(data: &[u8], options: &ReconstructOptions) -> Result<Reconstruction> {
    let source = source::open_bytes(data, None)?;
    parser::reconstruct(source.as_ref(), options)
}

/// Reconstruct and render a file to HTML.
///
/// # Example
///
/// ```no_run
/// use pdfexcerpt::excerpt_file;
///
/// let output = excerpt_file("report.pdf").unwrap();
/// std::fs::write("report.html", output.to_html()).unwrap();
/// ```
pub fn excerpt_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutput> {
    let doc = reconstruct_file(path)?;
    Ok(render::render_document(&doc))
}

/// Reconstruct and render a document held in memory.
pub fn excerpt_bytes(data: &[u8]) -> Result<DocumentOutput> {
    let doc = reconstruct_bytes(data, &ReconstructOptions::default())?;
    Ok(render::render_document(&doc))
}

/// Reconstruct and render any text run source.
pub fn excerpt_source<S>(source: &S, options: &ReconstructOptions) -> Result<DocumentOutput>
where
    S: TextRunSource + ?Sized,
{
    let doc = parser::reconstruct(source, options)?;
    Ok(render::render_document(&doc))
}

/// Builder for reconstructing documents.
///
/// # Example
///
/// ```no_run
/// use pdfexcerpt::{Excerpt, PageSelection};
///
/// let html = Excerpt::new()
///     .lenient()
///     .with_footer_ratio(0.25)
///     .with_pages(PageSelection::Range(1..=3))
///     .open("report.pdf")?
///     .to_html();
/// # Ok::<(), pdfexcerpt::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Excerpt {
    options: ReconstructOptions,
}

impl Excerpt {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the footer ratio.
    pub fn with_footer_ratio(mut self, ratio: f32) -> Self {
        self.options = self.options.with_footer_ratio(ratio);
        self
    }

    /// Set the paragraph line threshold.
    pub fn with_line_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_line_threshold(threshold);
        self
    }

    /// Set the width limit for isolated reference digits.
    pub fn with_isolated_number_width(mut self, width: f32) -> Self {
        self.options = self.options.with_isolated_number_width(width);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// The options this builder will use.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct a file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<ExcerptResult> {
        let reconstruction = reconstruct_file_with_options(path, &self.options)?;
        Ok(ExcerptResult { reconstruction })
    }

    /// Reconstruct a document held in memory.
    pub fn open_bytes(self, data: &[u8]) -> Result<ExcerptResult> {
        let reconstruction = reconstruct_bytes(data, &self.options)?;
        Ok(ExcerptResult { reconstruction })
    }

    /// Reconstruct from any text run source.
    pub fn read<S: TextRunSource + ?Sized>(self, source: &S) -> Result<ExcerptResult> {
        let reconstruction = parser::reconstruct(source, &self.options)?;
        Ok(ExcerptResult { reconstruction })
    }
}

/// A reconstructed document ready for output.
#[derive(Debug, Clone)]
pub struct ExcerptResult {
    /// The reconstruction
    pub reconstruction: Reconstruction,
}

impl ExcerptResult {
    /// Render body and footnotes.
    pub fn render(&self) -> DocumentOutput {
        render::render_document(&self.reconstruction)
    }

    /// Render to a single HTML string.
    pub fn to_html(&self) -> String {
        self.render().to_html()
    }

    /// Serialize the reconstruction to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.reconstruction, format)
    }

    /// Footnotes in numeric order.
    pub fn footnotes(&self) -> Vec<(&str, &str)> {
        self.reconstruction.footnotes.sorted()
    }
}
