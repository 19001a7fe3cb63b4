//! Marker annotation.
//!
//! For every marker that links a document, the document is reconstructed,
//! rendered to HTML, given a display title from its heading and run through
//! the marker's highlight rules. A document that cannot be read only affects
//! its own marker: the excerpt becomes a placeholder and processing moves on.

mod highlight;
mod title;

pub use highlight::{apply_highlights, HighlightStep};
pub use title::heading_title;

use serde::Serialize;

use crate::error::Result;
use crate::model::{MapsData, Marker, RegionData};
use crate::parser::{reconstruct, ReconstructOptions};
use crate::render::{render_document, DocumentOutput};
use crate::source::DocumentLoader;

/// Excerpt stored on a marker whose document could not be processed.
pub const FAILED_EXCERPT: &str = "(Failed to parse PDF text.)";

/// Options for annotating markers.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Options used for every document
    pub reconstruct: ReconstructOptions,

    /// Excerpt written when a document fails
    pub failure_placeholder: String,
}

impl AnnotateOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reconstruction options.
    pub fn with_reconstruct(mut self, options: ReconstructOptions) -> Self {
        self.reconstruct = options;
        self
    }

    /// Set the failure placeholder.
    pub fn with_failure_placeholder(mut self, text: impl Into<String>) -> Self {
        self.failure_placeholder = text.into();
        self
    }
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            reconstruct: ReconstructOptions::default(),
            failure_placeholder: FAILED_EXCERPT.to_string(),
        }
    }
}

/// What happened to a single marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerOutcome {
    /// The document was reconstructed and the excerpt written
    Annotated,
    /// The marker links no document
    Skipped,
    /// The document failed; the placeholder was written
    Failed(String),
}

/// A marker whose document could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerFailure {
    /// Position of the marker in its list
    pub index: usize,
    /// Marker title
    pub title: String,
    /// Error message
    pub message: String,
}

/// Summary of an annotation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Markers with a reconstructed excerpt
    pub annotated: usize,
    /// Markers without a document
    pub skipped: usize,
    /// Markers whose document failed
    pub failed: usize,
    /// Details for each failed marker
    pub failures: Vec<MarkerFailure>,
}

impl AnnotationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total markers processed.
    pub fn total(&self) -> usize {
        self.annotated + self.skipped + self.failed
    }

    /// Check if any document failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, index: usize, marker: &Marker, outcome: MarkerOutcome) {
        match outcome {
            MarkerOutcome::Annotated => self.annotated += 1,
            MarkerOutcome::Skipped => self.skipped += 1,
            MarkerOutcome::Failed(message) => {
                self.failed += 1;
                self.failures.push(MarkerFailure {
                    index,
                    title: marker.title.clone(),
                    message,
                });
            }
        }
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: AnnotationReport) {
        self.annotated += other.annotated;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }
}

/// Load, reconstruct and render the document at `location`.
pub fn excerpt_document<L>(
    loader: &L,
    location: &str,
    options: &ReconstructOptions,
) -> Result<DocumentOutput>
where
    L: DocumentLoader + ?Sized,
{
    let source = loader.load(location)?;
    let doc = reconstruct(source.as_ref(), options)?;
    Ok(render_document(&doc))
}

/// Annotate one marker in place.
pub fn annotate_marker<L>(marker: &mut Marker, loader: &L, options: &AnnotateOptions) -> MarkerOutcome
where
    L: DocumentLoader + ?Sized,
{
    let location = match marker.document_url.as_deref().map(str::trim) {
        Some(location) if !location.is_empty() => location.to_string(),
        _ => {
            marker.full_title = Some(marker.title.clone());
            return MarkerOutcome::Skipped;
        }
    };

    match excerpt_document(loader, &location, &options.reconstruct) {
        Ok(output) => {
            let html = output.to_html();
            let title = heading_title(&html).unwrap_or_else(|| marker.title.clone());
            marker.excerpt = Some(apply_highlights(&html, &marker.highlights));
            marker.full_title = Some(title);
            log::debug!(
                "annotated {:?}: {} paragraphs, {} footnotes, {} references",
                marker.title,
                output.stats.main_paragraph_count,
                output.stats.footnote_count,
                output.stats.linked_reference_count
            );
            MarkerOutcome::Annotated
        }
        Err(e) => {
            log::error!("failed to read {} for marker {:?}: {}", location, marker.title, e);
            marker.excerpt = Some(options.failure_placeholder.clone());
            marker.full_title = Some(marker.title.clone());
            MarkerOutcome::Failed(e.to_string())
        }
    }
}

/// Annotate markers strictly in order.
pub fn annotate_markers<L>(
    markers: &mut [Marker],
    loader: &L,
    options: &AnnotateOptions,
) -> AnnotationReport
where
    L: DocumentLoader + ?Sized,
{
    annotate_markers_with_progress(markers, loader, options, |_, _, _| {})
}

/// Annotate markers, calling `progress(done, total, marker)` after each one.
pub fn annotate_markers_with_progress<L, F>(
    markers: &mut [Marker],
    loader: &L,
    options: &AnnotateOptions,
    mut progress: F,
) -> AnnotationReport
where
    L: DocumentLoader + ?Sized,
    F: FnMut(usize, usize, &Marker),
{
    let total = markers.len();
    let mut report = AnnotationReport::new();

    for (index, marker) in markers.iter_mut().enumerate() {
        let outcome = annotate_marker(marker, loader, options);
        report.record(index, marker, outcome);
        progress(index + 1, total, marker);
    }

    report
}

/// Annotate every marker of a region.
pub fn annotate_region<L>(
    region: &mut RegionData,
    loader: &L,
    options: &AnnotateOptions,
) -> AnnotationReport
where
    L: DocumentLoader + ?Sized,
{
    annotate_markers(&mut region.markers, loader, options)
}

/// Annotate all regions of a data file, or only the one with `region_id`.
pub fn annotate_maps<L>(
    data: &mut MapsData,
    region_id: Option<u32>,
    loader: &L,
    options: &AnnotateOptions,
) -> AnnotationReport
where
    L: DocumentLoader + ?Sized,
{
    let mut report = AnnotationReport::new();
    for region in data
        .maps
        .iter_mut()
        .filter(|r| region_id.map_or(true, |id| r.id == id))
    {
        report.merge(annotate_region(region, loader, options));
    }
    report
}
