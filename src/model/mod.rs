//! Data model for text reconstruction.
//!
//! Runs come in from a text source, paragraphs and footnotes are built by
//! the parser, and markers describe the map entries that get annotated.

mod footnote;
mod marker;
mod paragraph;
mod run;

pub use footnote::{compare_numbers, FootnoteTable};
pub use marker::{HighlightRule, HighlightTarget, MapsData, Marker, RegionData};
pub use paragraph::{Paragraph, Region};
pub use run::{PageRuns, TextRun};
