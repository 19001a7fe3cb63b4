//! Reconstruction of paragraphs and footnotes from text runs.

mod assembler;
mod footnote;
mod isolated;
mod options;
mod pipeline;
mod region;

pub use assembler::assemble_paragraphs;
pub use footnote::{parse_footnote_start, reconstruct_footnotes, FootnoteReport};
pub use isolated::merge_isolated_numbers;
pub use options::{
    ErrorMode, PageSelection, ReconstructOptions, DEFAULT_FOOTER_RATIO,
    DEFAULT_ISOLATED_NUMBER_MAX_WIDTH, DEFAULT_LINE_THRESHOLD,
};
pub use pipeline::{
    process_pages, reconstruct, reconstruct_page, DocumentAccumulator, PageParagraphs,
    Reconstruction,
};
pub use region::{classify_regions, sort_top_down, RegionSplit};
