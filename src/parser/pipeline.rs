//! Document reconstruction as a fold over pages.
//!
//! Every page is classified, repaired and assembled on its own. The
//! resulting paragraphs are threaded through a [`DocumentAccumulator`] in
//! ascending page order, and the footnote table is built once all footer
//! paragraphs of the document are known.

use serde::{Deserialize, Serialize};

use super::assembler::assemble_paragraphs;
use super::footnote::reconstruct_footnotes;
use super::isolated::merge_isolated_numbers;
use super::options::{ErrorMode, ReconstructOptions};
use super::region::classify_regions;
use crate::error::Result;
use crate::model::{FootnoteTable, PageRuns, Paragraph, Region};
use crate::render::ReconstructionStats;
use crate::source::TextRunSource;

/// Reconstructed document before rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Body paragraphs in reading order
    pub main: Vec<Paragraph>,

    /// Footer paragraphs in reading order
    pub footers: Vec<Paragraph>,

    /// Footnotes built from the footer paragraphs
    pub footnotes: FootnoteTable,

    /// Counters collected along the way
    pub stats: ReconstructionStats,
}

impl Reconstruction {
    /// Check if no body text and no footnotes were found.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.footnotes.is_empty()
    }

    /// The first body paragraph, used as the document heading.
    pub fn heading(&self) -> Option<&Paragraph> {
        self.main.first()
    }
}

/// Paragraphs assembled from a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageParagraphs {
    /// Body paragraphs, top to bottom
    pub main: Vec<Paragraph>,
    /// Footer paragraphs, top to bottom
    pub footers: Vec<Paragraph>,
    /// Runs read from the page
    pub run_count: usize,
    /// Isolated numbers merged on this page
    pub merged_numbers: usize,
}

/// Classify, repair and assemble one page.
pub fn reconstruct_page(page: PageRuns, options: &ReconstructOptions) -> PageParagraphs {
    let number = page.number;
    let run_count = page.len();
    let threshold = options.footer_threshold(page.height);

    let split = classify_regions(page.runs, threshold);
    let (main_runs, merged_numbers) =
        merge_isolated_numbers(split.main, threshold, options.isolated_number_max_width);

    let main = assemble_paragraphs(&main_runs, options.line_threshold, number, Region::Main);
    let footers = assemble_paragraphs(&split.footer, options.line_threshold, number, Region::Footer);

    log::debug!(
        "page {}: {} runs, {} body paragraphs, {} footer paragraphs, {} merged numbers",
        number,
        run_count,
        main.len(),
        footers.len(),
        merged_numbers
    );

    PageParagraphs {
        main,
        footers,
        run_count,
        merged_numbers,
    }
}

/// Accumulated paragraphs of the pages seen so far.
#[derive(Debug, Clone, Default)]
pub struct DocumentAccumulator {
    main: Vec<Paragraph>,
    footers: Vec<Paragraph>,
    stats: ReconstructionStats,
}

impl DocumentAccumulator {
    /// Start an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one page into the document.
    pub fn absorb_page(mut self, page: PageRuns, options: &ReconstructOptions) -> Self {
        let page = reconstruct_page(page, options);
        self.stats.page_count += 1;
        self.stats.run_count += page.run_count as u32;
        self.stats.merged_number_count += page.merged_numbers as u32;
        self.stats.main_paragraph_count += page.main.len() as u32;
        self.stats.footer_paragraph_count += page.footers.len() as u32;
        self.main.extend(page.main);
        self.footers.extend(page.footers);
        self
    }

    /// Record a page that could not be read.
    pub fn skip_page(mut self) -> Self {
        self.stats.skipped_page_count += 1;
        self
    }

    /// Build the footnote table and finish the document.
    pub fn finish(self) -> Reconstruction {
        let (footnotes, report) = reconstruct_footnotes(&self.footers);

        let mut stats = self.stats;
        stats.footnote_count = footnotes.len() as u32;
        stats.split_footnote_count = report.split_off as u32;
        stats.dropped_footer_count = report.dropped as u32;

        Reconstruction {
            main: self.main,
            footers: self.footers,
            footnotes,
            stats,
        }
    }
}

/// Reconstruct a document from pages given in ascending page order.
pub fn process_pages<I>(pages: I, options: &ReconstructOptions) -> Reconstruction
where
    I: IntoIterator<Item = PageRuns>,
{
    pages
        .into_iter()
        .filter(|page| options.pages.includes(page.number))
        .fold(DocumentAccumulator::new(), |doc, page| doc.absorb_page(page, options))
        .finish()
}

/// Read the selected pages of a source and reconstruct the document.
///
/// In strict mode the first unreadable page fails the whole document; in
/// lenient mode it is logged and skipped.
pub fn reconstruct<S>(source: &S, options: &ReconstructOptions) -> Result<Reconstruction>
where
    S: TextRunSource + ?Sized,
{
    let page_count = source.page_count();
    let mut doc = DocumentAccumulator::new();

    for number in source
        .page_numbers()
        .filter(|n| options.pages.includes(*n))
    {
        doc = match source.page(number) {
            Ok(page) => doc.absorb_page(page, options),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("skipping page {} of {}: {}", number, page_count, e);
                doc.skip_page()
            }
            Err(e) => return Err(e),
        };
    }

    Ok(doc.finish())
}
