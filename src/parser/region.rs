//! Main body / footer split of a page's runs.

use std::cmp::Ordering;

use crate::model::TextRun;

/// Runs of one page split by region, each in top-to-bottom order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSplit {
    /// Runs at or above the footer threshold
    pub main: Vec<TextRun>,
    /// Runs below the footer threshold
    pub footer: Vec<TextRun>,
}

/// Sort runs top to bottom (descending baseline y).
///
/// The sort is stable, so runs sharing a baseline keep provider order.
pub fn sort_top_down(runs: &mut [TextRun]) {
    runs.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));
}

/// Split a page's runs into main and footer regions.
///
/// A run is footer iff its baseline is strictly below `threshold`
/// (`page_height * footer_ratio`).
pub fn classify_regions(mut runs: Vec<TextRun>, threshold: f32) -> RegionSplit {
    sort_top_down(&mut runs);
    let (footer, main) = runs.into_iter().partition(|run| run.y < threshold);
    RegionSplit { main, footer }
}
