//! In-memory provider for pre-extracted runs.

use serde::{Deserialize, Serialize};

use super::TextRunSource;
use crate::error::{Error, Result};
use crate::model::PageRuns;

/// Pages of runs held in memory.
///
/// The JSON form is `{"pages": [{"number", "height", "runs": [...]}]}`;
/// run `x`, `width` and `page` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySource {
    pages: Vec<PageRuns>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pages; page numbers are stamped onto their runs and the
    /// pages are ordered by number.
    pub fn from_pages(pages: Vec<PageRuns>) -> Self {
        let mut source = Self { pages };
        source.normalize();
        source
    }

    /// Add a page.
    pub fn push(&mut self, page: PageRuns) {
        self.pages.push(page);
        self.normalize();
    }

    /// Builder form of [`MemorySource::push`].
    pub fn with_page(mut self, page: PageRuns) -> Self {
        self.push(page);
        self
    }

    /// Parse the JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_slice(json.as_bytes())
    }

    /// Parse the JSON form from raw bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let source: MemorySource =
            serde_json::from_slice(data).map_err(|e| Error::InvalidRunData(e.to_string()))?;

        if let Some(page) = source.pages.iter().find(|p| p.number == 0) {
            return Err(Error::InvalidRunData(format!(
                "page numbers start at 1 (found page {} with {} runs)",
                page.number,
                page.len()
            )));
        }
        if let Some(page) = source.pages.iter().find(|p| !(p.height > 0.0)) {
            return Err(Error::InvalidRunData(format!(
                "page {} has non-positive height {}",
                page.number, page.height
            )));
        }

        Ok(Self::from_pages(source.pages))
    }

    /// Serialize to the JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(e.to_string()))
    }

    /// All pages in ascending order.
    pub fn pages(&self) -> &[PageRuns] {
        &self.pages
    }

    fn normalize(&mut self) {
        self.pages.sort_by_key(|p| p.number);
        for page in &mut self.pages {
            page.normalize_pages();
        }
    }
}

impl TextRunSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.last().map_or(0, |p| p.number)
    }

    fn page(&self, number: u32) -> Result<PageRuns> {
        if number == 0 || number > self.page_count() {
            return Err(Error::PageOutOfRange(number, self.page_count()));
        }
        // Gaps in the numbering read as empty pages of the default height.
        Ok(self
            .pages
            .iter()
            .find(|p| p.number == number)
            .cloned()
            .unwrap_or_else(|| PageRuns::letter(number)))
    }

    /// Only stored pages; gaps in sparse numbering are not walked.
    fn page_numbers(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        let mut previous = None;
        Box::new(
            self.pages
                .iter()
                .map(|p| p.number)
                .filter(move |n| previous.replace(*n) != Some(*n)),
        )
    }
}
