//! Text run providers.
//!
//! A [`TextRunSource`] hands out the positioned text runs of one document,
//! page by page. A [`DocumentLoader`] turns the document location stored on a
//! marker into such a source.

mod loader;
mod memory;
mod pdf;

pub use loader::FileLoader;
pub use memory::MemorySource;
pub use pdf::LopdfSource;

use std::path::Path;

use crate::detect::{detect_input, InputKind};
use crate::error::Result;
use crate::model::PageRuns;

/// Per-page access to the text runs of one document.
pub trait TextRunSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Read one page (1-indexed): its height at scale 1.0 and its runs in
    /// provider order.
    fn page(&self, number: u32) -> Result<PageRuns>;

    /// Numbers of the pages that hold content, ascending and unique.
    ///
    /// Defaults to every page from 1 to [`TextRunSource::page_count`].
    fn page_numbers(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        Box::new(1..=self.page_count())
    }
}

impl<T: TextRunSource + ?Sized> TextRunSource for Box<T> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page(&self, number: u32) -> Result<PageRuns> {
        (**self).page(number)
    }

    fn page_numbers(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        (**self).page_numbers()
    }
}

/// Resolves a document location to a text run source.
pub trait DocumentLoader {
    /// Load the document at `location`.
    fn load(&self, location: &str) -> Result<Box<dyn TextRunSource>>;
}

/// Open a PDF or runs JSON file, choosing the source from its contents.
pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Box<dyn TextRunSource>> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    open_bytes(&data, Some(path))
}

/// Open a document held in memory. `hint` is only used for its extension.
pub fn open_bytes(data: &[u8], hint: Option<&Path>) -> Result<Box<dyn TextRunSource>> {
    match detect_input(data, hint)? {
        InputKind::Pdf { version } => {
            log::debug!("opening PDF {} ({} bytes)", version, data.len());
            Ok(Box::new(LopdfSource::from_bytes(data)?))
        }
        InputKind::Runs => Ok(Box::new(MemorySource::from_json_slice(data)?)),
    }
}
