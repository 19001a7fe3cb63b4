//! Rendering of reconstructed documents.
//!
//! Body paragraphs get their footnote references linked and are emitted as
//! HTML together with an aggregated footnote block. JSON output is available
//! for every serializable result.

mod html;
mod json;
mod linker;
mod result;

pub use html::{footnotes_html, main_html, render_document};
pub use json::{to_json, JsonFormat};
pub use linker::link_references;
pub use result::{DocumentOutput, ReconstructionStats};
