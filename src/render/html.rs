//! HTML markup for reconstructed documents.

use super::linker::link_references;
use super::result::DocumentOutput;
use crate::model::{FootnoteTable, Paragraph};
use crate::parser::Reconstruction;

/// Render body and footnotes of a reconstructed document.
pub fn render_document(doc: &Reconstruction) -> DocumentOutput {
    let (main_html, linked) = main_html(&doc.main, &doc.footnotes);
    let mut stats = doc.stats;
    stats.linked_reference_count = linked as u32;
    DocumentOutput::new(main_html, footnotes_html(&doc.footnotes), stats)
}

/// Render body paragraphs with footnote references linked.
///
/// The first paragraph becomes the `<h1>`, the second an italic `<p>`, and
/// the rest plain `<p>` elements, each tagged with its source page. Returns
/// the markup and the number of references linked.
pub fn main_html(paragraphs: &[Paragraph], footnotes: &FootnoteTable) -> (String, usize) {
    let mut linked = 0;
    let lines: Vec<String> = paragraphs
        .iter()
        .enumerate()
        .map(|(index, paragraph)| {
            let (text, count) = link_references(&paragraph.text, footnotes);
            linked += count;
            match index {
                0 => format!("<h1 data-page=\"{}\">{}</h1>", paragraph.page, text),
                1 => format!(
                    "<p data-page=\"{}\" style=\"font-style: italic;\">{}</p>",
                    paragraph.page, text
                ),
                _ => format!("<p data-page=\"{}\">{}</p>", paragraph.page, text),
            }
        })
        .collect();

    (lines.join("\n"), linked)
}

/// Render the aggregated footnote block, sorted by footnote number.
///
/// Returns an empty string when there are no footnotes.
pub fn footnotes_html(footnotes: &FootnoteTable) -> String {
    if footnotes.is_empty() {
        return String::new();
    }

    let items: Vec<String> = footnotes
        .sorted()
        .into_iter()
        .map(|(number, text)| format!("<p class=\"footnote\"><sup>{}</sup> {}</p>", number, text))
        .collect();

    format!(
        "<div class=\"aggregated-footnotes\"><hr>\n{}\n</div>",
        items.join("\n")
    )
}
