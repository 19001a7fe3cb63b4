//! Paragraph assembly by vertical proximity.

use std::cmp::Ordering;

use crate::model::{Paragraph, Region, TextRun};

/// Group one region's runs into paragraphs.
///
/// Runs are expected top to bottom. A run whose baseline is within
/// `line_threshold` of the previous non-empty run joins the open paragraph;
/// proximity is chained, so each run is compared with the one before it and
/// not with the paragraph's first line. Blank runs are skipped without
/// moving the reference baseline.
///
/// The result is sorted by descending baseline.
pub fn assemble_paragraphs(
    runs: &[TextRun],
    line_threshold: f32,
    page: u32,
    region: Region,
) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut last_y = 0.0_f32;

    for run in runs {
        let text = run.trimmed();
        if text.is_empty() {
            continue;
        }

        match current.as_mut() {
            Some(paragraph) if (run.y - last_y).abs() < line_threshold => paragraph.append(text),
            _ => {
                if let Some(done) = current.take() {
                    paragraphs.push(done);
                }
                current = Some(Paragraph {
                    text: text.to_string(),
                    y: run.y,
                    page,
                    region,
                });
            }
        }
        last_y = run.y;
    }

    if let Some(done) = current {
        paragraphs.push(done);
    }

    paragraphs.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));
    paragraphs
}
