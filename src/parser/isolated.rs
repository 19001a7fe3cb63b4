//! Repair of footnote reference digits stranded in their own run.
//!
//! Text extraction sometimes emits the superscript digit after a word as a
//! separate, very narrow run. Left alone, paragraph assembly would place it
//! as a free-standing token. Merging it onto the following run's text keeps
//! it attached to the prose it belongs to.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::TextRun;

fn short_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,2}$").expect("valid regex"))
}

fn bare_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("valid regex"))
}

/// Merge narrow 1-2 digit runs into the following run.
///
/// A run is merged when its trimmed text is a 1-2 digit number, its width is
/// below `max_width`, its baseline is above `min_y`, and the next run's
/// trimmed text is not itself a bare number. The digits are appended to the
/// next run (`"word" + "3"` gives `"word3"`) and the run itself is dropped.
///
/// Returns the surviving runs in order and the number of merges performed.
pub fn merge_isolated_numbers(
    runs: Vec<TextRun>,
    min_y: f32,
    max_width: f32,
) -> (Vec<TextRun>, usize) {
    let mut kept = Vec::with_capacity(runs.len());
    let mut merged = 0;
    let mut iter = runs.into_iter().peekable();

    while let Some(run) = iter.next() {
        if let Some(next) = iter.peek_mut() {
            if is_stranded(&run, next, min_y, max_width) {
                next.text = format!("{}{}", next.trimmed(), run.trimmed());
                log::debug!(
                    "merged isolated number {:?} into run at y={} on page {}",
                    run.trimmed(),
                    next.y,
                    next.page
                );
                merged += 1;
                continue;
            }
        }
        kept.push(run);
    }

    (kept, merged)
}

fn is_stranded(run: &TextRun, next: &TextRun, min_y: f32, max_width: f32) -> bool {
    short_number().is_match(run.trimmed())
        && run.width < max_width
        && run.y > min_y
        && !bare_number().is_match(next.trimmed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[TextRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_merges_into_following_run() {
        let runs = vec![
            TextRun::new("the treaty", 600.0, 80.0),
            TextRun::new("3", 600.0, 4.0),
            TextRun::new(" was signed ", 600.0, 60.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 1);
        assert_eq!(texts(&out), vec!["the treaty", "was signed3"]);
    }

    #[test]
    fn test_wide_number_passes_through() {
        let runs = vec![
            TextRun::new("12", 600.0, 14.0),
            TextRun::new("apples", 600.0, 30.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(texts(&out), vec!["12", "apples"]);
    }

    #[test]
    fn test_next_bare_number_blocks_merge() {
        let runs = vec![
            TextRun::new("4", 600.0, 4.0),
            TextRun::new("1995", 600.0, 20.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_below_threshold_not_merged() {
        let runs = vec![
            TextRun::new("4", 200.0, 4.0),
            TextRun::new("text", 200.0, 20.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(texts(&out), vec!["4", "text"]);
    }

    #[test]
    fn test_width_limit_is_exclusive() {
        let runs = vec![
            TextRun::new("5", 600.0, 10.0),
            TextRun::new("word", 600.0, 20.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(texts(&out), vec!["5", "word"]);

        let runs = vec![
            TextRun::new("5", 600.0, 9.99),
            TextRun::new("word", 600.0, 20.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 1);
        assert_eq!(texts(&out), vec!["word5"]);
    }

    #[test]
    fn test_baseline_on_threshold_not_merged() {
        let runs = vec![
            TextRun::new("6", 240.0, 4.0),
            TextRun::new("word", 240.0, 20.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(texts(&out), vec!["6", "word"]);
    }

    #[test]
    fn test_last_run_never_merged() {
        let runs = vec![
            TextRun::new("word", 600.0, 20.0),
            TextRun::new("7", 600.0, 4.0),
        ];
        let (out, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
        assert_eq!(texts(&out), vec!["word", "7"]);
    }

    #[test]
    fn test_three_digits_not_merged() {
        let runs = vec![
            TextRun::new("123", 600.0, 4.0),
            TextRun::new("word", 600.0, 20.0),
        ];
        let (_, merged) = merge_isolated_numbers(runs, 240.0, 10.0);
        assert_eq!(merged, 0);
    }
}
