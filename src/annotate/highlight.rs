//! Keyword highlighting of excerpt markup.
//!
//! Each rule becomes one rewrite step. Steps run in list order over the
//! whole string, so a later keyword can match inside markup inserted by an
//! earlier step.

use crate::model::{HighlightRule, HighlightTarget};

/// One literal keyword rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightStep<'a> {
    /// Wrap the keyword in a link to an external page
    Link { keyword: &'a str, url: &'a str },
    /// Wrap the keyword in a span pointing at another marker
    Mark { keyword: &'a str, index: usize },
}

impl<'a> HighlightStep<'a> {
    /// Build the step for a rule, or `None` if the rule cannot be applied.
    pub fn from_rule(rule: &'a HighlightRule) -> Option<Self> {
        if rule.keyword.is_empty() {
            log::warn!("ignoring highlight rule with an empty keyword");
            return None;
        }
        match (&rule.target, rule.url.as_deref()) {
            (HighlightTarget::Url, Some(url)) => Some(HighlightStep::Link {
                keyword: &rule.keyword,
                url,
            }),
            (HighlightTarget::Url, None) => {
                log::warn!("url highlight for {:?} has no url, skipping", rule.keyword);
                None
            }
            (HighlightTarget::Marker(index), _) => Some(HighlightStep::Mark {
                keyword: &rule.keyword,
                index: *index,
            }),
            (HighlightTarget::Unsupported(value), _) => {
                log::warn!(
                    "highlight for {:?} has unusable target {}, skipping",
                    rule.keyword,
                    value
                );
                None
            }
        }
    }

    /// The literal text this step looks for.
    pub fn keyword(&self) -> &'a str {
        match self {
            HighlightStep::Link { keyword, .. } | HighlightStep::Mark { keyword, .. } => keyword,
        }
    }

    /// Markup that replaces each occurrence of the keyword.
    pub fn replacement(&self) -> String {
        match self {
            HighlightStep::Link { keyword, url } => format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                url, keyword
            ),
            HighlightStep::Mark { keyword, index } => format!(
                "<span class=\"marker-highlight\" data-marker=\"{}\">{}</span>",
                index, keyword
            ),
        }
    }

    /// Replace every occurrence of the keyword, left to right.
    pub fn apply(&self, html: &str) -> String {
        html.replace(self.keyword(), &self.replacement())
    }
}

/// Apply highlight rules in order.
pub fn apply_highlights(html: &str, rules: &[HighlightRule]) -> String {
    rules
        .iter()
        .filter_map(HighlightStep::from_rule)
        .fold(html.to_string(), |acc, step| step.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rule() {
        let rules = vec![HighlightRule::url("archive", "https://example.org/a")];
        assert_eq!(
            apply_highlights("<p>the archive</p>", &rules),
            "<p>the <a href=\"https://example.org/a\" target=\"_blank\" \
             rel=\"noopener noreferrer\">archive</a></p>"
        );
    }

    #[test]
    fn test_marker_rule_every_occurrence() {
        let rules = vec![HighlightRule::marker("mill", 3)];
        let out = apply_highlights("mill and mill", &rules);
        assert_eq!(out.matches("data-marker=\"3\"").count(), 2);
    }

    #[test]
    fn test_rules_apply_in_order_over_inserted_markup() {
        // The second rule matches the class attribute inserted by the first.
        let rules = vec![
            HighlightRule::marker("river", 1),
            HighlightRule::marker("marker", 2),
        ];
        let out = apply_highlights("river", &rules);
        let second = "<span class=\"marker-highlight\" data-marker=\"2\">marker</span>";
        assert_eq!(
            out,
            format!(
                "<span class=\"{0}-highlight\" data-{0}=\"1\">river</span>",
                second
            )
        );
    }

    #[test]
    fn test_keyword_is_literal() {
        let rules = vec![HighlightRule::marker("a.c", 0)];
        assert_eq!(apply_highlights("abc", &rules), "abc");
        assert_eq!(
            apply_highlights("a.c", &rules),
            "<span class=\"marker-highlight\" data-marker=\"0\">a.c</span>"
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let rules = vec![HighlightRule::url("fee", "https://x.org/$1?q=$&")];
        let out = apply_highlights("fee", &rules);
        assert!(out.contains("href=\"https://x.org/$1?q=$&\""));
    }

    #[test]
    fn test_unusable_rules_skipped() {
        let mut no_url = HighlightRule::url("word", "");
        no_url.url = None;
        let empty = HighlightRule::marker("", 1);
        assert_eq!(apply_highlights("word", &[no_url, empty]), "word");
    }

    #[test]
    fn test_unsupported_target_skipped_others_applied() {
        let bad = HighlightRule {
            keyword: "quay".to_string(),
            target: HighlightTarget::Unsupported(serde_json::json!(-1)),
            url: None,
        };
        let rules = vec![bad, HighlightRule::marker("mill", 2)];
        assert_eq!(
            apply_highlights("quay and mill", &rules),
            "quay and <span class=\"marker-highlight\" data-marker=\"2\">mill</span>"
        );
    }
}
