//! Display title taken from the excerpt heading.

use std::sync::OnceLock;

use regex::Regex;

fn first_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").expect("valid regex"))
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

/// Text content of the first `<h1>`, if present and not blank.
pub fn heading_title(html: &str) -> Option<String> {
    let inner = first_heading().captures(html)?.get(1)?.as_str();
    let text = any_tag().replace_all(inner, "");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_title() {
        let html = "<h1 data-page=\"1\">The Mill<sup>1</sup></h1>\n<p data-page=\"1\">x</p>";
        assert_eq!(heading_title(html), Some("The Mill1".to_string()));
    }

    #[test]
    fn test_first_heading_only() {
        let html = "<h1>One</h1><h1>Two</h1>";
        assert_eq!(heading_title(html), Some("One".to_string()));
    }

    #[test]
    fn test_missing_or_blank_heading() {
        assert_eq!(heading_title("<p>body</p>"), None);
        assert_eq!(heading_title("<h1 data-page=\"2\">  </h1>"), None);
        assert_eq!(heading_title(""), None);
    }
}
