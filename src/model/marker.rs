//! Map markers and region data as consumed by the annotator.
//!
//! Only the fields the annotator reads or writes are typed. Everything else
//! (coordinates, images, overlay settings, ...) is carried through untouched
//! so a region data file can be annotated and written back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Where a highlighted keyword points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTarget", into = "RawTarget")]
pub enum HighlightTarget {
    /// An external URL, taken from [`HighlightRule::url`]
    Url,
    /// Another marker of the same region, by index
    Marker(usize),
    /// Any other value (negative index, null, unknown kind), kept verbatim
    /// so the data file round-trips; rules with this target are not applied
    Unsupported(Value),
}

impl Default for HighlightTarget {
    fn default() -> Self {
        HighlightTarget::Unsupported(Value::Null)
    }
}

/// Wire form of [`HighlightTarget`]: the string `"url"` or a marker index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Index(usize),
    Kind(String),
    Other(Value),
}

impl From<RawTarget> for HighlightTarget {
    fn from(raw: RawTarget) -> Self {
        match raw {
            RawTarget::Index(idx) => HighlightTarget::Marker(idx),
            RawTarget::Kind(kind) if kind.eq_ignore_ascii_case("url") => HighlightTarget::Url,
            RawTarget::Kind(kind) => match kind.trim().parse::<usize>() {
                Ok(idx) => HighlightTarget::Marker(idx),
                Err(_) => HighlightTarget::Unsupported(Value::String(kind)),
            },
            RawTarget::Other(value) => HighlightTarget::Unsupported(value),
        }
    }
}

impl From<HighlightTarget> for RawTarget {
    fn from(target: HighlightTarget) -> Self {
        match target {
            HighlightTarget::Url => RawTarget::Kind("url".to_string()),
            HighlightTarget::Marker(idx) => RawTarget::Index(idx),
            HighlightTarget::Unsupported(value) => RawTarget::Other(value),
        }
    }
}

/// A keyword substitution applied to a marker's excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRule {
    /// Literal text to find
    pub keyword: String,

    /// Link target kind
    #[serde(default, rename = "targetKind", alias = "markerIdx")]
    pub target: HighlightTarget,

    /// URL for [`HighlightTarget::Url`] rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HighlightRule {
    /// Rule linking `keyword` to an external URL.
    pub fn url(keyword: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            target: HighlightTarget::Url,
            url: Some(url.into()),
        }
    }

    /// Rule highlighting `keyword` as a reference to another marker.
    pub fn marker(keyword: impl Into<String>, index: usize) -> Self {
        Self {
            keyword: keyword.into(),
            target: HighlightTarget::Marker(index),
            url: None,
        }
    }
}

/// A map marker that may reference a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Marker title, also the fallback display title
    #[serde(default)]
    pub title: String,

    /// Location of the linked document
    #[serde(default, alias = "pdfUrl", skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,

    /// Keyword substitutions, applied in order
    #[serde(default, alias = "pdfHighlights", skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<HighlightRule>,

    /// Display title derived from the document heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_title: Option<String>,

    /// Reconstructed, highlighted document markup
    #[serde(default, alias = "pdfExcerpt", skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Fields the annotator does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Marker {
    /// Create a marker with a title only.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Attach a document location.
    pub fn with_document(mut self, url: impl Into<String>) -> Self {
        self.document_url = Some(url.into());
        self
    }

    /// Append a highlight rule.
    pub fn with_highlight(mut self, rule: HighlightRule) -> Self {
        self.highlights.push(rule);
        self
    }

    /// Title to display: the derived one when set, else the marker title.
    pub fn display_title(&self) -> &str {
        self.full_title.as_deref().unwrap_or(&self.title)
    }
}

/// One map region with its markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    /// Region identifier
    #[serde(default)]
    pub id: u32,

    /// Region title
    #[serde(default)]
    pub title: String,

    /// Markers of the region
    #[serde(default)]
    pub markers: Vec<Marker>,

    /// Fields the annotator does not interpret (overlay, bounds, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Top-level region data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapsData {
    /// All regions
    #[serde(default)]
    pub maps: Vec<RegionData>,

    /// Fields the annotator does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MapsData {
    /// Find a region by id.
    pub fn region(&self, id: u32) -> Option<&RegionData> {
        self.maps.iter().find(|m| m.id == id)
    }

    /// Find a region by id, mutably.
    pub fn region_mut(&mut self, id: u32) -> Option<&mut RegionData> {
        self.maps.iter_mut().find(|m| m.id == id)
    }
}
