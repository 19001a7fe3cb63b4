//! Integration tests for marker annotation.

mod common;

use std::fs;
use std::path::Path;

use pdfexcerpt::annotate::annotate_markers_with_progress;
use pdfexcerpt::{
    annotate_maps, annotate_markers, AnnotateOptions, FileLoader, HighlightRule, MapsData,
    Marker, FAILED_EXCERPT,
};

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("harbour.pdf"), common::sample_report()).unwrap();
    fs::write(docs.join("broken.pdf"), b"%PDF-1.4\nthis is not a pdf body").unwrap();
    dir
}

fn loader(root: &Path) -> FileLoader {
    FileLoader::new(root)
}

#[test]
fn test_annotates_marker_with_highlights() {
    let dir = site();
    let mut markers = vec![Marker::new("Harbour")
        .with_document("/docs/harbour.pdf")
        .with_highlight(HighlightRule::url("Port authority", "https://example.org/port"))
        .with_highlight(HighlightRule::marker("basin", 2))];

    let report = annotate_markers(&mut markers, &loader(dir.path()), &AnnotateOptions::default());
    assert_eq!(report.annotated, 1);

    let marker = &markers[0];
    assert_eq!(marker.full_title.as_deref(), Some("Harbour Works"));

    let excerpt = marker.excerpt.as_deref().unwrap();
    assert!(excerpt.starts_with("<h1 data-page=\"1\">Harbour Works</h1>"));
    assert!(excerpt.contains(
        "<a href=\"https://example.org/port\" target=\"_blank\" \
         rel=\"noopener noreferrer\">Port authority</a> records"
    ));
    assert!(excerpt.contains(
        "The <span class=\"marker-highlight\" data-marker=\"2\">basin</span> was dredged"
    ));
}

#[test]
fn test_failure_isolation_across_markers() {
    let dir = site();
    let mut markers = vec![
        Marker::new("A").with_document("/docs/harbour.pdf"),
        Marker::new("B").with_document("/docs/broken.pdf"),
        Marker::new("C").with_document("/docs/harbour.pdf"),
        Marker::new("D"),
    ];

    let mut order = Vec::new();
    let report = annotate_markers_with_progress(
        &mut markers,
        &loader(dir.path()),
        &AnnotateOptions::default(),
        |_, _, marker| order.push(marker.title.clone()),
    );

    assert_eq!(order, vec!["A", "B", "C", "D"]);
    assert_eq!(report.annotated, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.total(), 4);

    assert_eq!(markers[1].excerpt.as_deref(), Some(FAILED_EXCERPT));
    assert_eq!(markers[1].full_title.as_deref(), Some("B"));
    assert_eq!(markers[0].excerpt, markers[2].excerpt);
    assert!(markers[3].excerpt.is_none());
    assert_eq!(markers[3].full_title.as_deref(), Some("D"));
}

#[test]
fn test_missing_document_uses_placeholder() {
    let dir = site();
    let mut markers = vec![Marker::new("Gone").with_document("/docs/missing.pdf")];
    let report = annotate_markers(&mut markers, &loader(dir.path()), &AnnotateOptions::default());

    assert!(report.has_failures());
    assert_eq!(report.failures[0].title, "Gone");
    assert_eq!(markers[0].excerpt.as_deref(), Some(FAILED_EXCERPT));
}

#[test]
fn test_region_data_round_trip() {
    let dir = site();
    let raw = r#"{
        "maps": [
            {
                "id": 1,
                "title": "Coast",
                "overlay": {"url": "coast.png", "opacity": 0.6},
                "markers": [
                    {
                        "title": "Harbour",
                        "coordinates": [54.97, -1.6],
                        "image": "harbour.jpg",
                        "pdfUrl": "/docs/harbour.pdf",
                        "pdfHighlights": [{"keyword": "Silt", "markerIdx": 0}]
                    }
                ]
            },
            {
                "id": 2,
                "title": "Inland",
                "markers": [{"title": "Mill", "pdfUrl": "/docs/broken.pdf"}]
            }
        ]
    }"#;
    let mut data: MapsData = serde_json::from_str(raw).unwrap();

    let report = annotate_maps(&mut data, Some(1), &loader(dir.path()), &AnnotateOptions::default());
    assert_eq!(report.annotated, 1);
    assert_eq!(report.total(), 1);

    let value = serde_json::to_value(&data).unwrap();
    let marker = &value["maps"][0]["markers"][0];
    assert_eq!(marker["coordinates"][0], 54.97);
    assert_eq!(marker["image"], "harbour.jpg");
    assert_eq!(marker["documentUrl"], "/docs/harbour.pdf");
    assert_eq!(marker["fullTitle"], "Harbour Works");
    assert!(marker["excerpt"]
        .as_str()
        .unwrap()
        .contains("<span class=\"marker-highlight\" data-marker=\"0\">Silt</span>"));
    assert_eq!(value["maps"][0]["overlay"]["opacity"], 0.6);

    // Region 2 was not selected.
    assert!(value["maps"][1]["markers"][0].get("excerpt").is_none());
}

#[test]
fn test_unusable_highlight_target_does_not_block_region() {
    let dir = site();
    let raw = r#"{
        "maps": [{
            "id": 1,
            "title": "Coast",
            "markers": [{
                "title": "Harbour",
                "pdfUrl": "/docs/harbour.pdf",
                "pdfHighlights": [
                    {"keyword": "basin", "markerIdx": -1},
                    {"keyword": "Silt", "markerIdx": null},
                    {"keyword": "decade", "markerIdx": 3}
                ]
            }]
        }]
    }"#;
    let mut data: MapsData = serde_json::from_str(raw).unwrap();

    let report = annotate_maps(&mut data, None, &loader(dir.path()), &AnnotateOptions::default());
    assert_eq!(report.annotated, 1);

    let excerpt = data.maps[0].markers[0].excerpt.as_deref().unwrap();
    assert!(excerpt.contains("The basin was dredged"));
    assert!(excerpt.contains("<p data-page=\"2\">Silt returned"));
    assert!(excerpt.contains("<span class=\"marker-highlight\" data-marker=\"3\">decade</span>"));

    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["maps"][0]["markers"][0]["highlights"][0]["targetKind"], -1);
}
