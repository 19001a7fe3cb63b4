//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A line of text placed at (x, y) in 10pt Helvetica.
pub type Line<'a> = (f32, f32, &'a str);

/// Build a PDF whose pages hold the given lines.
///
/// The MediaBox (A4, 842pt high) sits on the page tree root so every page
/// inherits it.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (x, y, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 595.into(), 842.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => media_box,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Build a one-page PDF whose `/Contents` is an array with one stream per
/// line. Every second stream is Flate-compressed.
pub fn build_split_content_pdf(lines: &[Line<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut contents: Vec<Object> = Vec::new();
    for (i, (x, y, text)) in lines.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 10.into()]),
                Operation::new("Td", vec![(*x).into(), (*y).into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let mut stream = Stream::new(dictionary! {}, content.encode().unwrap());
        if i % 2 == 1 {
            // Pad so compression pays off and the filter is actually set.
            let mut data = stream.content.clone();
            data.extend(std::iter::repeat(b' ').take(512));
            stream.set_content(data);
            stream.compress().unwrap();
        }
        contents.push(doc.add_object(stream).into());
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => contents,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
    let kids: Vec<Object> = vec![page_id.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 1,
            "MediaBox" => media_box,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page report with a footnote that continues onto the second page.
pub fn sample_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            (72.0, 780.0, "Harbour Works"),
            (72.0, 740.0, "Annual report, 1911"),
            (72.0, 600.0, "The basin was dredged twice 1."),
            (72.0, 150.0, "1. Port authority records,"),
        ],
        vec![
            (72.0, 780.0, "Silt returned within a decade 2."),
            (72.0, 200.0, "volume three."),
            (72.0, 120.0, "2. Survey of 1921."),
        ],
    ])
}
