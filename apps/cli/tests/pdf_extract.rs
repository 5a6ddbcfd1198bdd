//! End-to-end extraction from generated PDFs.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;
use vocab_core::{extract, Entry, TextSource};
use vocab_deck::commands::load_entries;
use vocab_deck::pdf::{PdfDocument, PdfError};

/// Build a PDF with one text line per string, one page per slice.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
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
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in lines.iter() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// One page whose content selects a font the page resources never define.
fn build_pdf_with_missing_font() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F9".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
            Operation::new("Tj", vec![Object::string_literal("1. abase (verb)")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {},
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

const WORD_PAGE: &[&str] = &[
    "1. abase (verb)",
    "Meaning: lower in position",
    "Example: He would not abase himself.",
    "2. abate (verb)",
    "Meaning: subside",
    "Example: The storm abated.",
];

#[test]
fn test_blank_pages_read_as_none() {
    let bytes = build_pdf(&[WORD_PAGE, &[]]);
    let doc = PdfDocument::from_bytes("list.pdf", &bytes).unwrap();

    assert_eq!(doc.page_count(), 2);
    assert!(doc.page_text(0).unwrap().is_some());
    assert_eq!(doc.page_text(1).unwrap(), None);
    assert_eq!(doc.page_text(5).unwrap(), None);
}

#[test]
fn test_extract_entries_from_pdf() {
    let bytes = build_pdf(&[WORD_PAGE, &[]]);
    let doc = PdfDocument::from_bytes("list.pdf", &bytes).unwrap();

    let entries = extract(&doc).unwrap();

    assert_eq!(
        entries,
        vec![
            Entry::new("abase", "lower in position", "He would not abase himself."),
            Entry::new("abate", "subside", "The storm abated."),
        ]
    );
}

#[test]
fn test_entry_split_across_pages() {
    let bytes = build_pdf(&[
        &["1. ebullient (adj)", "Meaning: overflowing with enthusiasm"],
        &["Example: She was ebullient after the win."],
    ]);
    let doc = PdfDocument::from_bytes("split.pdf", &bytes).unwrap();

    let entries = extract(&doc).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "ebullient");
    assert_eq!(entries[0].example, "She was ebullient after the win.");
}

#[test]
fn test_load_entries_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GRE 1.pdf");
    std::fs::write(&path, build_pdf(&[WORD_PAGE])).unwrap();

    let entries = load_entries(&path).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].term, "abate");
}

#[test]
fn test_load_entries_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, build_pdf(&[&["Just some prose.", "Nothing numbered."]])).unwrap();

    let err = load_entries(&path).unwrap_err();

    assert!(err.to_string().starts_with("No words were parsed from"));
}

#[test]
fn test_missing_font_is_extract_error() {
    let bytes = build_pdf_with_missing_font();

    let err = PdfDocument::from_bytes("broken.pdf", &bytes).unwrap_err();

    match err {
        PdfError::Extract { path, message } => {
            assert_eq!(path, std::path::PathBuf::from("broken.pdf"));
            assert_eq!(message, "PDF extraction panicked (malformed PDF)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_load_entries_reports_malformed_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, build_pdf_with_missing_font()).unwrap();

    let err = load_entries(&path).unwrap_err();

    assert!(err.to_string().contains("PDF extraction panicked"));
}
