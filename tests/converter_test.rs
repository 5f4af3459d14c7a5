//! Integration tests for the converter.

mod common;

use ipcdoc::convert::{ConversionStatus, DocumentConverter};
use ipcdoc::model::{ItemLabel, SCHEMA_NAME};
use ipcdoc::{Error, PageSelection, ParseOptions};

#[test]
fn test_convert_bytes_document_structure() {
    let result = DocumentConverter::new()
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf")
        .unwrap();

    assert_eq!(result.status, ConversionStatus::Success);
    assert!(result.errors.is_empty());
    assert_eq!(result.input.file, "ipc.pdf");
    assert_eq!(result.input.page_count, 3);
    assert_eq!(result.input.document_hash.len(), 64);

    let doc = &result.document;
    assert_eq!(doc.schema_name, SCHEMA_NAME);
    assert_eq!(doc.name, "ipc");
    assert_eq!(doc.origin.mimetype, "application/pdf");
    assert_eq!(doc.metadata.page_count, 3);
    assert_eq!(doc.metadata.pdf_version, "1.5");
    assert_eq!(doc.pages.len(), 3);

    assert_eq!(doc.count_label(ItemLabel::Title), 1);
    assert_eq!(doc.count_label(ItemLabel::ChapterHeader), 2);
    assert_eq!(doc.count_label(ItemLabel::SectionHeader), 3);
    assert_eq!(doc.count_label(ItemLabel::PageFooter), 3);
}

#[test]
fn test_text_references_are_consistent() {
    let result = DocumentConverter::new()
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf")
        .unwrap();
    let doc = &result.document;

    for (i, item) in doc.texts.iter().enumerate() {
        assert_eq!(item.self_ref, format!("#/texts/{}", i));
        assert!(doc.page(item.page_no).is_some());
    }

    // Every item is referenced exactly once, in order.
    let mut indices: Vec<usize> = doc
        .body
        .children
        .iter()
        .chain(doc.furniture.children.iter())
        .filter_map(|r| r.index())
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..doc.texts.len()).collect::<Vec<_>>());

    assert!(doc.furniture_items().all(|i| i.label.is_furniture()));
    assert!(doc.body_items().all(|i| !i.label.is_furniture()));
}

#[test]
fn test_convert_file_records_origin() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_ipc_pdf(dir.path());

    let result = DocumentConverter::new().convert(&path).unwrap();
    assert_eq!(result.document.origin.filename, "ipc.pdf");
    assert_eq!(
        result.input.filesize,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn test_page_selection_limits_parsed_pages() {
    let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![2]));
    let result = DocumentConverter::with_options(options)
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf")
        .unwrap();
    let doc = &result.document;

    assert_eq!(doc.metadata.page_count, 3);
    assert_eq!(doc.pages.len(), 1);
    assert!(doc.texts.iter().all(|t| t.page_no == 2));
    assert_eq!(doc.count_label(ItemLabel::SectionHeader), 1);
}

#[test]
fn test_page_selection_out_of_range() {
    let options = ParseOptions::new().with_pages(PageSelection::Range(2..=3));
    let result = DocumentConverter::with_options(options)
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf");
    assert!(result.is_ok());

    // A range running past the last page is rejected, not truncated.
    let options = ParseOptions::new().with_pages(PageSelection::Range(2..=9));
    let result = DocumentConverter::with_options(options)
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf");
    assert!(matches!(result, Err(Error::PageOutOfRange(4, 3))));

    let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![9]));
    let result = DocumentConverter::with_options(options)
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf");
    assert!(matches!(result, Err(Error::PageOutOfRange(9, 3))));
}

#[test]
fn test_unreadable_page_fails_in_strict_mode() {
    let pdf = common::build_pdf_with_unreadable_page(common::IPC_PAGES, 2);

    let result = DocumentConverter::new().convert_bytes(&pdf, "ipc.pdf");
    assert!(matches!(result, Err(Error::TextExtract { page: 2, .. })));
}

#[test]
fn test_unreadable_page_is_recorded_in_lenient_mode() {
    let pdf = common::build_pdf_with_unreadable_page(common::IPC_PAGES, 2);

    let result = DocumentConverter::with_options(ParseOptions::new().lenient())
        .convert_bytes(&pdf, "ipc.pdf")
        .unwrap();

    assert_eq!(result.status, ConversionStatus::PartialSuccess);
    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].page_no, 2);
    assert!(!result.errors[0].message.is_empty());

    let doc = &result.document;
    assert_eq!(doc.pages.len(), 3);
    assert!(doc.page(2).is_some());
    assert!(doc.texts.iter().all(|t| t.page_no != 2));
    assert_eq!(doc.count_label(ItemLabel::SectionHeader), 2);

    let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(value["status"], "partial_success");
    assert_eq!(value["errors"][0]["page_no"], 2);
}

#[test]
fn test_paragraph_continues_on_next_page() {
    let pdf = common::build_pdf(&[
        &[
            "302. Punishment for murder.--Whoever commits murder shall be punished with",
            "1",
        ],
        &["death, or imprisonment for life.", "2"],
    ]);
    let result = DocumentConverter::new().convert_bytes(&pdf, "ipc.pdf").unwrap();
    let doc = &result.document;

    let body: Vec<_> = doc
        .body_items()
        .filter(|i| i.label == ItemLabel::Text)
        .collect();
    assert_eq!(body.len(), 1);
    assert_eq!(
        body[0].text,
        "Whoever commits murder shall be punished with death, or imprisonment for life."
    );
    assert_eq!(body[0].page_no, 1);
    assert_eq!(doc.count_label(ItemLabel::PageFooter), 2);
}

#[test]
fn test_without_furniture_detection() {
    let options = ParseOptions::new().with_furniture_detection(false);
    let result = DocumentConverter::with_options(options)
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf")
        .unwrap();
    assert!(result.document.furniture.children.is_empty());
}

#[test]
fn test_native_json_export() {
    let result = DocumentConverter::new()
        .convert_bytes(&common::ipc_pdf(), "ipc.pdf")
        .unwrap();

    let json = result.to_json().unwrap();
    assert!(!json.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["input"]["page_count"], 3);
    assert_eq!(value["document"]["schema_name"], "IpcDocument");
    assert!(value["timings"]["elapsed_ms"].is_u64());
}

#[test]
fn test_convert_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ipc.pdf");
    std::fs::write(&path, "THE INDIAN PENAL CODE").unwrap();

    let result = DocumentConverter::new().convert(&path);
    assert!(matches!(result, Err(Error::UnknownFormat)));
}
