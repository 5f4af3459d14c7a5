//! Fixture PDFs built in memory with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

/// A small excerpt laid out the way the printed Code is.
pub const IPC_PAGES: &[&[&str]] = &[
    &[
        "THE INDIAN PENAL CODE",
        "CHAPTER XVI",
        "OF OFFENCES AFFECTING THE HUMAN BODY",
        "299. Culpable homicide.--Whoever causes death by doing an act with the intention of causing death.",
        "1",
    ],
    &[
        "302. Punishment for murder.--Whoever commits murder shall be punished with death,",
        "or imprisonment for life.",
        "2",
    ],
    &[
        "CHAPTER XVII",
        "OF OFFENCES AGAINST PROPERTY",
        "378. Theft.--Whoever, intending to take dishonestly any movable property.",
        "(a) A cuts down a tree on Z's ground.",
        "3",
    ],
];

/// Build a PDF with one text object per line.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build(pages, None)
}

/// Like [`build_pdf`], but page `page_no` selects its font with a number
/// instead of a name, so its text cannot be extracted.
pub fn build_pdf_with_unreadable_page(pages: &[&[&str]], page_no: u32) -> Vec<u8> {
    build(pages, Some(page_no))
}

fn build(pages: &[&[&str]], unreadable: Option<u32>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for (n, lines) in pages.iter().enumerate() {
        let font: Object = if unreadable == Some(n as u32 + 1) {
            12.into()
        } else {
            "F1".into()
        };
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 780 - 18 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.clone(), 11.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(line.as_bytes().to_vec(), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// The IPC excerpt as PDF bytes.
pub fn ipc_pdf() -> Vec<u8> {
    build_pdf(IPC_PAGES)
}

/// Write the IPC excerpt to `dir/ipc.pdf`.
pub fn write_ipc_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("ipc.pdf");
    std::fs::write(&path, ipc_pdf()).unwrap();
    path
}
