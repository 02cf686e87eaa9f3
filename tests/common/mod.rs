#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const BIOLOGY_PAGES: [&[&str]; 2] = [
    &[
        "Photosynthesis converts light energy into chemical energy.",
        "It takes place in the chloroplasts of plant cells.",
    ],
    &[
        "The light reactions produce ATP and NADPH.",
        "The Calvin cycle fixes carbon dioxide into sugar.",
    ],
];

/// A minimal text PDF: one page per entry, one Courier line per string.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build_pdf_with_prologue(pages, &[])
}

/// Like [`build_pdf`], but every content stream starts with a stray `Q`
/// (restore without a matching save).
pub fn build_pdf_unbalanced(pages: &[&[&str]]) -> Vec<u8> {
    build_pdf_with_prologue(pages, &["Q"])
}

fn build_pdf_with_prologue(pages: &[&[&str]], prologue: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Courier".to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));
    let fonts = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(fonts),
    )]));

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations: Vec<Operation> = prologue
            .iter()
            .map(|op| Operation::new(op, vec![]))
            .collect();
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(10)]),
            Operation::new("TL", vec![Object::Integer(14)]),
            Operation::new("Td", vec![Object::Integer(50), Object::Integer(740)]),
        ]);
        for line in lines.iter() {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(line.as_bytes().to_vec(), StringFormat::Literal)],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().unwrap(),
        ));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
    write_bytes(dir, name, &build_pdf(pages))
}

pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Collapses whitespace so assertions don't depend on how the extractor lays out lines.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A `generateContent` response whose text is an array of `count` questions.
pub fn mcq_envelope(count: usize) -> Value {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Which statement about photosynthesis is true? ({})", i + 1),
                "options": [
                    "It happens in mitochondria",
                    "It happens in chloroplasts",
                    "It consumes oxygen",
                    "It produces carbon dioxide"
                ],
                "correct_answer": "B"
            })
        })
        .collect();

    let fenced = format!("```json\n{}\n```", serde_json::to_string(&questions).unwrap());
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": fenced }]
            },
            "finishReason": "STOP"
        }]
    })
}
