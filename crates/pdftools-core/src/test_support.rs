//! In-memory PDF fixtures shared by the unit tests

use lopdf::{
    content::{Content, Operation},
    dictionary, Dictionary, Document, Object, Stream, StringFormat,
};

/// Description of a single fixture page
#[derive(Clone, Default)]
pub(crate) struct TestPage {
    lines: Vec<String>,
    annotations: Vec<String>,
    operations: Vec<Operation>,
    indirect_annots: bool,
    annots_override: Option<AnnotsOverride>,
}

/// Raw `/Annots` values written in place of a generated annotation array
#[derive(Clone, Copy)]
enum AnnotsOverride {
    Bogus,
    Empty,
    Null,
    Dangling,
}

impl TestPage {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn text(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_annotations(mut self, subtypes: &[&str]) -> Self {
        self.annotations = subtypes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn indirect_annots(mut self) -> Self {
        self.indirect_annots = true;
        self
    }

    /// Raw content stream operations, used instead of the one-block-per-line layout
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    pub fn with_bogus_annots(mut self) -> Self {
        self.annots_override = Some(AnnotsOverride::Bogus);
        self
    }

    pub fn with_empty_annots(mut self) -> Self {
        self.annots_override = Some(AnnotsOverride::Empty);
        self
    }

    pub fn with_null_annots(mut self) -> Self {
        self.annots_override = Some(AnnotsOverride::Null);
        self
    }

    /// `/Annots` points at an object number that does not exist
    pub fn with_dangling_annots(mut self) -> Self {
        self.annots_override = Some(AnnotsOverride::Dangling);
        self
    }
}

/// Build a PDF where each page shows its lines in Helvetica and carries the
/// requested annotation subtypes
pub(crate) fn build_pdf(pages: &[TestPage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });

    let mut page_ids = Vec::new();

    for page in pages {
        let mut page_dict = Dictionary::from_iter(vec![
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
        ]);

        if !page.operations.is_empty() {
            let content = Content {
                operations: page.operations.clone(),
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
            page_dict.set("Contents", Object::Reference(content_id));
        } else if !page.lines.is_empty() {
            let mut operations = Vec::new();
            for (i, line) in page.lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Integer(72), Object::Integer(720 - 20 * i as i64)],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        line.clone().into_bytes(),
                        StringFormat::Literal,
                    )],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
            page_dict.set("Contents", Object::Reference(content_id));
        }

        if let Some(raw) = page.annots_override {
            let value = match raw {
                AnnotsOverride::Bogus => Object::Integer(42),
                AnnotsOverride::Empty => Object::Array(vec![]),
                AnnotsOverride::Null => Object::Null,
                AnnotsOverride::Dangling => Object::Reference((9999, 0)),
            };
            page_dict.set("Annots", value);
        } else if !page.annotations.is_empty() {
            let refs: Vec<Object> = page
                .annotations
                .iter()
                .enumerate()
                .map(|(i, subtype)| {
                    let y = 700 - 30 * i as i64;
                    let annot_id = doc.add_object(dictionary! {
                        "Type" => "Annot",
                        "Subtype" => Object::Name(subtype.as_bytes().to_vec()),
                        "Rect" => vec![72.into(), y.into(), 300.into(), (y + 20).into()],
                        "IC" => vec![0.into(), 0.into(), 0.into()],
                    });
                    Object::Reference(annot_id)
                })
                .collect();

            if page.indirect_annots {
                let array_id = doc.add_object(Object::Array(refs));
                page_dict.set("Annots", Object::Reference(array_id));
            } else {
                page_dict.set("Annots", Object::Array(refs));
            }
        }

        page_ids.push(doc.add_object(page_dict));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(pages.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
