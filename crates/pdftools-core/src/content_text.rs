//! Page text with line structure
//!
//! Walks a page's content stream and writes shown strings in stream order.
//! A new line starts whenever the text position moves vertically, so lines
//! drawn inside a single `BT`/`ET` block stay separate.

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// TJ displacement (thousandths of an em) wide enough to read as a word gap
const WORD_GAP: f32 = -100.0;

/// Vertical moves smaller than this stay on the same line
const LINE_EPSILON: f32 = 0.01;

/// Text positioning state tracked across operators
struct TextState<'a> {
    encoding: Option<&'a str>,
    leading: f32,
    line_y: f32,
}

impl TextState<'_> {
    fn new() -> Self {
        Self {
            encoding: None,
            leading: 0.0,
            line_y: 0.0,
        }
    }
}

struct LineWriter {
    text: String,
}

impl LineWriter {
    fn break_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    fn space(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
    }

    fn show(&mut self, encoding: Option<&str>, operand: &Object) {
        match operand {
            Object::String(bytes, _) => {
                self.text.push_str(&Document::decode_text(encoding, bytes));
            }
            Object::Array(items) => {
                for item in items {
                    match item {
                        Object::String(..) => self.show(encoding, item),
                        other => {
                            if other.as_float().is_ok_and(|gap| gap < WORD_GAP) {
                                self.space();
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn operand(operands: &[Object], index: usize) -> f32 {
    operands
        .get(index)
        .and_then(|o| o.as_float().ok())
        .unwrap_or(0.0)
}

/// Extract a page's text, one output line per text line on the page
pub fn extract_page_lines(doc: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings: BTreeMap<Vec<u8>, &str> = doc
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect();
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut state = TextState::new();
    let mut out = LineWriter {
        text: String::new(),
    };

    for op in &content.operations {
        let operands = op.operands.as_slice();
        match op.operator.as_str() {
            "BT" => state.line_y = 0.0,
            "ET" => out.break_line(),
            "Tf" => {
                state.encoding = operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(|name| encodings.get(name).copied());
            }
            "TL" => state.leading = operand(operands, 0),
            "Td" | "TD" => {
                let ty = operand(operands, 1);
                if op.operator == "TD" {
                    state.leading = -ty;
                }
                if ty.abs() > LINE_EPSILON {
                    state.line_y += ty;
                    out.break_line();
                }
            }
            "Tm" => {
                let y = operand(operands, 5);
                if (y - state.line_y).abs() > LINE_EPSILON {
                    out.break_line();
                }
                state.line_y = y;
            }
            "T*" => {
                state.line_y -= state.leading;
                out.break_line();
            }
            "Tj" | "TJ" => {
                if let Some(text) = operands.first() {
                    out.show(state.encoding, text);
                }
            }
            "'" => {
                state.line_y -= state.leading;
                out.break_line();
                if let Some(text) = operands.first() {
                    out.show(state.encoding, text);
                }
            }
            "\"" => {
                state.line_y -= state.leading;
                out.break_line();
                if let Some(text) = operands.get(2) {
                    out.show(state.encoding, text);
                }
            }
            _ => {}
        }
    }

    Ok(out.text)
}
