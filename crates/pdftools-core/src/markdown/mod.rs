//! Plain text to markdown conversion
//!
//! Pages are converted one line at a time using [`classify`]. Output is
//! best effort: the extracted text carries no layout information.

pub mod classify;

pub use classify::{classify, LineKind};

use crate::extract::ExtractedPage;
use classify::strip_list_marker;

/// Convert extracted pages into a single markdown document
///
/// Empty pages become a rule and a placeholder. Every page except the last is
/// followed by a rule and a label for the page that comes next.
pub fn convert_to_markdown(pages: &[ExtractedPage]) -> String {
    let mut markdown = String::new();

    for (index, page) in pages.iter().enumerate() {
        if page.is_empty {
            markdown.push_str("---\n\n");
            markdown.push_str(&empty_page_placeholder(page.page_number));
            markdown.push_str("\n\n");
        } else {
            push_page_body(&mut markdown, &page.text);
        }

        if index + 1 < pages.len() {
            markdown.push_str(&format!("\n---\n\n*Page {}*\n\n", page.page_number + 1));
        }
    }

    markdown.trim().to_string()
}

/// Italic note used for pages without extractable text
pub fn empty_page_placeholder(page_number: u32) -> String {
    format!("*Page {} is empty or contains only images*", page_number)
}

fn push_page_body(markdown: &mut String, text: &str) {
    let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    for (i, line) in lines.enumerate() {
        match classify(line, i == 0) {
            LineKind::Heading(level) => {
                markdown.push_str(&"#".repeat(level as usize));
                markdown.push(' ');
                markdown.push_str(line);
                markdown.push_str("\n\n");
            }
            LineKind::ListItem => {
                markdown.push_str("- ");
                markdown.push_str(strip_list_marker(line));
                markdown.push('\n');
            }
            LineKind::Paragraph => {
                markdown.push_str(line);
                markdown.push('\n');
            }
        }
    }
}
