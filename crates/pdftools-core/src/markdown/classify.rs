//! Line classifier
//!
//! Infers structure from line content alone; no font size or position is
//! available. Rules are tried in table order and the first match wins, so an
//! all-caps bullet line ("- NOTE") is a heading, not a list item.

use lazy_static::lazy_static;
use regex::Regex;

/// Headings longer than this many characters are treated as prose
pub const MAX_HEADING_LEN: usize = 80;

/// Characters that end a sentence and therefore rule out a heading
const TERMINAL_PUNCTUATION: [char; 6] = ['.', ',', ':', ';', '!', '?'];

lazy_static! {
    /// Capital letter followed by a lowercase letter ("Introduction", "Thanks for reading")
    static ref TITLE_START: Regex = Regex::new(r"^[A-Z][a-z]").unwrap();

    /// Bullet glyph followed by whitespace
    static ref BULLET_ITEM: Regex = Regex::new(r"^[-•·*]\s").unwrap();

    /// Decimal number, period, whitespace ("3. ")
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^\d+\.\s").unwrap();

    /// Leading list marker including all following whitespace
    static ref LIST_MARKER: Regex = Regex::new(r"^(?:[-•·*]|\d+\.)\s+").unwrap();
}

/// Structural role of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Level 1-3
    Heading(u8),
    ListItem,
    Paragraph,
}

#[derive(Debug, Clone, Copy)]
enum Tag {
    Heading,
    ListItem,
}

type Predicate = fn(&str) -> bool;

const RULES: [(Predicate, Tag); 3] = [
    (is_heading_candidate, Tag::Heading),
    (is_bullet_item, Tag::ListItem),
    (is_numbered_item, Tag::ListItem),
];

/// Classify a trimmed, non-empty line
///
/// `is_first_line` marks the first non-blank line of a page, which is where
/// a level 1 heading can appear.
pub fn classify(line: &str, is_first_line: bool) -> LineKind {
    let tag = RULES
        .iter()
        .find(|(matches, _)| matches(line))
        .map(|(_, tag)| *tag);

    match tag {
        Some(Tag::Heading) => LineKind::Heading(heading_level(line, is_first_line)),
        Some(Tag::ListItem) => LineKind::ListItem,
        None => LineKind::Paragraph,
    }
}

pub fn is_heading_candidate(line: &str) -> bool {
    line.chars().count() <= MAX_HEADING_LEN
        && (is_all_caps(line) || TITLE_START.is_match(line))
        && !line.ends_with(&TERMINAL_PUNCTUATION[..])
}

pub fn is_bullet_item(line: &str) -> bool {
    BULLET_ITEM.is_match(line)
}

pub fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM.is_match(line)
}

/// Line equals its uppercase form and has at least one cased letter
///
/// Scripts without case (CJK, Arabic) never count as capitals.
pub fn is_all_caps(line: &str) -> bool {
    line.chars().any(|c| c.is_lowercase() || c.is_uppercase()) && line.to_uppercase() == line
}

fn heading_level(line: &str, is_first_line: bool) -> u8 {
    if is_first_line {
        1
    } else if is_all_caps(line) {
        2
    } else {
        3
    }
}

/// Remove a leading bullet glyph or "N." marker
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_all_caps_first_line_is_level_one() {
        assert_eq!(classify("CONFIDENTIAL REPORT", true), LineKind::Heading(1));
    }

    #[test]
    fn test_all_caps_later_line_is_level_two() {
        assert_eq!(classify("SECTION TWO", false), LineKind::Heading(2));
    }

    #[test]
    fn test_title_case_later_line_is_level_three() {
        assert_eq!(classify("Background", false), LineKind::Heading(3));
    }

    #[test]
    fn test_short_sentence_without_punctuation_is_heading() {
        // Known heuristic overlap, kept as is
        assert_eq!(classify("Thanks for reading", false), LineKind::Heading(3));
    }

    #[test]
    fn test_terminal_punctuation_rules_out_heading() {
        for line in [
            "SUMMARY.",
            "Dear Sir,",
            "NOTE:",
            "Item;",
            "STOP!",
            "Really?",
        ] {
            assert_eq!(classify(line, false), LineKind::Paragraph, "{}", line);
        }
    }

    #[test]
    fn test_digits_only_is_not_all_caps() {
        assert!(!is_all_caps("2024"));
        assert_eq!(classify("2024", false), LineKind::Paragraph);
    }

    #[test]
    fn test_uncased_script_is_not_all_caps() {
        assert!(!is_all_caps("中文标题"));
        assert_eq!(classify("中文标题", false), LineKind::Paragraph);
        assert_eq!(classify("中文标题", true), LineKind::Paragraph);
        assert!(is_all_caps("ÉTÉ 2024"));
    }

    #[test]
    fn test_lowercase_start_is_paragraph() {
        assert_eq!(classify("item two", false), LineKind::Paragraph);
    }

    #[test]
    fn test_bullets_are_list_items() {
        for line in ["- item one", "• item", "· item", "* item"] {
            assert_eq!(classify(line, false), LineKind::ListItem, "{}", line);
        }
    }

    #[test]
    fn test_bullet_without_space_is_not_list_item() {
        assert_eq!(classify("-item", false), LineKind::Paragraph);
    }

    #[test]
    fn test_numbered_item() {
        assert_eq!(classify("3. third step", false), LineKind::ListItem);
        assert_eq!(classify("12. twelfth", true), LineKind::ListItem);
        assert_eq!(classify("3.5 percent", false), LineKind::Paragraph);
    }

    #[test]
    fn test_all_caps_bullet_matches_heading_first() {
        assert_eq!(classify("- NOTE", false), LineKind::Heading(2));
    }

    #[test]
    fn test_long_all_caps_line_is_not_heading() {
        let line = "A".repeat(MAX_HEADING_LEN + 1);
        assert_eq!(classify(&line, false), LineKind::Paragraph);
        let line = "A".repeat(MAX_HEADING_LEN);
        assert_eq!(classify(&line, false), LineKind::Heading(2));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- item one"), "item one");
        assert_eq!(strip_list_marker("•   spaced"), "spaced");
        assert_eq!(strip_list_marker("10. tenth"), "tenth");
        assert_eq!(strip_list_marker("plain"), "plain");
    }

    proptest! {
        /// Long lines ending in a period are always prose
        #[test]
        fn long_punctuated_lines_are_paragraphs(
            body in "[A-Za-z ]{81,200}",
            first in any::<bool>(),
        ) {
            let line = format!("{}.", body.trim());
            prop_assume!(line.chars().count() > MAX_HEADING_LEN);
            prop_assert_eq!(classify(&line, first), LineKind::Paragraph);
        }

        /// Any line ending in terminal punctuation is never a heading
        #[test]
        fn punctuated_lines_are_never_headings(
            body in "[A-Z][A-Za-z ]{0,40}",
            end in prop::sample::select(vec!['.', ',', ':', ';', '!', '?']),
        ) {
            let line = format!("{}{}", body, end);
            prop_assert!(!matches!(classify(&line, true), LineKind::Heading(_)));
        }
    }
}
