//! Paginated document composer.
//!
//! # Responsibility
//! - Lay entry blocks out top-to-bottom into fixed-size pages of draw
//!   instructions, ready for PDF rendering.
//!
//! # Invariants
//! - Pagination is a pure function of content and geometry: identical
//!   input yields identical page count and break positions.
//! - An entry heading never lands within `HEADING_LOOKAHEAD` units of the
//!   bottom margin; the block starts on a fresh page instead.
//! - Blocks are kept whole whenever they fit on an empty page.

use crate::export::{CancelToken, ExportError, ExportResult};
use crate::locale::LocaleConfig;
use crate::model::entry::Entry;

/// Fixed page and margin geometry for the paginated composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// A4 in PDF points with the original 40pt margin.
    pub fn a4() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 40.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }

    fn content_bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Bottom-margin reservation under which a heading opens a new page.
pub const HEADING_LOOKAHEAD: f32 = 40.0;

const TITLE_SIZE: f32 = 22.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const TAGS_SIZE: f32 = 11.0;

const TITLE_SPACING: f32 = 16.0;
const HEADING_SPACING: f32 = 8.0;
const BODY_SPACING: f32 = 6.0;
const TAGS_SPACING: f32 = 12.0;
const NO_TAGS_ADVANCE: f32 = 8.0;
const SEPARATOR_ADVANCE: f32 = 16.0;
const SEPARATOR_MIN_SPACE: f32 = 12.0;

const LINE_HEIGHT_FACTOR: f32 = 1.25;
// Deterministic width metric: average glyph advance as a fraction of the
// font size. Replaces platform font measurement from the original layout.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Font family selector resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
    Mono,
}

/// One positioned line of text. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontKind,
    pub text: String,
}

/// One draw instruction inside a page's content rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Rule { x0: f32, x1: f32, y: f32 },
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Lays the export document out into pages of draw instructions.
///
/// Content order: title, optional subtitle, then per entry a date heading,
/// optional tags line, one line group per non-empty field, and a rule.
/// The cancel token is checked between entries; cancellation discards the
/// partial result.
pub fn compose_paginated(
    title: &str,
    subtitle: &str,
    entries: &[Entry],
    include_tags: bool,
    geometry: &PageGeometry,
    locale: &LocaleConfig,
    cancel: &CancelToken,
) -> ExportResult<Vec<Page>> {
    let mut cursor = PageCursor::new(*geometry);

    cursor.draw_block(title, FontKind::Bold, TITLE_SIZE, TITLE_SPACING);
    if !subtitle.trim().is_empty() {
        cursor.draw_block(subtitle, FontKind::Regular, BODY_SIZE, TITLE_SPACING);
    }

    for entry in entries {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }

        if cursor.remaining() < HEADING_LOOKAHEAD {
            cursor.new_page();
        }
        cursor.draw_block(
            &locale.long_date(entry.day),
            FontKind::Bold,
            HEADING_SIZE,
            HEADING_SPACING,
        );

        for (label, value) in locale.field_labels.iter().zip(entry.text_fields()) {
            if value.trim().is_empty() {
                continue;
            }
            cursor.draw_block(
                &format!("— {label}: {value}"),
                FontKind::Regular,
                BODY_SIZE,
                BODY_SPACING,
            );
        }

        if include_tags && !entry.tags.is_empty() {
            let mut sorted: Vec<&str> = entry.tags.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            let line = sorted
                .iter()
                .map(|name| format!("#{name}"))
                .collect::<Vec<_>>()
                .join(" ");
            cursor.draw_block(&line, FontKind::Mono, TAGS_SIZE, TAGS_SPACING);
        } else {
            cursor.advance(NO_TAGS_ADVANCE);
        }

        cursor.draw_separator();
    }

    Ok(cursor.finish())
}

/// Mutable layout state: current page, vertical position, finished pages.
struct PageCursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl PageCursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.margin,
        }
    }

    fn remaining(&self) -> f32 {
        self.geometry.content_bottom() - self.y
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = self.geometry.margin;
    }

    fn advance(&mut self, amount: f32) {
        self.y += amount;
    }

    /// Word-wraps and emits one text block, keeping it on a single page
    /// when it fits a fresh page; taller blocks split at line boundaries.
    fn draw_block(&mut self, text: &str, font: FontKind, size: f32, spacing_after: f32) {
        let line_height = size * LINE_HEIGHT_FACTOR;
        let max_chars = ((self.geometry.content_width() / (size * AVG_GLYPH_WIDTH)) as usize).max(1);
        let lines = wrap_text(text, max_chars);

        let block_height = lines.len() as f32 * line_height;
        let page_capacity = self.geometry.content_bottom() - self.geometry.margin;
        if block_height > self.remaining() && block_height <= page_capacity {
            self.new_page();
        }

        for line in lines {
            if line_height > self.remaining() {
                self.new_page();
            }
            self.current.ops.push(DrawOp::Text(TextOp {
                x: self.geometry.margin,
                y: self.y,
                size,
                font,
                text: line,
            }));
            self.y += line_height;
        }
        self.y += spacing_after;
    }

    fn draw_separator(&mut self) {
        if self.remaining() < SEPARATOR_MIN_SPACE {
            self.new_page();
        }
        self.current.ops.push(DrawOp::Rule {
            x0: self.geometry.margin,
            x1: self.geometry.width - self.geometry.margin,
            y: self.y,
        });
        self.y += SEPARATOR_ADVANCE;
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Greedy word wrap against a character budget per line.
///
/// Input newlines are respected; words longer than the budget are split
/// hard. Always returns at least one line so headings keep their own
/// draw op even when empty.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();
            if current.is_empty() {
                if word_len <= max_chars {
                    current.push_str(word);
                } else {
                    hard_split(word, max_chars, &mut lines, &mut current);
                }
            } else if current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                if word_len <= max_chars {
                    current.push_str(word);
                } else {
                    hard_split(word, max_chars, &mut lines, &mut current);
                }
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn hard_split(word: &str, max_chars: usize, lines: &mut Vec<String>, current: &mut String) {
    let chars: Vec<char> = word.chars().collect();
    let mut idx = 0;
    while chars.len() - idx > max_chars {
        lines.push(chars[idx..idx + max_chars].iter().collect());
        idx += max_chars;
    }
    // The tail stays open so following words can join the line.
    *current = chars[idx..].iter().collect();
}

#[cfg(test)]
mod tests {
    use super::{compose_paginated, wrap_text, DrawOp, PageGeometry, HEADING_LOOKAHEAD};
    use crate::export::CancelToken;
    use crate::locale::LocaleConfig;
    use crate::model::entry::Entry;
    use chrono::NaiveDate;

    fn entry(d: u32, note: &str) -> Entry {
        let mut entry = Entry::new(NaiveDate::from_ymd_opt(2026, 1, d).unwrap());
        entry.note = note.to_string();
        entry
    }

    fn compose(entries: &[Entry], geometry: &PageGeometry) -> Vec<super::Page> {
        compose_paginated(
            "REGISTRO 2026",
            "",
            entries,
            true,
            geometry,
            &LocaleConfig::spanish(),
            &CancelToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn wrap_respects_budget_and_newlines() {
        let lines = wrap_text("uno dos tres cuatro", 8);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);

        let lines = wrap_text("a\nb", 10);
        assert_eq!(lines, vec!["a", "b"]);

        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines.concat(), "abcdefghij");
        assert!(lines.iter().all(|line| line.chars().count() <= 4));
    }

    #[test]
    fn single_short_document_fits_one_page() {
        let pages = compose(&[entry(5, "una nota")], &PageGeometry::a4());
        assert_eq!(pages.len(), 1);
        assert!(pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn pagination_is_deterministic() {
        let entries: Vec<Entry> = (1..=28)
            .map(|d| entry(d, "texto repetido para rellenar la página con varias líneas"))
            .collect();
        let first = compose(&entries, &PageGeometry::a4());
        let second = compose(&entries, &PageGeometry::a4());
        assert_eq!(first, second);
        assert!(first.len() > 1);
    }

    #[test]
    fn heading_near_bottom_margin_opens_a_new_page() {
        // A page short enough that the second entry's heading would land
        // inside the look-ahead reservation.
        let narrow = PageGeometry {
            width: 595.0,
            height: 200.0,
            margin: 40.0,
        };
        let entries = vec![entry(5, "primera"), entry(6, "segunda")];
        let pages = compose(&entries, &narrow);
        assert!(pages.len() >= 2);

        // Every heading op must start with more than the reservation left.
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text(text) = op {
                    if text.text.contains("de enero de 2026") && text.size > 12.0 {
                        assert!(narrow.height - narrow.margin - text.y >= HEADING_LOOKAHEAD);
                    }
                }
            }
        }
    }

    #[test]
    fn cancellation_discards_the_composition() {
        let token = CancelToken::new();
        token.cancel();
        let result = compose_paginated(
            "R",
            "",
            &[entry(5, "x")],
            true,
            &PageGeometry::a4(),
            &LocaleConfig::spanish(),
            &token,
        );
        assert!(matches!(
            result,
            Err(crate::export::ExportError::Cancelled)
        ));
    }
}
