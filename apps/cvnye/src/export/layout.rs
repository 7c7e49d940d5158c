//! Page layout — places rendered blocks on A4 portrait pages.
//!
//! Pure and synchronous: export runs it inside `spawn_blocking` and then
//! only has to draw the placed lines.

use crate::export::metrics::{line_height_mm, text_width_mm};
use crate::render::{BlockContent, BlockKind, FontFace, RenderedDocument};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 18.0;

/// Slack kept at the right edge so metric rounding never clips a line.
const RIGHT_SLACK_MM: f32 = 2.0;
const BULLET_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    /// Left edge, from the left of the page.
    pub x_mm: f32,
    /// Baseline, from the bottom of the page (PDF convention).
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

struct Cursor {
    pages: Vec<PageLayout>,
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm -= mm;
    }

    /// Moves to the next baseline, starting a new page when the line would
    /// cross the bottom margin.
    fn next_baseline(&mut self, line_height: f32) -> f32 {
        if self.y_mm - line_height < MARGIN_MM {
            self.pages.push(PageLayout::default());
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.y_mm -= line_height;
        self.y_mm
    }

    fn place(&mut self, line: PlacedLine) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
    }
}

pub fn layout_document(doc: &RenderedDocument) -> Vec<PageLayout> {
    let mut cursor = Cursor::new();
    let text_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - RIGHT_SLACK_MM;

    for (index, block) in doc.blocks.iter().enumerate() {
        let style = block.style;
        if index > 0 {
            cursor.gap(style.space_before_mm);
        }

        let available = text_width - style.indent_mm;
        let lines = match &block.content {
            BlockContent::Text(text) => wrap_words(text, available, style.face, style.size_pt),
            BlockContent::Inline { items, separator } => {
                wrap_items(items, separator, available, style.face, style.size_pt)
            }
        };

        let line_height = line_height_mm(style.size_pt);
        for (line_index, text) in lines.into_iter().enumerate() {
            let y_mm = cursor.next_baseline(line_height);
            let x_mm = if style.centered {
                let width = text_width_mm(&text, style.face, style.size_pt);
                ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
            } else {
                MARGIN_MM + style.indent_mm
            };

            if block.kind == BlockKind::Bullet && line_index == 0 {
                cursor.place(PlacedLine {
                    text: BULLET_MARKER.to_string(),
                    face: style.face,
                    size_pt: style.size_pt,
                    x_mm: MARGIN_MM + 1.0,
                    y_mm,
                });
            }

            cursor.place(PlacedLine {
                text,
                face: style.face,
                size_pt: style.size_pt,
                x_mm,
                y_mm,
            });
        }
    }

    cursor.pages
}

/// Greedy word wrap. Words longer than a whole line are split by character.
pub fn wrap_words(text: &str, width_mm: f32, face: FontFace, size_pt: f32) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, face, size_pt) <= width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(word) {
            current = word.to_string();
        } else {
            let mut pieces = split_long_word(word, width_mm, face, size_pt);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, width_mm: f32, face: FontFace, size_pt: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if text_width_mm(&current, face, size_pt) > width_mm && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Packs whole items onto lines joined by `separator`. An item only breaks
/// internally when it is wider than a line on its own.
pub fn wrap_items(
    items: &[String],
    separator: &str,
    width_mm: f32,
    face: FontFace,
    size_pt: f32,
) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, face, size_pt) <= width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for item in items {
        let item = item.trim();
        let candidate = if current.is_empty() {
            item.to_string()
        } else {
            format!("{current}{separator}{item}")
        };
        if fits(&candidate) {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if fits(item) {
            current = item.to_string();
        } else {
            let mut wrapped = wrap_words(item, width_mm, face, size_pt);
            current = wrapped.pop().unwrap_or_default();
            lines.extend(wrapped);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
