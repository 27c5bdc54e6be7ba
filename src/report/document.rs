// In-memory paginated document: the realized page list.
//
// Each page is a list of draw operations in paint order. The composer fills
// pages in one pass; the finalizer revisits all of them; the PDF writer
// serializes them.

use super::surface::{Align, Color, DrawSurface, Font};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// Left-aligned text run; alignment is resolved when the op is recorded.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every text run on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedDocument {
    width: f32,
    height: f32,
    pages: Vec<Page>,
    current: usize,
}

impl PagedDocument {
    /// A document with a single blank page of the given size (millimetres).
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: vec![Page::default()],
            current: 0,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn current_page(&mut self) -> &mut Page {
        &mut self.pages[self.current]
    }
}

impl DrawSurface for PagedDocument {
    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_page(&mut self, index: usize) {
        if index < self.pages.len() {
            self.current = index;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.current_page().ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.current_page().ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }

    fn text(&mut self, x: f32, y: f32, text: &str, font: Font, align: Align) {
        let width = self.text_width(text, font);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.current_page().ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
        });
    }

    fn text_width(&self, text: &str, font: Font) -> f32 {
        let em: f32 = text.chars().map(|c| char_width(c, font.bold)).sum();
        em * font.size / PT_PER_MM
    }
}

/// Approximate Helvetica advance width of `c` in ems.
fn char_width(c: char, bold: bool) -> f32 {
    let regular = match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'f' | 't' => 0.278,
        'i' | 'j' | 'l' | '\'' | '|' => 0.222,
        '(' | ')' | '-' | 'r' | '`' => 0.333,
        '"' => 0.355,
        '*' => 0.389,
        '0'..='9' | '#' | '$' | '?' | '_' | 'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n'..='q'
        | 'u' => 0.556,
        'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'c' => 0.5,
        'w' | 'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 0.722,
        'm' | 'M' => 0.833,
        'W' => 0.944,
        '%' => 0.889,
        '@' => 1.015,
        'I' => 0.278,
        'J' => 0.5,
        'F' | 'T' | 'Z' => 0.611,
        'G' | 'O' | 'Q' => 0.778,
        'A'..='Z' => 0.667,
        '<' | '>' | '=' | '+' | '~' | '^' => 0.584,
        c if c.is_ascii() => 0.556,
        // Wide scripts and emoji; err on the wide side so text never overflows.
        _ => 1.0,
    };
    if bold {
        regular * 1.06
    } else {
        regular
    }
}
