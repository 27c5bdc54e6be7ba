// Drawing capability the report composer draws onto.
//
// Coordinates are millimetres with the origin at the top-left corner of the
// page; text `y` is the baseline. Implementors decide how pages are stored
// and how they're eventually serialized.

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// Font selection for a text run. Only the two Helvetica weights exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in points.
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

impl Font {
    pub const fn regular(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
        }
    }

    pub const fn bold(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: true,
            color,
        }
    }
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

pub trait DrawSurface {
    /// Page width and height in millimetres.
    fn page_size(&self) -> (f32, f32);

    /// Append a blank page and make it current.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    /// Make the zero-based page `index` current. Out-of-range indices are ignored.
    fn set_page(&mut self, index: usize);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color);

    fn text(&mut self, x: f32, y: f32, text: &str, font: Font, align: Align);

    /// Rendered width of `text` in millimetres.
    fn text_width(&self, text: &str, font: Font) -> f32;

    /// Break `text` into lines no wider than `max_width`. Words longer than
    /// a line are split by character. Existing newlines are kept.
    fn wrap_text(&self, text: &str, max_width: f32, font: Font) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if self.text_width(&candidate, font) <= max_width {
                    current = candidate;
                    continue;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                if self.text_width(word, font) <= max_width {
                    current = word.to_string();
                    continue;
                }
                for c in word.chars() {
                    current.push(c);
                    if self.text_width(&current, font) > max_width && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
            lines.push(current);
        }
        lines
    }
}
