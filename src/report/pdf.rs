// PDF serialization of a PagedDocument.
//
// Writes a minimal PDF 1.4 file: one content stream per page, the two
// standard Helvetica fonts with WinAnsiEncoding, and a cross-reference
// table. Standard fonts need no embedding, so the output stays small and
// byte-for-byte deterministic for a given document.

use std::fmt::Write as _;

use super::document::{DrawOp, PagedDocument, PT_PER_MM};
use super::surface::{Color, DrawSurface};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Serialize `document` to PDF bytes.
pub fn render_pdf(document: &PagedDocument) -> Vec<u8> {
    let (width_mm, height_mm) = document.page_size();
    let width = width_mm * PT_PER_MM;
    let height = height_mm * PT_PER_MM;
    let page_count = document.pages().len();

    // Object layout: 1 catalog, 2 page tree, 3-4 fonts, then a
    // (page, content) pair per page.
    let first_page_obj = 5;
    let page_obj = |i: usize| first_page_obj + 2 * i;

    let mut writer = PdfWriter::new();

    writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", page_obj(i))).collect();
    writer.object(
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    );

    writer.object(
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    writer.object(
        4,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    for (i, page) in document.pages().iter().enumerate() {
        let content = content_stream(&page.ops, height_mm);
        writer.object(
            page_obj(i),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /{FONT_REGULAR} 3 0 R /{FONT_BOLD} 4 0 R >> >> \
                 /Contents {} 0 R >>",
                num(width),
                num(height),
                page_obj(i) + 1
            )
            .as_bytes(),
        );
        writer.stream(page_obj(i) + 1, &content);
    }

    writer.finish(1)
}

/// Assembles numbered objects and records their byte offsets.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let size = self.offsets.len() + 1;
        let xref_offset = self.buf.len();

        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

/// Translate draw ops into PDF content-stream operators. Flips the y axis
/// (PDF's origin is bottom-left) and converts millimetres to points.
fn content_stream(ops: &[DrawOp], page_height_mm: f32) -> Vec<u8> {
    let x_pt = |x: f32| x * PT_PER_MM;
    let y_pt = |y: f32| (page_height_mm - y) * PT_PER_MM;
    let mut out: Vec<u8> = Vec::new();

    for op in ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let line = format!(
                    "{} rg {} {} {} {} re f\n",
                    rgb(*color),
                    num(x_pt(*x)),
                    num(y_pt(y + height)),
                    num(width * PT_PER_MM),
                    num(height * PT_PER_MM)
                );
                out.extend_from_slice(line.as_bytes());
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                let line = format!(
                    "{} RG {} w {} {} m {} {} l S\n",
                    rgb(*color),
                    num(width * PT_PER_MM),
                    num(x_pt(*x1)),
                    num(y_pt(*y1)),
                    num(x_pt(*x2)),
                    num(y_pt(*y2))
                );
                out.extend_from_slice(line.as_bytes());
            }
            DrawOp::Text { x, y, text, font } => {
                let name = if font.bold { FONT_BOLD } else { FONT_REGULAR };
                let prefix = format!(
                    "BT /{name} {} Tf {} rg {} {} Td (",
                    num(font.size),
                    rgb(font.color),
                    num(x_pt(*x)),
                    num(y_pt(*y))
                );
                out.extend_from_slice(prefix.as_bytes());
                out.extend_from_slice(&encode_text(text));
                out.extend_from_slice(b") Tj ET\n");
            }
        }
    }
    out
}

fn rgb(color: Color) -> String {
    format!(
        "{} {} {}",
        num(color.r as f32 / 255.0),
        num(color.g as f32 / 255.0),
        num(color.b as f32 / 255.0)
    )
}

/// Format a number compactly with at most three decimals.
fn num(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Encode text as a WinAnsi PDF string body, escaping delimiters.
/// Characters outside WinAnsi become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                c as u8
            }
            '\n' | '\r' | '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        };
        out.push(byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::surface::{Align, Font};

    #[test]
    fn escapes_pdf_delimiters() {
        assert_eq!(encode_text(r"a(b)c\d"), br"a\(b\)c\\d".to_vec());
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(encode_text("é😀·"), vec![0xE9, b'?', 0xB7]);
    }

    #[test]
    fn number_formatting_is_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn output_is_a_well_formed_pdf_envelope() {
        let mut doc = PagedDocument::new(210.0, 297.0);
        doc.text(10.0, 10.0, "Hello", Font::regular(10.0, Color::WHITE), Align::Left);
        doc.add_page();
        let bytes = render_pdf(&doc);
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("(Hello) Tj"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let doc = PagedDocument::new(210.0, 297.0);
        let bytes = render_pdf(&doc);
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref_at = text.find("xref\n").unwrap();
        let first_entry = text[xref_at..].lines().nth(3).unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(bytes[offset..].starts_with(b"1 0 obj"));
    }
}
