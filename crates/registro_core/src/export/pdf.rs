//! Minimal PDF serializer for laid-out pages.
//!
//! # Responsibility
//! - Turn `layout::Page` draw instructions into a valid PDF 1.4 byte
//!   stream using the base-14 fonts.
//!
//! # Invariants
//! - Output bytes are a pure function of the input pages and geometry.
//! - Text is encoded as WinAnsi; characters outside Latin-1 degrade to
//!   `?` rather than producing broken strings.

use crate::export::layout::{DrawOp, FontKind, Page, PageGeometry};

const FONTS: &[(&str, &str)] = &[
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Courier"),
];

// Fraction of the font size used as text ascent when converting the
// layout's top-of-line y into a PDF baseline.
const ASCENT_FACTOR: f32 = 0.8;
const RULE_GRAY: &str = "0.85";

/// Renders pages into a complete PDF document.
pub fn render(pages: &[Page], geometry: &PageGeometry) -> Vec<u8> {
    // Objects: 1 catalog, 2 page tree, 3-5 fonts, then per page one page
    // object followed by its content stream.
    let first_page_obj = 3 + FONTS.len();
    let object_count = first_page_obj - 1 + pages.len() * 2;

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets: Vec<usize> = vec![0; object_count + 1];

    push_object(
        &mut out,
        &mut offsets,
        1,
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
    );

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", first_page_obj + index * 2))
        .collect::<Vec<_>>()
        .join(" ");
    push_object(
        &mut out,
        &mut offsets,
        2,
        format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} /MediaBox [0 0 {} {}] >>",
            pages.len(),
            fmt_coord(geometry.width),
            fmt_coord(geometry.height),
        )
        .into_bytes(),
    );

    for (index, (_, base_font)) in FONTS.iter().enumerate() {
        push_object(
            &mut out,
            &mut offsets,
            3 + index,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} \
                 /Encoding /WinAnsiEncoding >>"
            )
            .into_bytes(),
        );
    }

    let font_refs = FONTS
        .iter()
        .enumerate()
        .map(|(index, (name, _))| format!("/{name} {} 0 R", 3 + index))
        .collect::<Vec<_>>()
        .join(" ");

    for (index, page) in pages.iter().enumerate() {
        let page_obj = first_page_obj + index * 2;
        let content_obj = page_obj + 1;

        push_object(
            &mut out,
            &mut offsets,
            page_obj,
            format!(
                "<< /Type /Page /Parent 2 0 R \
                 /Resources << /Font << {font_refs} >> >> \
                 /Contents {content_obj} 0 R >>"
            )
            .into_bytes(),
        );

        let stream = content_stream(page, geometry);
        let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        body.extend_from_slice(&stream);
        body.extend_from_slice(b"\nendstream");
        push_object(&mut out, &mut offsets, content_obj, body);
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for object in 1..=object_count {
        out.extend_from_slice(format!("{:010} 00000 n \n", offsets[object]).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            object_count + 1
        )
        .as_bytes(),
    );

    out
}

fn push_object(out: &mut Vec<u8>, offsets: &mut [usize], number: usize, body: Vec<u8>) {
    offsets[number] = out.len();
    out.extend_from_slice(format!("{number} 0 obj\n").as_bytes());
    out.extend_from_slice(&body);
    out.extend_from_slice(b"\nendobj\n");
}

fn content_stream(page: &Page, geometry: &PageGeometry) -> Vec<u8> {
    let mut stream: Vec<u8> = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text(text) => {
                let baseline = geometry.height - (text.y + text.size * ASCENT_FACTOR);
                stream.extend_from_slice(
                    format!(
                        "BT /{} {} Tf {} {} Td (",
                        font_resource(text.font),
                        fmt_coord(text.size),
                        fmt_coord(text.x),
                        fmt_coord(baseline),
                    )
                    .as_bytes(),
                );
                stream.extend_from_slice(&encode_win_ansi(&text.text));
                stream.extend_from_slice(b") Tj ET\n");
            }
            DrawOp::Rule { x0, x1, y } => {
                let y_pdf = geometry.height - y;
                stream.extend_from_slice(
                    format!(
                        "{RULE_GRAY} G 1 w {} {} m {} {} l S\n",
                        fmt_coord(*x0),
                        fmt_coord(y_pdf),
                        fmt_coord(*x1),
                        fmt_coord(y_pdf),
                    )
                    .as_bytes(),
                );
            }
        }
    }
    stream
}

fn font_resource(font: FontKind) -> &'static str {
    match font {
        FontKind::Regular => "F1",
        FontKind::Bold => "F2",
        FontKind::Mono => "F3",
    }
}

fn fmt_coord(value: f32) -> String {
    format!("{value:.2}")
}

/// Encodes text as a WinAnsi (Latin-1 compatible) PDF literal string.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(c as u8);
            }
            '\n' | '\r' | '\t' => bytes.push(b' '),
            c if (c as u32) < 0x20 => bytes.push(b' '),
            c if (c as u32) <= 0xFF => bytes.push(c as u32 as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}
