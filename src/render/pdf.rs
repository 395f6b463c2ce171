//! PDF serialization of a [`PrintableDocument`]

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use super::printable::{Primitive, PrintableDocument, Rgb, TextRun};
use crate::error::FlightWeatherError;

const PT_PER_MM: f32 = 72.0 / 25.4;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// Serialize the laid-out document into PDF bytes
pub fn write_pdf(document: &PrintableDocument) -> crate::Result<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(FlightWeatherError::render("document has no pages"));
    }

    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let tree_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let info_id = alloc();
    let page_ids: Vec<(Ref, Ref)> = document.pages.iter().map(|_| (alloc(), alloc())).collect();

    let width = document.width * PT_PER_MM;
    let height = document.height * PT_PER_MM;

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.document_info(info_id)
        .title(TextStr(&document.title))
        .creator(TextStr("Flight Weather Assessment Tool"));

    for (page, (page_id, content_id)) in document.pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(Rect::new(0.0, 0.0, width, height));
        writer.parent(tree_id);
        writer.contents(*content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        writer.finish();

        let mut content = Content::new();
        for primitive in &page.primitives {
            draw(&mut content, primitive, height);
        }
        pdf.stream(*content_id, &content.finish());
    }

    let bytes = pdf.finish();
    debug!(
        pages = document.pages.len(),
        bytes = bytes.len(),
        file = %document.file_name,
        "Serialized PDF"
    );
    Ok(bytes)
}

fn draw(content: &mut Content, primitive: &Primitive, page_height: f32) {
    match primitive {
        Primitive::Text(run) => draw_text(content, run, page_height),
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let bottom = page_height - (y + height) * PT_PER_MM;
            let (x, w, h) = (x * PT_PER_MM, width * PT_PER_MM, height * PT_PER_MM);

            content.save_state();
            if let Some(color) = fill {
                set_fill(content, *color);
                content.rect(x, bottom, w, h);
                content.fill_nonzero();
            }
            if let Some(color) = stroke {
                set_stroke(content, *color);
                content.set_line_width(0.5);
                content.rect(x, bottom, w, h);
                content.stroke();
            }
            content.restore_state();
        }
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        } => {
            content.save_state();
            set_stroke(content, *color);
            content.set_line_width(width * PT_PER_MM);
            content.move_to(x1 * PT_PER_MM, page_height - y1 * PT_PER_MM);
            content.line_to(x2 * PT_PER_MM, page_height - y2 * PT_PER_MM);
            content.stroke();
            content.restore_state();
        }
    }
}

fn draw_text(content: &mut Content, run: &TextRun, page_height: f32) {
    let font = if run.bold { BOLD_FONT } else { REGULAR_FONT };
    let encoded = encode_win_ansi(&run.text);

    content.save_state();
    set_fill(content, run.color);
    content.begin_text();
    content.set_font(font, run.size);
    content.next_line(run.x * PT_PER_MM, page_height - run.y * PT_PER_MM);
    content.show(Str(&encoded));
    content.end_text();
    content.restore_state();
}

fn set_fill(content: &mut Content, (r, g, b): Rgb) {
    content.set_fill_rgb(channel(r), channel(g), channel(b));
}

fn set_stroke(content: &mut Content, (r, g, b): Rgb) {
    content.set_stroke_rgb(channel(r), channel(g), channel(b));
}

fn channel(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// Latin-1 subset of WinAnsi; anything else becomes `?`
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AirportWeatherRecord;
    use crate::report::ReportModel;
    use crate::route::aggregate;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_pdf_bytes() {
        let assessment = aggregate(vec![
            AirportWeatherRecord::new("Delhi", "VIDP", -1),
            AirportWeatherRecord::new("Mumbai", "VABB", 1).with_raw_code("VABB 191030Z TSRA"),
        ])
        .unwrap();
        let model = ReportModel::build(&assessment, "DEL", "BOM");
        let bytes = write_pdf(&PrintableDocument::layout(&model)).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"Page 1 of 1"));
        assert!(contains(&bytes, b"Hazardous / Not Recommended"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let document = PrintableDocument {
            title: String::new(),
            file_name: String::new(),
            width: 210.0,
            height: 297.0,
            pages: Vec::new(),
        };
        assert!(matches!(
            write_pdf(&document),
            Err(FlightWeatherError::Render { .. })
        ));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("DEL -> BOM"), b"DEL -> BOM".to_vec());
        assert_eq!(encode_win_ansi("\u{a9} 2026"), vec![0xa9, b' ', b'2', b'0', b'2', b'6']);
        assert_eq!(encode_win_ansi("A\u{2192}B"), b"A?B".to_vec());
    }
}
