//! Paginated printable layout
//!
//! Lays a [`ReportModel`] out on A4 pages as positioned primitives. All
//! coordinates are millimetres from the top-left corner of the page and text
//! positions are baselines. The PDF writer only has to serialize what is
//! placed here.

use chrono::Datelike;

use crate::report::ReportModel;

pub type Rgb = (u8, u8, u8);

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN: f32 = 14.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN;
const CENTER_X: f32 = PAGE_WIDTH_MM / 2.0;
const TOP: f32 = 20.0;
/// Lowest point table content may reach; the footer sits below it
const BOTTOM: f32 = 277.0;
const FOOTER_Y: f32 = 287.0;
const FOOTER_RIGHT_X: f32 = 195.0;

const TABLE_FONT: f32 = 10.0;
const CELL_PADDING: f32 = 1.5;
const MM_PER_PT: f32 = 25.4 / 72.0;

const BLACK: Rgb = (0, 0, 0);
const WHITE: Rgb = (255, 255, 255);
const HEADER_FILL: Rgb = (52, 152, 219);
const STRIPE_FILL: Rgb = (240, 240, 240);
const GRID: Rgb = (200, 200, 200);
const MUTED: Rgb = (100, 100, 100);

pub const NO_TAF: &str = "No TAF data available";

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const BOLD_WIDTH_FACTOR: f32 = 1.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Text run with a resolved left edge
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text(TextRun),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub primitives: Vec<Primitive>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintableDocument {
    pub title: String,
    pub file_name: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl PrintableDocument {
    /// Lay out the full report, footers included
    #[must_use]
    pub fn layout(model: &ReportModel) -> Self {
        let mut layout = Layout::new();

        layout.summary(model);
        layout.conditions_table(model);
        layout.detail_table(model);

        let pages = layout.finish(model.generated_at.year());

        Self {
            title: format!(
                "Flight Weather Assessment Report: {} to {}",
                model.route.origin, model.route.destination
            ),
            file_name: model.document_file_name(),
            width: PAGE_WIDTH_MM,
            height: PAGE_HEIGHT_MM,
            pages,
        }
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| page.texts())
    }
}

/// Estimated rendered width of `text` in millimetres
#[must_use]
pub fn text_width_mm(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 32) as usize])
            } else {
                556
            }
        })
        .sum();

    let factor = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    units as f32 / 1000.0 * size * MM_PER_PT * factor
}

/// Greedy word wrap; words wider than a line are broken by character
#[must_use]
pub fn wrap_text(text: &str, max_width: f32, size: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if text_width_mm(&candidate, size, false) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            for c in word.chars() {
                line.push(c);
                if text_width_mm(&line, size, false) > max_width && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(c);
                }
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn line_height(size: f32) -> f32 {
    size * MM_PER_PT * 1.15
}

struct Column {
    header: &'static str,
    width: f32,
}

struct Cell {
    text: String,
    color: Option<Rgb>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }
}

struct Layout {
    finished: Vec<Page>,
    current: Page,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Page::default(),
            y: TOP,
        }
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.y = TOP;
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, color: Rgb, align: Align, text: &str) {
        let width = text_width_mm(text, size, bold);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        self.current.primitives.push(Primitive::Text(TextRun {
            x,
            y,
            size,
            bold,
            color,
            text: text.to_string(),
        }));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        self.current.primitives.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    fn summary(&mut self, model: &ReportModel) {
        let route = &model.route;
        let summary = &model.summary;

        self.text(CENTER_X, 15.0, 20.0, true, BLACK, Align::Center, "Flight Weather Assessment Report");
        self.text(
            CENTER_X,
            25.0,
            12.0,
            false,
            BLACK,
            Align::Center,
            &format!("Route: {} -> {}", route.origin, route.destination),
        );
        self.text(
            CENTER_X,
            30.0,
            12.0,
            false,
            MUTED,
            Align::Center,
            &format!(
                "Report Generated: {}",
                model.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        );

        self.current.primitives.push(Primitive::Line {
            x1: MARGIN,
            y1: 34.0,
            x2: PAGE_WIDTH_MM - MARGIN,
            y2: 34.0,
            color: GRID,
            width: 0.3,
        });

        self.text(MARGIN, 40.0, 16.0, true, BLACK, Align::Left, "Flight Summary");
        self.text(
            MARGIN,
            48.0,
            12.0,
            false,
            BLACK,
            Align::Left,
            &format!("Number of Cities En Route: {}", summary.airport_count),
        );

        let label = "Weather Status: ";
        self.text(MARGIN, 54.0, 12.0, false, BLACK, Align::Left, label);
        self.text(
            MARGIN + text_width_mm(label, 12.0, false),
            54.0,
            12.0,
            true,
            summary.color().rgb(),
            Align::Left,
            &summary.overall_verdict_text,
        );

        self.y = 65.0;
    }

    fn section_heading(&mut self, title: &str) {
        // Keep a heading together with the table header and at least one row
        let needed = 5.0 + 2.0 * (line_height(TABLE_FONT) + 2.0 * CELL_PADDING);
        if self.y + needed > BOTTOM {
            self.new_page();
            self.y = TOP;
        }

        self.text(MARGIN, self.y, 14.0, true, BLACK, Align::Left, title);
        self.y += 5.0;
    }

    fn conditions_table(&mut self, model: &ReportModel) {
        self.section_heading("Route Weather Conditions");

        let columns = [
            Column {
                header: "City",
                width: 45.0,
            },
            Column {
                header: "Code",
                width: 30.0,
            },
            Column {
                header: "Condition",
                width: 62.0,
            },
            Column {
                header: "Risk Level",
                width: CONTENT_WIDTH - 137.0,
            },
        ];

        let rows: Vec<Vec<Cell>> = model
            .table_rows
            .iter()
            .map(|row| {
                vec![
                    Cell::plain(&row.city),
                    Cell::plain(&row.icao_code),
                    Cell::plain(&row.condition_label),
                    Cell {
                        text: row.risk_label.clone(),
                        color: Some(row.risk_level.color().rgb()),
                    },
                ]
            })
            .collect();

        self.table(&columns, &rows);
    }

    fn detail_table(&mut self, model: &ReportModel) {
        self.y += 10.0;
        self.section_heading("Detailed Weather Data");

        let columns = [
            Column {
                header: "Location",
                width: 30.0,
            },
            Column {
                header: "Raw Weather Data",
                width: (CONTENT_WIDTH - 30.0) / 2.0,
            },
            Column {
                header: "Forecast Data",
                width: (CONTENT_WIDTH - 30.0) / 2.0,
            },
        ];

        let rows: Vec<Vec<Cell>> = model
            .detail_sections
            .iter()
            .map(|section| {
                vec![
                    Cell::plain(section.location()),
                    Cell::plain(&section.raw_code),
                    Cell::plain(section.forecast_text.as_deref().unwrap_or(NO_TAF)),
                ]
            })
            .collect();

        self.table(&columns, &rows);
    }

    fn table_header(&mut self, columns: &[Column]) {
        let height = line_height(TABLE_FONT) + 2.0 * CELL_PADDING;
        let mut x = MARGIN;

        for column in columns {
            self.rect(x, self.y, column.width, height, Some(HEADER_FILL), Some(HEADER_FILL));
            self.text(
                x + CELL_PADDING,
                self.y + CELL_PADDING + line_height(TABLE_FONT) * 0.75,
                TABLE_FONT,
                true,
                WHITE,
                Align::Left,
                column.header,
            );
            x += column.width;
        }

        self.y += height;
    }

    fn table(&mut self, columns: &[Column], rows: &[Vec<Cell>]) {
        let line_h = line_height(TABLE_FONT);
        let header_h = line_h + 2.0 * CELL_PADDING;
        let fresh_page_capacity = ((BOTTOM - TOP - header_h - 2.0 * CELL_PADDING) / line_h).floor() as usize;

        self.table_header(columns);
        let mut rows_on_page = 0usize;

        for (index, row) in rows.iter().enumerate() {
            let wrapped: Vec<Vec<String>> = columns
                .iter()
                .zip(row)
                .map(|(column, cell)| wrap_text(&cell.text, column.width - 2.0 * CELL_PADDING, TABLE_FONT))
                .collect();
            let total = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let fill = (index % 2 == 1).then_some(STRIPE_FILL);

            let mut offset = 0;
            while offset < total {
                let remaining = total - offset;
                let available = BOTTOM - self.y - 2.0 * CELL_PADDING;
                let fit = if available > 0.0 {
                    (available / line_h).floor() as usize
                } else {
                    0
                };

                // Move whole rows to the next page when they would fit there
                let defer_row = offset == 0 && remaining > fit && remaining <= fresh_page_capacity;
                if rows_on_page > 0 && (fit == 0 || defer_row) {
                    self.new_page();
                    self.table_header(columns);
                    rows_on_page = 0;
                    continue;
                }

                let take = remaining.min(fit.max(1));
                let height = take as f32 * line_h + 2.0 * CELL_PADDING;
                let mut x = MARGIN;

                for ((column, cell), lines) in columns.iter().zip(row).zip(&wrapped) {
                    self.rect(x, self.y, column.width, height, fill, Some(GRID));

                    let color = cell.color.unwrap_or(BLACK);
                    let bold = cell.color.is_some();
                    for (k, line) in lines.iter().skip(offset).take(take).enumerate() {
                        self.text(
                            x + CELL_PADDING,
                            self.y + CELL_PADDING + k as f32 * line_h + line_h * 0.75,
                            TABLE_FONT,
                            bold,
                            color,
                            Align::Left,
                            line,
                        );
                    }
                    x += column.width;
                }

                self.y += height;
                offset += take;
                rows_on_page += 1;
            }
        }
    }

    /// Close the last page and stamp every page with its footer
    fn finish(mut self, year: i32) -> Vec<Page> {
        self.finished.push(std::mem::take(&mut self.current));
        let finished = std::mem::take(&mut self.finished);
        let total = finished.len();

        let mut pages = Vec::with_capacity(total);
        for (index, page) in finished.into_iter().enumerate() {
            self.current = page;
            self.text(
                CENTER_X,
                FOOTER_Y,
                10.0,
                false,
                MUTED,
                Align::Center,
                &format!("Flight Weather Assessment Tool \u{a9} {year}"),
            );
            self.text(
                FOOTER_RIGHT_X,
                FOOTER_Y,
                10.0,
                false,
                MUTED,
                Align::Right,
                &format!("Page {} of {}", index + 1, total),
            );
            pages.push(std::mem::take(&mut self.current));
        }

        pages
    }
}
