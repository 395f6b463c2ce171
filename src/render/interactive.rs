//! Interactive route view
//!
//! Projects a [`ReportModel`] into the view model the browser page binds to,
//! and renders the same view as a standalone HTML page.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use std::fmt::Write;

use crate::report::{ReportModel, TableRow};
use crate::risk::{RiskLevel, SeverityColor};
use crate::weather::{IconCategory, icon_category};

/// Characters of METAR shown on a detail card
pub const CARD_RAW_CODE_CHARS: usize = 30;

const ELLIPSIS: &str = "...";
const NO_RISK_DETAILS: &str = "None identified";

#[derive(Debug, Clone, Serialize)]
pub struct SummaryBanner {
    pub origin: String,
    pub destination: String,
    pub airport_count: usize,
    pub status: &'static str,
    pub recommendation: &'static str,
    pub color: SeverityColor,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub city: String,
    pub icao_code: String,
    pub condition: String,
    pub icon: IconCategory,
    pub risk_label: String,
    pub badge_class: &'static str,
}

/// Colored bar between airport `i` and `i + 1`, in percent of the strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripSegment {
    pub left_percent: f64,
    pub width_percent: f64,
    pub color: SeverityColor,
}

#[derive(Debug, Clone, Serialize)]
pub struct StripIndicator {
    pub city: String,
    pub color: SeverityColor,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStrip {
    pub segments: Vec<StripSegment>,
    pub indicators: Vec<StripIndicator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailCard {
    pub title: String,
    pub risk_label: String,
    pub badge_class: &'static str,
    pub condition: String,
    pub raw_code_excerpt: String,
    pub risk_details: String,
}

/// Everything the interactive page displays for one route
#[derive(Debug, Clone, Serialize)]
pub struct InteractiveView {
    pub banner: SummaryBanner,
    pub alert: Option<String>,
    pub overview: Vec<OverviewRow>,
    pub progress: ProgressStrip,
    pub cards: Vec<DetailCard>,
    pub document_file_name: String,
    pub generated_at: String,
}

impl InteractiveView {
    #[must_use]
    pub fn from_model(model: &ReportModel) -> Self {
        let summary = &model.summary;

        let banner = SummaryBanner {
            origin: model.route.origin.clone(),
            destination: model.route.destination.clone(),
            airport_count: summary.airport_count,
            status: summary.verdict.status,
            recommendation: summary.verdict.recommendation,
            color: summary.color(),
        };

        let overview = model.table_rows.iter().map(overview_row).collect();

        let levels: Vec<RiskLevel> = model.table_rows.iter().map(|r| r.risk_level).collect();
        let progress = ProgressStrip {
            segments: progress_segments(&levels),
            indicators: model
                .table_rows
                .iter()
                .map(|row| StripIndicator {
                    city: row.city.clone(),
                    color: row.risk_level.color(),
                })
                .collect(),
        };

        let cards = model
            .table_rows
            .iter()
            .zip(&model.detail_sections)
            .map(|(row, section)| DetailCard {
                title: section.location(),
                risk_label: section.risk_label.clone(),
                badge_class: section.risk_level.color().badge_class(),
                condition: row.condition_label.clone(),
                raw_code_excerpt: truncate_raw_code(&section.raw_code),
                risk_details: if section.risk_details.is_empty() {
                    NO_RISK_DETAILS.to_string()
                } else {
                    section.risk_details.join(", ")
                },
            })
            .collect();

        Self {
            banner,
            alert: model.alert.as_ref().map(|a| a.message.clone()),
            overview,
            progress,
            cards,
            document_file_name: model.document_file_name(),
            generated_at: model.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    /// Standalone HTML page of this view
    #[must_use]
    pub fn to_html(&self) -> String {
        render_html(self)
    }
}

fn overview_row(row: &TableRow) -> OverviewRow {
    OverviewRow {
        city: row.city.clone(),
        icao_code: row.icao_code.clone(),
        condition: row.condition_label.clone(),
        icon: icon_category(&row.condition_label),
        risk_label: row.risk_label.clone(),
        badge_class: row.risk_level.color().badge_class(),
    }
}

/// One segment between each pair of consecutive airports, none for a single airport
#[must_use]
pub fn progress_segments(levels: &[RiskLevel]) -> Vec<StripSegment> {
    let n = levels.len();
    if n < 2 {
        return Vec::new();
    }

    let spans = (n - 1) as f64;
    levels[..n - 1]
        .iter()
        .enumerate()
        .map(|(i, level)| StripSegment {
            left_percent: (i as f64 / spans) * 100.0,
            width_percent: 100.0 / spans,
            color: level.color(),
        })
        .collect()
}

/// First 30 characters, with `...` only when something was cut
#[must_use]
pub fn truncate_raw_code(raw_code: &str) -> String {
    let mut chars = raw_code.chars();
    let head: String = chars.by_ref().take(CARD_RAW_CODE_CHARS).collect();

    if chars.next().is_some() {
        head + ELLIPSIS
    } else {
        head
    }
}

const PAGE_STYLE: &str = r"
:root { --success: #2ecc71; --warning: #f39c12; --danger: #e74c3c; --primary: #3498db; }
body { font-family: system-ui, sans-serif; margin: 0; padding: 1.5rem; background: #f5f7fa; color: #2c3e50; }
.banner, .card, table { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.banner { padding: 1rem 1.5rem; margin-bottom: 1rem; }
.alert { background: var(--danger); color: #fff; padding: .75rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
table { width: 100%; border-collapse: collapse; margin-bottom: 1rem; }
th, td { padding: .5rem .75rem; text-align: left; border-bottom: 1px solid #ecf0f1; }
th { background: var(--primary); color: #fff; }
.badge { padding: .15rem .5rem; border-radius: 4px; color: #fff; font-size: .85rem; }
.badge-success { background: var(--success); }
.badge-warning { background: var(--warning); }
.badge-danger { background: var(--danger); }
.strip { position: relative; height: 8px; background: #ecf0f1; border-radius: 4px; margin: 1rem 0 .5rem; }
.strip div { position: absolute; height: 100%; }
.airports { display: flex; margin-bottom: 1rem; }
.airport-point { flex: 1; text-align: center; }
.airport-indicator { width: 12px; height: 12px; border-radius: 50%; margin: 0 auto .25rem; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { padding: 1rem; }
.card-header { display: flex; justify-content: space-between; margin-bottom: .5rem; font-weight: 600; }
";

fn render_html(view: &InteractiveView) -> String {
    let banner = &view.banner;
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Flight Weather: {origin} to {destination}</title>\n\
         <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css\">\n\
         <style>{PAGE_STYLE}</style>\n</head>\n<body>\n",
        origin = encode_text(&banner.origin),
        destination = encode_text(&banner.destination),
    );

    if let Some(alert) = &view.alert {
        let _ = writeln!(html, "<div class=\"alert\">&#9888; {}</div>", encode_text(alert));
    }

    let _ = write!(
        html,
        "<section class=\"banner\">\n<h1>{origin} &rarr; {destination}</h1>\n\
         <p>Cities en route: <strong>{count}</strong></p>\n\
         <p>Weather status: <strong style=\"color: {color}\">{status}</strong> &middot; \
         <strong style=\"color: {color}\">{recommendation}</strong></p>\n\
         <p><small>Generated {generated}</small></p>\n</section>\n",
        origin = encode_text(&banner.origin),
        destination = encode_text(&banner.destination),
        count = banner.airport_count,
        color = banner.color.css_var(),
        status = banner.status,
        recommendation = banner.recommendation,
        generated = encode_text(&view.generated_at),
    );

    html.push_str(
        "<table>\n<thead><tr><th>City</th><th>Code</th><th>Condition</th><th>Risk Level</th></tr></thead>\n<tbody>\n",
    );
    for row in &view.overview {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td><i class=\"fas {} weather-icon\"></i> {}</td>\
             <td><span class=\"badge {}\">{}</span></td></tr>",
            encode_text(&row.city),
            encode_text(&row.icao_code),
            row.icon.icon_class(),
            encode_text(&row.condition),
            row.badge_class,
            encode_text(&row.risk_label),
        );
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<div class=\"strip\">\n");
    for segment in &view.progress.segments {
        let _ = writeln!(
            html,
            "<div style=\"left: {:.2}%; width: {:.2}%; background-color: {}\"></div>",
            segment.left_percent,
            segment.width_percent,
            segment.color.css_var(),
        );
    }
    html.push_str("</div>\n<div class=\"airports\">\n");
    for indicator in &view.progress.indicators {
        let _ = writeln!(
            html,
            "<div class=\"airport-point\"><div class=\"airport-indicator\" style=\"background-color: {}\"></div><span>{}</span></div>",
            indicator.color.css_var(),
            encode_text(&indicator.city),
        );
    }
    html.push_str("</div>\n<section class=\"cards\">\n");

    for card in &view.cards {
        let _ = writeln!(
            html,
            "<div class=\"card\" title=\"{title_attr}\">\n\
             <div class=\"card-header\"><span>{title}</span><span class=\"badge {badge}\">{risk}</span></div>\n\
             <div><strong>Weather:</strong> <span>{condition}</span></div>\n\
             <div><strong>METAR:</strong> <span>{metar}</span></div>\n\
             <div><strong>Risk Details:</strong> <span>{details}</span></div>\n</div>",
            title_attr = encode_double_quoted_attribute(&card.title),
            title = encode_text(&card.title),
            badge = card.badge_class,
            risk = encode_text(&card.risk_label),
            condition = encode_text(&card.condition),
            metar = encode_text(&card.raw_code_excerpt),
            details = encode_text(&card.risk_details),
        );
    }

    html.push_str("</section>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AirportWeatherRecord;
    use crate::route::aggregate;
    use chrono::{TimeZone, Utc};

    fn model(records: Vec<AirportWeatherRecord>) -> ReportModel {
        let assessment = aggregate(records).unwrap();
        ReportModel::build_at(
            &assessment,
            "DEL",
            "BOM",
            Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_strip_math_for_four_airports() {
        let segments = progress_segments(&[
            RiskLevel::Low,
            RiskLevel::High,
            RiskLevel::Moderate,
            RiskLevel::Low,
        ]);

        assert_eq!(segments.len(), 3);
        for segment in &segments {
            assert!(approx(segment.width_percent, 33.33));
        }
        assert!(approx(segments[0].left_percent, 0.0));
        assert!(approx(segments[1].left_percent, 33.33));
        assert!(approx(segments[2].left_percent, 66.67));
        assert_eq!(segments[1].color, SeverityColor::Danger);
    }

    #[test]
    fn test_strip_has_no_segments_for_single_airport() {
        assert!(progress_segments(&[RiskLevel::Moderate]).is_empty());
        assert!(progress_segments(&[]).is_empty());
    }

    #[test]
    fn test_truncation() {
        let exact = "A".repeat(30);
        assert_eq!(truncate_raw_code(&exact), exact);

        let long = "VABB 191030Z 24008KT 2500 TSRA BKN010 CB";
        let cut = truncate_raw_code(long);
        assert_eq!(cut, "VABB 191030Z 24008KT 2500 TSRA...");
        assert_eq!(cut.chars().count(), 33);

        assert_eq!(
            truncate_raw_code("No METAR data available"),
            "No METAR data available"
        );
    }

    #[test]
    fn test_view_from_model() {
        let view = InteractiveView::from_model(&model(vec![
            AirportWeatherRecord::new("Delhi", "VIDP", -1)
                .with_raw_code("VIDP 191030Z 27004KT 3000 HZ NSC 31/12 Q1010"),
            AirportWeatherRecord::new("Mumbai", "VABB", 1)
                .with_raw_code("VABB 191030Z 24008KT 2500 TSRA BKN010")
                .with_risk_details(["Hazard in METAR"]),
        ]));

        assert_eq!(view.banner.status, "Hazardous");
        assert_eq!(view.banner.color, SeverityColor::Danger);
        assert_eq!(view.overview[1].icon, IconCategory::Lightning);
        assert_eq!(view.overview[1].badge_class, "badge-danger");
        assert_eq!(view.progress.segments.len(), 1);
        assert_eq!(view.progress.indicators.len(), 2);
        assert_eq!(view.cards[0].risk_details, "None identified");
        assert_eq!(view.cards[1].risk_details, "Hazard in METAR");
        assert!(view.cards[0].raw_code_excerpt.ends_with("..."));
        assert_eq!(
            view.alert.as_deref(),
            Some("Severe Weather Alert: Hazardous conditions detected near Mumbai (VABB)")
        );
        assert_eq!(view.document_file_name, "Flight_Weather_Report_DEL_to_BOM.pdf");
    }

    #[test]
    fn test_html_escapes_text() {
        let view = InteractiveView::from_model(&model(vec![AirportWeatherRecord::new(
            "<script>alert(1)</script>",
            "VIDP",
            0,
        )]));
        let html = view.to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("No METAR data available"));
        assert!(!html.contains("class=\"alert\""));
    }
}
