//! Canonical report model shared by every projection
//!
//! The model is built once from a [`RouteAssessment`] and then handed, by
//! value or reference, to the interactive and printable renderers. All text
//! normalization that both sinks must agree on happens here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::risk::{RiskLevel, SeverityColor};
use crate::route::{AssessedAirport, RouteAssessment};
use crate::weather::{METAR_UNAVAILABLE, normalize_raw_code};

/// Origin and destination codes, upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLabel {
    pub origin: String,
    pub destination: String,
}

impl RouteLabel {
    #[must_use]
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.trim().to_ascii_uppercase(),
            destination: destination.trim().to_ascii_uppercase(),
        }
    }

    /// File name of the printable document for this route
    #[must_use]
    pub fn document_file_name(&self) -> String {
        document_file_name(&self.origin, &self.destination)
    }
}

/// Route-level verdict, phrased for the summary banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: &'static str,
    pub recommendation: &'static str,
}

impl Verdict {
    /// Mirrors the classifier boundaries through [`RiskLevel`]
    #[must_use]
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Self {
                status: "Hazardous",
                recommendation: "Not Recommended",
            },
            RiskLevel::Moderate => Self {
                status: "Caution",
                recommendation: "Proceed with Caution",
            },
            RiskLevel::Low => Self {
                status: "Favorable",
                recommendation: "Safe to Fly",
            },
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        format!("{} / {}", self.status, self.recommendation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub airport_count: usize,
    pub overall_risk_level: RiskLevel,
    pub verdict: Verdict,
    pub overall_verdict_text: String,
}

impl Summary {
    #[must_use]
    pub fn color(&self) -> SeverityColor {
        self.overall_risk_level.color()
    }
}

/// Row of the overview table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub city: String,
    pub icao_code: String,
    pub condition_label: String,
    pub risk_label: String,
    pub risk_level: RiskLevel,
}

/// Full weather text for one airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSection {
    pub city: String,
    pub icao_code: String,
    /// Complete METAR, or [`METAR_UNAVAILABLE`]
    pub raw_code: String,
    pub forecast_text: Option<String>,
    pub risk_label: String,
    pub risk_level: RiskLevel,
    pub risk_details: Vec<String>,
}

impl DetailSection {
    #[must_use]
    pub fn location(&self) -> String {
        format!("{} ({})", self.city, self.icao_code)
    }
}

/// Severe weather alert for the first hazardous airport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub city: String,
    pub icao_code: String,
    pub message: String,
}

impl Alert {
    fn for_airport(airport: &AssessedAirport) -> Self {
        let record = &airport.record;
        Self {
            city: record.city.clone(),
            icao_code: record.icao_code.clone(),
            message: format!(
                "Severe Weather Alert: Hazardous conditions detected near {}",
                record.display_name()
            ),
        }
    }
}

/// Format-agnostic report of one classified route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportModel {
    pub route: RouteLabel,
    pub summary: Summary,
    pub table_rows: Vec<TableRow>,
    pub detail_sections: Vec<DetailSection>,
    pub alert: Option<Alert>,
    pub generated_at: DateTime<Utc>,
}

impl ReportModel {
    /// Build the model, stamped with the current time
    #[must_use]
    pub fn build(assessment: &RouteAssessment, origin: &str, destination: &str) -> Self {
        Self::build_at(assessment, origin, destination, Utc::now())
    }

    /// Build the model with an explicit generation timestamp
    #[must_use]
    pub fn build_at(
        assessment: &RouteAssessment,
        origin: &str,
        destination: &str,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let level = assessment.route_risk_level();
        let verdict = Verdict::for_level(level);

        let summary = Summary {
            airport_count: assessment.airports().len(),
            overall_risk_level: level,
            verdict,
            overall_verdict_text: verdict.text(),
        };

        let table_rows = assessment
            .airports()
            .iter()
            .map(|airport| TableRow {
                city: airport.record.city.clone(),
                icao_code: airport.record.icao_code.clone(),
                condition_label: airport.condition.to_string(),
                risk_label: airport.risk_level.label().to_string(),
                risk_level: airport.risk_level,
            })
            .collect();

        let detail_sections = assessment.airports().iter().map(detail_section).collect();

        Self {
            route: RouteLabel::new(origin, destination),
            summary,
            table_rows,
            detail_sections,
            alert: assessment.alert_target().map(Alert::for_airport),
            generated_at,
        }
    }

    #[must_use]
    pub fn document_file_name(&self) -> String {
        self.route.document_file_name()
    }
}

fn detail_section(airport: &AssessedAirport) -> DetailSection {
    let record = &airport.record;

    let raw_code = match normalize_raw_code(record.raw_code.as_deref()) {
        Ok(code) => code.to_string(),
        Err(missing) => {
            warn!(icao = %record.icao_code, %missing, "Using placeholder METAR text");
            METAR_UNAVAILABLE.to_string()
        }
    };

    let forecast_text = record
        .forecast_text
        .as_deref()
        .map(str::trim)
        .filter(|taf| !taf.is_empty())
        .map(str::to_string);

    DetailSection {
        city: record.city.clone(),
        icao_code: record.icao_code.clone(),
        raw_code,
        forecast_text,
        risk_label: airport.risk_level.label().to_string(),
        risk_level: airport.risk_level,
        risk_details: record.risk_details.clone(),
    }
}

/// `Flight_Weather_Report_<ORIGIN>_to_<DEST>.pdf`
#[must_use]
pub fn document_file_name(origin: &str, destination: &str) -> String {
    format!(
        "Flight_Weather_Report_{}_to_{}.pdf",
        origin.trim().to_ascii_uppercase(),
        destination.trim().to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AirportWeatherRecord;
    use crate::route::aggregate;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_verdict_follows_classifier_boundaries() {
        for (score, text) in [
            (1, "Hazardous / Not Recommended"),
            (0, "Caution / Proceed with Caution"),
            (-1, "Favorable / Safe to Fly"),
        ] {
            let assessment = aggregate(vec![AirportWeatherRecord::new("X", "XXXX", score)]).unwrap();
            let model = ReportModel::build_at(&assessment, "DEL", "BOM", fixed_time());
            assert_eq!(model.summary.overall_verdict_text, text);
            assert_eq!(
                model.summary.overall_risk_level,
                RiskLevel::classify(score)
            );
        }
    }

    #[test]
    fn test_rows_keep_input_order() {
        let assessment = aggregate(vec![
            AirportWeatherRecord::new("Delhi", "VIDP", -1),
            AirportWeatherRecord::new("Jaipur", "VIJP", 0),
            AirportWeatherRecord::new("Mumbai", "VABB", 1),
        ])
        .unwrap();
        let model = ReportModel::build_at(&assessment, "del", "bom", fixed_time());

        let codes: Vec<_> = model.table_rows.iter().map(|r| r.icao_code.as_str()).collect();
        assert_eq!(codes, vec!["VIDP", "VIJP", "VABB"]);
        let detail_codes: Vec<_> = model
            .detail_sections
            .iter()
            .map(|d| d.icao_code.as_str())
            .collect();
        assert_eq!(detail_codes, codes);
        assert_eq!(model.summary.airport_count, 3);
        assert_eq!(model.route.origin, "DEL");
        assert_eq!(model.table_rows[2].risk_label, "High Risk");
    }

    #[test]
    fn test_missing_or_failed_metar_uses_sentinel() {
        let long_metar = "VIDP 191030Z 27004KT 3000 HZ NSC 31/12 Q1010 NOSIG";
        let assessment = aggregate(vec![
            AirportWeatherRecord::new("Delhi", "VIDP", -1).with_raw_code(long_metar),
            AirportWeatherRecord::new("Jaipur", "VIJP", 0),
            AirportWeatherRecord::new("Goa", "VOGO", 0).with_raw_code("METAR fetch failed"),
            AirportWeatherRecord::new("Pune", "VAPO", 0).with_raw_code("No METAR data"),
        ])
        .unwrap();
        let model = ReportModel::build_at(&assessment, "DEL", "GOI", fixed_time());

        assert_eq!(model.detail_sections[0].raw_code, long_metar);
        for section in &model.detail_sections[1..] {
            assert_eq!(section.raw_code, "No METAR data available");
        }
    }

    #[test]
    fn test_alert_and_details() {
        let assessment = aggregate(vec![
            AirportWeatherRecord::new("Delhi", "VIDP", -1).with_forecast("  "),
            AirportWeatherRecord::new("Mumbai", "VABB", 1)
                .with_forecast("TAF VABB 190500Z 1906/2012 TSRA")
                .with_risk_details(["Hazard in METAR", "Hazard in TAF"]),
        ])
        .unwrap();
        let model = ReportModel::build_at(&assessment, "DEL", "BOM", fixed_time());

        let alert = model.alert.as_ref().unwrap();
        assert_eq!(alert.icao_code, "VABB");
        assert_eq!(
            alert.message,
            "Severe Weather Alert: Hazardous conditions detected near Mumbai (VABB)"
        );
        assert_eq!(model.detail_sections[0].forecast_text, None);
        assert_eq!(model.detail_sections[1].risk_details.len(), 2);
        assert_eq!(model.detail_sections[1].location(), "Mumbai (VABB)");
    }

    #[test]
    fn test_document_file_name() {
        assert_eq!(
            document_file_name(" del", "bom "),
            "Flight_Weather_Report_DEL_to_BOM.pdf"
        );
        assert_eq!(
            RouteLabel::new("ccu", "goi").document_file_name(),
            "Flight_Weather_Report_CCU_to_GOI.pdf"
        );
    }
}
