//! Per-airport weather record and its wire representation

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Weather observation for one airport along the route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportWeatherRecord {
    /// City the airport serves
    pub city: String,
    /// 4-letter ICAO identifier
    pub icao_code: String,
    /// Coded METAR text, if any was retrieved
    pub raw_code: Option<String>,
    /// Coded TAF text, if any was retrieved
    pub forecast_text: Option<String>,
    /// Hazard indicator: -1 low, 0 moderate, 1 high
    pub risk_score: i64,
    /// Free-text hazard notes in provider order
    pub risk_details: Vec<String>,
}

impl AirportWeatherRecord {
    /// Create a record with no weather text attached
    #[must_use]
    pub fn new(city: impl Into<String>, icao_code: impl Into<String>, risk_score: i64) -> Self {
        Self {
            city: city.into(),
            icao_code: icao_code.into(),
            raw_code: None,
            forecast_text: None,
            risk_score,
            risk_details: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_raw_code(mut self, raw_code: impl Into<String>) -> Self {
        self.raw_code = Some(raw_code.into());
        self
    }

    #[must_use]
    pub fn with_forecast(mut self, forecast_text: impl Into<String>) -> Self {
        self.forecast_text = Some(forecast_text.into());
        self
    }

    #[must_use]
    pub fn with_risk_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.risk_details = details.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this airport triggers the severe weather alert
    #[must_use]
    pub fn is_hazardous(&self) -> bool {
        self.risk_score > 0
    }

    /// Label used wherever the airport is named, e.g. `Mumbai (VABB)`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.city, self.icao_code)
    }
}

/// Airport entry as returned by the weather provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportWeatherDto {
    pub city: String,
    pub icao_code: String,
    pub weather: WeatherDto,
}

/// Nested weather block of the provider response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDto {
    #[serde(default)]
    pub metar: Option<String>,
    #[serde(default)]
    pub taf: Option<String>,
    pub risk_score: i64,
    #[serde(default)]
    pub risk_details: Vec<String>,
}

impl From<AirportWeatherDto> for AirportWeatherRecord {
    fn from(dto: AirportWeatherDto) -> Self {
        if !(-1..=1).contains(&dto.weather.risk_score) {
            warn!(
                icao = %dto.icao_code,
                risk_score = dto.weather.risk_score,
                "Risk score outside -1..=1, classifying by sign"
            );
        }

        Self {
            city: dto.city,
            icao_code: dto.icao_code,
            raw_code: dto.weather.metar.filter(|m| !m.trim().is_empty()),
            forecast_text: dto.weather.taf.filter(|t| !t.trim().is_empty()),
            risk_score: dto.weather.risk_score,
            risk_details: dto.weather.risk_details,
        }
    }
}

impl From<&AirportWeatherRecord> for AirportWeatherDto {
    fn from(record: &AirportWeatherRecord) -> Self {
        Self {
            city: record.city.clone(),
            icao_code: record.icao_code.clone(),
            weather: WeatherDto {
                metar: record.raw_code.clone(),
                taf: record.forecast_text.clone(),
                risk_score: record.risk_score,
                risk_details: record.risk_details.clone(),
            },
        }
    }
}

/// Parse a provider response body into records, preserving order
pub fn parse_records(body: &str) -> serde_json::Result<Vec<AirportWeatherRecord>> {
    let dtos: Vec<AirportWeatherDto> = serde_json::from_str(body)?;
    Ok(dtos.into_iter().map(AirportWeatherRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_response() {
        let body = r#"[
            {"city": "Delhi", "icao_code": "VIDP",
             "weather": {"metar": "VIDP 191030Z 27004KT 3000 HZ NSC 31/12 Q1010",
                         "taf": "TAF VIDP 190500Z 1906/2012 28005KT 3000 HZ",
                         "risk_score": -1, "risk_details": []}},
            {"city": "Mumbai", "icao_code": "VABB",
             "weather": {"metar": "VABB 191030Z 24008KT 2500 TSRA BKN010",
                         "taf": "No TAF data",
                         "risk_score": 1, "risk_details": ["Hazard in METAR"]}}
        ]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].icao_code, "VIDP");
        assert_eq!(records[1].risk_details, vec!["Hazard in METAR"]);
        assert!(records[1].is_hazardous());
        assert!(!records[0].is_hazardous());
    }

    #[test]
    fn test_missing_weather_fields_degrade() {
        let body = r#"[{"city": "Goa", "icao_code": "VOGO",
                        "weather": {"metar": "  ", "risk_score": 0}}]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records[0].raw_code, None);
        assert_eq!(records[0].forecast_text, None);
        assert!(records[0].risk_details.is_empty());
    }

    #[test]
    fn test_risk_score_is_required() {
        let body = r#"[{"city": "Goa", "icao_code": "VOGO", "weather": {"metar": "VOGO"}}]"#;
        assert!(parse_records(body).is_err());
    }

    #[test]
    fn test_display_name() {
        let record = AirportWeatherRecord::new("Mumbai", "VABB", 1);
        assert_eq!(record.display_name(), "Mumbai (VABB)");
    }
}
