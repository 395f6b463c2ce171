//! Route-level aggregation of per-airport classifications

use serde::Serialize;
use tracing::{debug, info};

use crate::error::FlightWeatherError;
use crate::models::AirportWeatherRecord;
use crate::risk::RiskLevel;
use crate::weather::extract_condition;

/// One airport with its derived classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessedAirport {
    pub record: AirportWeatherRecord,
    pub risk_level: RiskLevel,
    pub condition: &'static str,
}

impl AssessedAirport {
    #[must_use]
    pub fn assess(record: AirportWeatherRecord) -> Self {
        let risk_level = RiskLevel::classify(record.risk_score);
        let condition = extract_condition(record.raw_code.as_deref());

        Self {
            record,
            risk_level,
            condition,
        }
    }
}

/// Classified route, immutable once built
#[derive(Debug, Clone, Serialize)]
pub struct RouteAssessment {
    airports: Vec<AssessedAirport>,
    route_risk_level: RiskLevel,
    alert_index: Option<usize>,
}

impl RouteAssessment {
    /// Airports in input order
    #[must_use]
    pub fn airports(&self) -> &[AssessedAirport] {
        &self.airports
    }

    /// Worst risk level along the route
    #[must_use]
    pub fn route_risk_level(&self) -> RiskLevel {
        self.route_risk_level
    }

    #[must_use]
    pub fn alert_required(&self) -> bool {
        self.alert_index.is_some()
    }

    /// First hazardous airport in input order
    #[must_use]
    pub fn alert_target(&self) -> Option<&AssessedAirport> {
        self.alert_index.map(|i| &self.airports[i])
    }

    /// ICAO codes of airports whose METAR was unusable
    #[must_use]
    pub fn airports_without_weather(&self) -> Vec<&str> {
        self.airports
            .iter()
            .filter(|a| a.condition == crate::weather::CONDITION_UNAVAILABLE)
            .map(|a| a.record.icao_code.as_str())
            .collect()
    }
}

/// Classify every record and reduce them to a route verdict
pub fn aggregate(records: Vec<AirportWeatherRecord>) -> crate::Result<RouteAssessment> {
    if records.is_empty() {
        return Err(FlightWeatherError::EmptyRoute);
    }

    let airports: Vec<AssessedAirport> = records.into_iter().map(AssessedAirport::assess).collect();

    let route_risk_level = airports
        .iter()
        .map(|a| a.risk_level)
        .max()
        .unwrap_or(RiskLevel::Low);

    let alert_index = airports.iter().position(|a| a.record.is_hazardous());

    for airport in &airports {
        debug!(
            icao = %airport.record.icao_code,
            risk = %airport.risk_level,
            condition = airport.condition,
            "Classified airport"
        );
    }

    info!(
        airports = airports.len(),
        route_risk = %route_risk_level,
        alert = alert_index.is_some(),
        "Aggregated route assessment"
    );

    Ok(RouteAssessment {
        airports,
        route_risk_level,
        alert_index,
    })
}
