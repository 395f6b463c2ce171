//! `flight-weather` - Route weather risk assessment
//!
//! Classifies the weather reported at each airport along a flight route,
//! reduces it to a route verdict, and renders the result as an interactive
//! view or a paginated PDF report.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod risk;
pub mod route;
pub mod source;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::FlightWeatherConfig;
pub use error::{FlightWeatherError, MissingWeatherData};
pub use models::{AirportWeatherRecord, RouteRequest};
pub use pipeline::{Assessment, assess, fetch_and_assess};
pub use render::{InteractiveView, PrintableDocument, render_pdf};
pub use report::ReportModel;
pub use risk::{RiskLevel, SeverityColor};
pub use route::{RouteAssessment, aggregate};
pub use source::{FileRecordSource, HttpRecordSource, RecordSource, StaticRecordSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FlightWeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
