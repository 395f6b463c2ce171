//! Data models for the flight weather assessment
//!
//! - Record: one airport's weather observation and its wire form
//! - Route: the origin/destination request

pub mod record;
pub mod route;

pub use record::{AirportWeatherDto, AirportWeatherRecord, WeatherDto, parse_records};
pub use route::RouteRequest;
