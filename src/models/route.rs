//! Route request submitted by the user

use serde::{Deserialize, Serialize};

use crate::error::FlightWeatherError;

/// Origin and destination of a route, as sent to the weather provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_airport: String,
    pub destination_airport: String,
}

impl RouteRequest {
    /// Build a request from user input, trimming and upper-casing both codes
    pub fn new(origin: &str, destination: &str) -> crate::Result<Self> {
        Ok(Self {
            start_airport: normalize_airport_code(origin, "start airport")?,
            destination_airport: normalize_airport_code(destination, "destination airport")?,
        })
    }

    /// Re-validate a request that arrived over the wire
    pub fn normalized(&self) -> crate::Result<Self> {
        Self::new(&self.start_airport, &self.destination_airport)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.start_airport
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination_airport
    }
}

/// Trim and upper-case a 3-letter airport code
pub fn normalize_airport_code(input: &str, field: &str) -> crate::Result<String> {
    let code = input.trim().to_ascii_uppercase();

    if code.is_empty() {
        return Err(FlightWeatherError::validation(format!(
            "Please enter a {field} code"
        )));
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FlightWeatherError::validation(format!(
            "The {field} must be a 3-letter code, got '{}'",
            input.trim()
        )));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_trimmed_and_uppercased() {
        let request = RouteRequest::new("  del ", "Bom").unwrap();
        assert_eq!(request.origin(), "DEL");
        assert_eq!(request.destination(), "BOM");
    }

    #[test]
    fn test_empty_code_rejected() {
        let err = RouteRequest::new("", "BOM").unwrap_err();
        assert!(err.to_string().contains("start airport"));
    }

    #[test]
    fn test_malformed_code_rejected() {
        assert!(RouteRequest::new("DELHI", "BOM").is_err());
        assert!(RouteRequest::new("DEL", "B0M").is_err());
    }

    #[test]
    fn test_wire_request_renormalized() {
        let wire: RouteRequest =
            serde_json::from_str(r#"{"start_airport":"ccu","destination_airport":" goi"}"#)
                .unwrap();
        let request = wire.normalized().unwrap();
        assert_eq!(request.origin(), "CCU");
        assert_eq!(request.destination(), "GOI");
    }
}
