//! Where per-airport weather records come from
//!
//! The pipeline never fetches anything itself. Callers pick a
//! [`RecordSource`]: the upstream weather service over HTTP, a JSON file
//! captured from it, or records held in memory.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::UpstreamConfig;
use crate::error::FlightWeatherError;
use crate::models::{AirportWeatherRecord, RouteRequest, parse_records};

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Provider of the ordered airport records for a route
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, request: &RouteRequest) -> crate::Result<Vec<AirportWeatherRecord>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Upstream weather service, `POST <base_url>/api/weather`
pub struct HttpRecordSource {
    client: Client,
    endpoint: String,
}

impl HttpRecordSource {
    pub fn new(config: &UpstreamConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("flight-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FlightWeatherError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/weather", config.base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, request: &RouteRequest) -> crate::Result<Vec<AirportWeatherRecord>> {
        let started = Instant::now();
        debug!("Requesting route weather from upstream");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Upstream request failed");
                FlightWeatherError::upstream(e.status().map(|s| s.as_u16()), e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlightWeatherError::upstream(Some(status.as_u16()), e.to_string()))?;

        let elapsed = started.elapsed();
        if elapsed > SLOW_RESPONSE {
            warn!("Slow upstream response: {:.3}s", elapsed.as_secs_f64());
        }

        if !status.is_success() {
            let message = match body.trim() {
                "" => status.canonical_reason().unwrap_or("Unknown error").to_string(),
                text => text.to_string(),
            };
            warn!(status = status.as_u16(), %message, "Upstream returned an error");
            return Err(FlightWeatherError::upstream(Some(status.as_u16()), message));
        }

        let records = parse_records(&body).map_err(|e| {
            FlightWeatherError::upstream(Some(status.as_u16()), format!("Invalid weather data: {e}"))
        })?;

        info!(
            airports = records.len(),
            "Fetched route weather in {:.3}s",
            elapsed.as_secs_f64()
        );
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// JSON captured from the upstream service, stored on disk
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self, request: &RouteRequest) -> crate::Result<Vec<AirportWeatherRecord>> {
        let body = tokio::fs::read_to_string(&self.path).await?;

        let records = parse_records(&body).map_err(|e| {
            FlightWeatherError::validation(format!(
                "Invalid weather data in {}: {e}",
                self.path.display()
            ))
        })?;

        debug!(
            airports = records.len(),
            origin = request.origin(),
            destination = request.destination(),
            "Loaded route weather from file"
        );
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Fixed records, returned for every route
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    records: Vec<AirportWeatherRecord>,
}

impl StaticRecordSource {
    #[must_use]
    pub fn new(records: Vec<AirportWeatherRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch(&self, _request: &RouteRequest) -> crate::Result<Vec<AirportWeatherRecord>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::io::Write;

    fn request() -> RouteRequest {
        RouteRequest::new("del", "bom").unwrap()
    }

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn upstream_config(base_url: String) -> UpstreamConfig {
        UpstreamConfig {
            base_url,
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_http_source_posts_route_and_parses_records() {
        let app = Router::new().route(
            "/api/weather",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["start_airport"], "DEL");
                assert_eq!(body["destination_airport"], "BOM");
                Json(json!([
                    {"city": "Delhi", "icao_code": "VIDP", "weather": {"metar": "VIDP 191030Z CLR", "risk_score": -1}},
                    {"city": "Mumbai", "icao_code": "VABB", "weather": {"risk_score": 1, "risk_details": ["Hazard in METAR"]}}
                ]))
            }),
        );
        let source = HttpRecordSource::new(&upstream_config(spawn_upstream(app).await)).unwrap();

        let records = source.fetch(&request()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].icao_code, "VIDP");
        assert_eq!(records[1].risk_score, 1);
        assert_eq!(records[1].raw_code, None);
    }

    #[tokio::test]
    async fn test_http_source_surfaces_error_body() {
        let app = Router::new().route(
            "/api/weather",
            post(|| async { (StatusCode::BAD_REQUEST, "No airports found") }),
        );
        let base = spawn_upstream(app).await;
        let source = HttpRecordSource::new(&upstream_config(format!("{base}/"))).unwrap();
        assert!(!source.endpoint().contains("//api"));

        let error = source.fetch(&request()).await.unwrap_err();
        match &error {
            FlightWeatherError::UpstreamFetch { status, message } => {
                assert_eq!(*status, Some(400));
                assert_eq!(message, "No airports found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.to_string(), "API Error: No airports found");
    }

    #[tokio::test]
    async fn test_http_source_falls_back_to_status_reason() {
        let app = Router::new().route(
            "/api/weather",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let source = HttpRecordSource::new(&upstream_config(spawn_upstream(app).await)).unwrap();

        let error = source.fetch(&request()).await.unwrap_err();
        assert_eq!(error.to_string(), "API Error: Service Unavailable");
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"city": "Goa", "icao_code": "VOGO", "weather": {{"metar": "", "risk_score": 0}}}}]"#
        )
        .unwrap();

        let records = FileRecordSource::new(file.path()).fetch(&request()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].raw_code, None);
    }

    #[tokio::test]
    async fn test_file_source_errors() {
        let missing = FileRecordSource::new("/nonexistent/route.json");
        assert!(matches!(
            missing.fetch(&request()).await,
            Err(FlightWeatherError::Io { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            FileRecordSource::new(file.path()).fetch(&request()).await,
            Err(FlightWeatherError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticRecordSource::new(vec![AirportWeatherRecord::new("Goa", "VOGO", 0)]);
        assert_eq!(source.fetch(&request()).await.unwrap().len(), 1);
        assert_eq!(source.name(), "static");
    }
}
