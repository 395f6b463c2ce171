use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, warn};

use crate::{
    error::FlightWeatherError,
    models::RouteRequest,
    pipeline::{Assessment, fetch_and_assess},
    render::InteractiveView,
    source::RecordSource,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    async fn assess(&self, request: &RouteRequest) -> Result<Assessment, ApiError> {
        let request = request.normalized()?;
        Ok(fetch_and_assess(self.source.as_ref(), &request).await?)
    }
}

/// JSON and PDF endpoints, nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assessment", post(assessment))
        .route("/report", post(report))
}

/// Browser pages
pub fn pages() -> Router<AppState> {
    Router::new().route("/route/{origin}/{destination}", get(route_page))
}

async fn assessment(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<InteractiveView>, ApiError> {
    let assessment = state.assess(&request).await?;
    Ok(Json(assessment.interactive()))
}

async fn report(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Response, ApiError> {
    let assessment = state.assess(&request).await?;
    let file_name = assessment.document_file_name();

    let bytes = tokio::task::spawn_blocking(move || assessment.pdf())
        .await
        .map_err(|e| FlightWeatherError::render(format!("PDF task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn route_page(
    State(state): State<AppState>,
    Path((origin, destination)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    let request = RouteRequest::new(&origin, &destination)?;
    let assessment = state.assess(&request).await?;
    Ok(Html(assessment.interactive().to_html()))
}

/// Maps pipeline failures onto HTTP responses
#[derive(Debug)]
pub struct ApiError(FlightWeatherError);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FlightWeatherError::Validation { .. } => StatusCode::BAD_REQUEST,
            FlightWeatherError::EmptyRoute => StatusCode::UNPROCESSABLE_ENTITY,
            FlightWeatherError::UpstreamFetch { .. } => StatusCode::BAD_GATEWAY,
            FlightWeatherError::Render { .. }
            | FlightWeatherError::Config { .. }
            | FlightWeatherError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FlightWeatherError> for ApiError {
    fn from(error: FlightWeatherError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }
        (status, self.0.user_message()).into_response()
    }
}
