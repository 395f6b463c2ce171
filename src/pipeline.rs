//! Single entry point from fetched records to a renderable report

use tracing::{info, instrument};

use crate::models::{AirportWeatherRecord, RouteRequest};
use crate::render::{InteractiveView, render_pdf};
use crate::report::ReportModel;
use crate::route::{RouteAssessment, aggregate};
use crate::source::RecordSource;

/// Classified route plus its report model, handed to whichever projection
/// the caller needs
#[derive(Debug, Clone)]
pub struct Assessment {
    pub route: RouteAssessment,
    pub report: ReportModel,
}

impl Assessment {
    #[must_use]
    pub fn interactive(&self) -> InteractiveView {
        InteractiveView::from_model(&self.report)
    }

    pub fn pdf(&self) -> crate::Result<Vec<u8>> {
        render_pdf(&self.report)
    }

    #[must_use]
    pub fn document_file_name(&self) -> String {
        self.report.document_file_name()
    }
}

/// Aggregate the records and build the report model
pub fn assess(records: Vec<AirportWeatherRecord>, request: &RouteRequest) -> crate::Result<Assessment> {
    let route = aggregate(records)?;
    let report = ReportModel::build(&route, request.origin(), request.destination());

    info!(
        origin = request.origin(),
        destination = request.destination(),
        verdict = %report.summary.overall_verdict_text,
        "Route assessed"
    );

    Ok(Assessment { route, report })
}

/// Fetch the route's records from `source`, then [`assess`] them
#[instrument(skip(source), fields(source = source.name()))]
pub async fn fetch_and_assess(
    source: &dyn RecordSource,
    request: &RouteRequest,
) -> crate::Result<Assessment> {
    let records = source.fetch(request).await?;
    assess(records, request)
}
