//! Projections of a [`ReportModel`]
//!
//! The interactive view and the printable document are independent sinks
//! over the same model; neither renderer re-derives risk or verdicts.

pub mod interactive;
pub mod pdf;
pub mod printable;

pub use interactive::InteractiveView;
pub use printable::PrintableDocument;

use crate::report::ReportModel;

/// Lay out and serialize the printable report
pub fn render_pdf(model: &ReportModel) -> crate::Result<Vec<u8>> {
    let document = PrintableDocument::layout(model);
    pdf::write_pdf(&document)
}
