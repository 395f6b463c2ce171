//! Command-line interface for the `flight-weather` binary

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::config::FlightWeatherConfig;
use crate::models::RouteRequest;
use crate::pipeline::fetch_and_assess;
use crate::render::InteractiveView;
use crate::source::{FileRecordSource, HttpRecordSource, RecordSource};
use crate::web;

/// flight-weather - Weather risk along a flight route
///
/// Classifies the weather at every airport between an origin and a
/// destination and renders the result as an interactive page or a PDF.
#[derive(Debug, Parser)]
#[command(name = "flight-weather")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "FLIGHTWX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on, overriding the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Assess a route and print the interactive projection
    Assess {
        #[command(flatten)]
        route: RouteArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Assess a route and write the PDF report
    Report {
        #[command(flatten)]
        route: RouteArgs,

        /// Directory for the PDF, overriding the configuration
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Origin airport code, e.g. DEL
    #[arg(long)]
    pub from: String,

    /// Destination airport code, e.g. BOM
    #[arg(long)]
    pub to: String,

    /// Read weather records from a JSON file instead of the upstream service
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl RouteArgs {
    fn request(&self) -> Result<RouteRequest> {
        Ok(RouteRequest::new(&self.from, &self.to)?)
    }

    fn source(&self, config: &FlightWeatherConfig) -> Result<Arc<dyn RecordSource>> {
        Ok(match &self.input {
            Some(path) => Arc::new(FileRecordSource::new(path)),
            None => Arc::new(HttpRecordSource::new(&config.upstream)?),
        })
    }
}

/// Execute the parsed command
pub async fn run(cli: Cli, config: FlightWeatherConfig) -> Result<()> {
    match cli.command {
        Command::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            let source: Arc<dyn RecordSource> = Arc::new(HttpRecordSource::new(&config.upstream)?);
            web::run(&config, source).await
        }
        Command::Assess {
            route,
            format,
            output,
        } => {
            let request = route.request()?;
            let source = route.source(&config)?;
            let assessment = fetch_and_assess(source.as_ref(), &request).await?;

            let view = assessment.interactive();
            let rendered = match format {
                OutputFormat::Text => render_text(&view),
                OutputFormat::Json => serde_json::to_string_pretty(&view)?,
                OutputFormat::Html => view.to_html(),
            };

            match output {
                Some(path) => {
                    tokio::fs::write(&path, rendered)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Wrote assessment");
                }
                None => print!("{rendered}"),
            }
            Ok(())
        }
        Command::Report { route, out_dir } => {
            let request = route.request()?;
            let source = route.source(&config)?;
            let assessment = fetch_and_assess(source.as_ref(), &request).await?;

            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.report.output_dir));
            let path = write_report(&dir, &assessment.document_file_name(), assessment.pdf()?).await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn write_report(dir: &Path, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Wrote PDF report");
    Ok(path)
}

/// Plain-text rendering for terminals
#[must_use]
pub fn render_text(view: &InteractiveView) -> String {
    let banner = &view.banner;
    let mut out = String::new();

    let _ = writeln!(out, "Route: {} -> {}", banner.origin, banner.destination);
    let _ = writeln!(out, "Cities en route: {}", banner.airport_count);
    let _ = writeln!(
        out,
        "Weather status: {} / {}",
        banner.status, banner.recommendation
    );
    if let Some(alert) = &view.alert {
        let _ = writeln!(out, "\n!! {alert}");
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "{:<20} {:<6} {:<26} {}",
        "City", "Code", "Condition", "Risk Level"
    );
    for row in &view.overview {
        let _ = writeln!(
            out,
            "{:<20} {:<6} {:<26} {}",
            row.city, row.icao_code, row.condition, row.risk_label
        );
    }

    out.push('\n');
    for card in &view.cards {
        let _ = writeln!(out, "{} [{}]", card.title, card.risk_label);
        let _ = writeln!(out, "  METAR: {}", card.raw_code_excerpt);
        let _ = writeln!(out, "  Risk details: {}", card.risk_details);
    }

    out
}
