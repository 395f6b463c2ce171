use anyhow::Result;
use clap::Parser;

use flight_weather::FlightWeatherConfig;
use flight_weather::cli::{self, Cli};
use flight_weather::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FlightWeatherConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose);

    cli::run(cli, config).await
}
