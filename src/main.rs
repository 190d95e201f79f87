use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use weatherwise::{
    DisplayUnit, SearchOrchestrator, SearchState, WeatherWiseConfig, display_temperature,
};

#[tokio::main]
async fn main() -> Result<()> {
    let mut unit = DisplayUnit::Celsius;
    let mut query_parts = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fahrenheit" | "-f" => unit = DisplayUnit::Fahrenheit,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ => query_parts.push(arg),
        }
    }

    let query = query_parts.join(" ");
    if query.trim().is_empty() {
        print_usage();
        std::process::exit(2);
    }

    let config = WeatherWiseConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let mut orchestrator = SearchOrchestrator::new(&config)?;
    if unit == DisplayUnit::Fahrenheit {
        orchestrator.toggle_unit();
    }

    orchestrator.submit(&query).await;

    match orchestrator.state() {
        SearchState::Success {
            current,
            forecast,
            advisory,
        } => {
            let unit = orchestrator.unit();
            println!("{}", current.format_location());
            println!(
                "  {}{}  (feels like {}{}), {}",
                display_temperature(current.temperature_c, unit),
                unit.symbol(),
                display_temperature(current.feels_like_c, unit),
                unit.symbol(),
                current.description,
            );
            println!(
                "  Humidity {}%, wind {} km/h, precipitation {} mm",
                current.humidity_pct,
                current.format_wind(),
                current.precipitation_mm,
            );

            if !forecast.is_empty() {
                println!();
                println!("Forecast:");
                for slice in forecast {
                    println!(
                        "  {:>5}  {:>4}{}  {:<5}  {}",
                        slice.display_time,
                        display_temperature(slice.temperature_c, unit),
                        unit.symbol(),
                        slice.category.icon_name(),
                        slice.format_probability(),
                    );
                }
            }

            println!();
            println!("Outfit suggestions:");
            println!("{advisory}");
        }
        SearchState::Failed(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
        SearchState::Idle | SearchState::Loading => {
            // Unreachable for a non-empty query; submit always settles
            eprintln!("Search did not produce a result");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("WeatherWise - city weather lookup with AI outfit suggestions");
    println!();
    println!("Usage: weatherwise [--fahrenheit] <city>");
    println!();
    println!("Credentials are read from the environment:");
    println!("  WEATHERWISE_WEATHER__API_KEY   OpenWeatherMap API key");
    println!("  WEATHERWISE_ADVISOR__API_KEY   Gemini API key");
}
