use chargemap_api::create_app;
use chargemap_core::{ChargingStation, StationEngine};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the chargemap server
#[derive(Parser, Debug)]
#[command(name = "chargemap")]
#[command(about = "Charging-station map aggregation and geo-ranking service")]
struct Args {
    /// Path to the station dataset JSON file
    #[arg(short, long)]
    stations: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt().pretty().init();

    // Load the station dataset from the JSON file
    let dataset_content = tokio::fs::read_to_string(&args.stations)
        .await
        .map_err(|e| {
            format!(
                "Failed to read dataset file '{}': {}",
                args.stations.display(),
                e
            )
        })?;

    let stations: Vec<ChargingStation> = serde_json::from_str(&dataset_content).map_err(|e| {
        format!(
            "Failed to parse dataset file '{}': {}",
            args.stations.display(),
            e
        )
    })?;

    tracing::info!(
        "Loaded {} stations from {}",
        stations.len(),
        args.stations.display()
    );

    // Create the engine holding the dataset
    let engine = StationEngine::new(stations);

    // Build our application with routes
    let app = create_app(engine);

    // Run our app with hyper
    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
