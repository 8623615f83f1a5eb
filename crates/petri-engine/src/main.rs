//! World engine binary for the Petri simulation.
//!
//! This is the main entry point that wires together the grid, the tick
//! cycle, and the viewer session server. It loads configuration,
//! initializes all subsystems, and runs the simulation loop until the
//! process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `petri-config.yaml`
//! 3. Generate the initial grid (all dead, random colors)
//! 4. Create the shared simulation state
//! 5. Start the viewer session server
//! 6. Run the simulation loop

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use petri_core::config::SimulationConfig;
use petri_core::runner;
use petri_core::tick::SimulationState;
use petri_grid::Grid;
use petri_server::server::ServerConfig;
use petri_server::state::AppState;

use crate::error::EngineError;

/// Application entry point for the world engine.
///
/// Initializes all subsystems and runs the simulation loop.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("petri-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    config.validate()?;
    info!(
        world_name = config.world.name,
        window_width = config.world.window_width,
        window_height = config.world.window_height,
        square_size = config.world.square_size,
        tick_interval_ms = config.world.tick_interval_ms,
        injection_interval = config.injection.interval_ticks,
        "Configuration loaded"
    );

    // 3. Generate the initial grid.
    let (width, height) = (config.grid_width(), config.grid_height());
    let grid = {
        let mut rng = rand::rng();
        Grid::generate(width, height, &mut rng)
    };
    info!(width, height, "Grid generated");

    // 4. Create the shared simulation state.
    let sim = Arc::new(RwLock::new(SimulationState::new(grid)));
    let app_state = Arc::new(AppState::new(
        Arc::clone(&sim),
        config.world.square_size,
        config.injection,
        config.world.name.clone(),
    ));

    // 5. Start the viewer session server on a background task.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let _server_handle =
        petri_server::spawn_server(server_config, Arc::clone(&app_state)).await?;
    info!(
        host = config.server.host,
        port = config.server.port,
        "Session server started"
    );

    // 6. Run the simulation loop. Runs until the process is terminated.
    let tick_interval = Duration::from_millis(config.world.tick_interval_ms);
    runner::run_simulation(&sim, app_state.as_ref(), &config.injection, tick_interval)
        .await
        .map_err(EngineError::from)?;

    Ok(())
}

/// Load configuration from `petri-config.yaml`.
///
/// Uses defaults if the file does not exist.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("petri-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
