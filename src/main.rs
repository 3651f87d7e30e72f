// Entry point for the movie guessing TUI
// Loads configuration and the movie catalog, then launches the main UI

use std::error::Error;
use std::process;
use tracing::info;

// Module declarations
mod xtm_catalog;  // Movie records, catalog loading and random selection
mod xtm_color;    // Cross-platform color matching utilities
mod xtm_config;   // User configuration persistence
mod xtm_error;    // Error types
mod xtm_feedback; // Per-attribute feedback tiles
mod xtm_game;     // Game session state machine
mod xtm_log;      // File-based logging
mod xtm_ui;       // Terminal UI rendering and event handling

use xtm_catalog::Catalog;
use xtm_config::{load_or_create_config, log_path, save_config};
use xtm_game::GameSession;
use xtm_log::init_logging;
use xtm_ui::run as run_ui;

fn main() -> Result<(), Box<dyn Error>> {
    // Load or create user configuration (catalog path, tile options, log level)
    let mut cfg = load_or_create_config();

    if let Some(path) = log_path() {
        init_logging(&path, &cfg.log_level);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    // The game cannot start without movies; abort before touching the terminal
    let catalog_path = cfg.catalog_path();
    let catalog = Catalog::load_or_empty(&catalog_path);
    if catalog.is_empty() {
        eprintln!("No movies loaded from {}.", catalog_path.display());
        process::exit(1);
    }

    let mut session = GameSession::with_thread_rng(catalog, cfg.match_rule())?;

    // Launch the main UI loop
    run_ui(&mut cfg, &mut session)?;

    // Keep tile preference toggled during play
    save_config(&cfg);
    info!("exiting");
    Ok(())
}
