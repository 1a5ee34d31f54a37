// Entry point for the Minesweeper TUI application
// Initializes logging, configuration and language settings, then launches the main UI

use log::{debug, error};
use std::error::Error;

// Module declarations
mod xtm_board;  // Grid of cells
mod xtm_color;  // Cross-platform color matching utilities
mod xtm_config; // Read-only user preferences
mod xtm_error;  // Fatal error type
mod xtm_game;   // Game session and player actions
mod xtm_gen;    // Mine placement and danger levels
mod xtm_lang;   // Multi-language string resources
mod xtm_reveal; // Flood reveal
mod xtm_ui;     // Terminal UI rendering and event handling
mod xtm_view;   // Tile selection and pointer mapping

use xtm_lang::Lang;
use xtm_ui::run as run_ui;

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr, e.g. `RUST_LOG=debug xtmines 2> xtmines.log`
    env_logger::init();

    let cfg = xtm_config::load().inspect_err(|e| error!("{e}"))?;

    let lang = Lang::new(&cfg.language);
    debug!("language {}, config {cfg:?}", lang.current_lang);

    // The terminal is restored before the error propagates
    run_ui(&cfg, &lang).inspect_err(|e| error!("{e}"))?;
    Ok(())
}
