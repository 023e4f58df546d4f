//! Pixel Runner core crate.
//!
//! A tiny platformer overlay for a portfolio page: arrow keys walk the
//! character, space jumps, touching a coin scores and every third coin levels
//! up. Gameplay lives in [`game`] and is plain Rust; [`dom`] binds it to the
//! page through `web-sys`.

use wasm_bindgen::prelude::*;

mod dom;
pub mod error;
pub mod game;

pub use error::InitError;
pub use game::{GameConfig, GameSession};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (module re-instantiated) just keeps the first logger.
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Bind the mini-game to the page with default tuning. Fails (and leaves the
/// page untouched) if a required element is missing.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    start_with(GameConfig::default())
}

/// Like `start_game`, with a JSON object overriding any subset of the tuning.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = parse_config(json).map_err(|e| {
        log::warn!("mini-game disabled: {e}");
        JsValue::from(e)
    })?;
    start_with(config)
}

fn start_with(config: GameConfig) -> Result<(), JsValue> {
    dom::bind(config).map_err(|e| {
        log::warn!("mini-game disabled: {e}");
        e.into()
    })
}

/// Parse and validate a JSON config override.
#[cfg(feature = "serde_json")]
pub fn parse_config(json: &str) -> Result<GameConfig, InitError> {
    let config: GameConfig =
        serde_json::from_str(json).map_err(|e| InitError::ConfigParse(e.to_string()))?;
    config.validate().map_err(InitError::InvalidConfig)?;
    Ok(config)
}

#[wasm_bindgen]
pub fn game_score() -> u32 {
    dom::score_and_level().0
}

#[wasm_bindgen]
pub fn game_level() -> u32 {
    dom::score_and_level().1
}
