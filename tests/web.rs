// Browser tests (wasm-pack test --headless --firefox). Skipped on native targets.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
    <p class="pixel-text">Press SPACE to play</p>
    <div class="game-character"><div class="character-sprite"></div></div>
    <div class="collectible" style="position:fixed; left:10px; top:10px; width:16px; height:16px;"></div>
    <span id="score">0</span>
    <span id="level">1</span>
"#;

// Single test: the bound session is per-instance, so order matters.
#[wasm_bindgen_test]
fn binds_only_when_markup_is_complete() {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .expect("test page has a body");

    body.set_inner_html("<span id=\"score\">0</span>");
    let err = pixel_runner::start_game().unwrap_err();
    assert_eq!(
        err.as_string().as_deref(),
        Some("missing required element `.game-character`")
    );

    body.set_inner_html(MARKUP);
    pixel_runner::start_game().expect("binds with full markup");
    assert_eq!(pixel_runner::game_score(), 0);
    assert_eq!(pixel_runner::game_level(), 1);

    // A second start is ignored rather than double-binding.
    pixel_runner::start_game().expect("second start is a no-op");
}
