//! Browser bindings
//!
//! The page owns the canvas, the animation frame loop and the DOM score
//! display. It forwards key events, calls `tick` once per frame, then reads
//! back the render snapshot and the buffered UI events as JSON.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorage;
use crate::platform::KeyboardState;
use crate::settings::Settings;
use crate::sim::render::{INSTANCE_STRIDE, instance_bytes};
use crate::sim::{GamePhase, GameState, snapshot, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Ember Run starting...");
}

fn to_js(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One running game
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    keys: KeyboardState,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        let settings = Settings::load(&LocalStorage::new());
        let state = GameState::with_config(
            u64::from(seed),
            Box::new(LocalStorage::new()),
            Tuning::default(),
            &settings,
        );
        WebGame {
            state,
            keys: KeyboardState::new(),
        }
    }

    /// Game seeded from the wall clock
    pub fn from_clock() -> WebGame {
        WebGame::new(js_sys::Date::now() as u32)
    }

    /// Returns true if the key is bound, so the page can suppress scrolling
    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.key_up(key)
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Playing {
            self.keys.discard_pending();
            return;
        }
        let input = self.keys.take_input();
        tick(&mut self.state, &input);
    }

    /// Render descriptors, back to front
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&snapshot(&self.state)).map_err(to_js)
    }

    /// Packed `RenderInstance`s for a GPU instance buffer, same order as
    /// `snapshot_json`
    pub fn instance_bytes(&self) -> Vec<u8> {
        instance_bytes(&self.state)
    }

    /// Bytes per packed instance
    pub fn instance_stride() -> usize {
        INSTANCE_STRIDE
    }

    /// UI events since the last call
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(to_js)
    }

    pub fn restart(&mut self) {
        self.state.restart();
    }

    pub fn next_level(&mut self) {
        self.state.next_level();
    }

    pub fn camera_x(&self) -> f32 {
        self.state.camera.x
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.state.phase)
    }

    pub fn score(&self) -> f64 {
        self.state.score.current() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.state.score.high_score() as f64
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }
}
