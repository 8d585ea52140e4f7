//! Browser bridge
//!
//! The JS side renders snapshots, forwards taps and drives the clock from
//! `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{Arena, Session};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Shape Destroyer (web) starting...");
}

#[wasm_bindgen]
pub struct ShapeDestroyer {
    session: Session,
}

#[wasm_bindgen]
impl ShapeDestroyer {
    /// Create a game sized to the viewport. `settings_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: &str) -> Result<ShapeDestroyer, JsValue> {
        let mut settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        settings.arena = Arena::new(width, height);
        let seed = js_sys::Date::now() as u64;
        Ok(Self {
            session: Session::new(settings, seed),
        })
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    #[wasm_bindgen(js_name = addShape)]
    pub fn add_shape(&mut self) {
        self.session.add_shape();
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) {
        self.session.clear_all();
    }

    #[wasm_bindgen(js_name = handleTap)]
    pub fn handle_tap(&mut self, id: u32) {
        self.session.handle_tap(id);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.set_arena(Arena::new(width, height));
    }

    /// Advance the clock by a frame delta in milliseconds
    pub fn advance(&mut self, dt_ms: f64) {
        // Clamp long gaps (background tab) like a frame limiter would
        let dt = dt_ms.clamp(0.0, 1000.0) as u64;
        self.session.advance(dt);
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    /// Full state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
