//! Per-run application state
//!
//! Owns the renderer plus the flags the keyboard toggles. The window loop
//! in main.rs reads input and calls into here; the renderer never sees
//! the windowing layer.

use crate::config::Config;
use crate::rasterizer::{RenderMode, Renderer};

pub struct AppState {
    pub renderer: Renderer,
    pub config: Config,
    pub paused: bool,
    screenshots: u32,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let renderer = Renderer::new(config.width, config.height, config.settings());
        Self {
            renderer,
            config,
            paused: false,
            screenshots: 0,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Flip between filled and wireframe, keeping the current rotation
    pub fn toggle_mode(&mut self) {
        let next = match self.renderer.settings.mode {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        };
        self.renderer.set_settings(self.config.settings_for(next));
    }

    pub fn next_screenshot_path(&mut self) -> String {
        self.screenshots += 1;
        format!("spincube_{:03}.png", self.screenshots)
    }
}
