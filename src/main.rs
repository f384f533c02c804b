//! spincube: a minimal real-time software rasterizer
//!
//! Spins a solid-colored unit cube through a fixed-function pipeline
//! (rotate, project, rasterize into RGB565) and blits the expanded
//! framebuffer to the window every frame.
//!
//! Keys: arrows steer the spin, Space pauses, Tab flips filled/wireframe,
//! F12 saves a screenshot, Escape quits.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod rasterizer;

use macroquad::prelude::*;
use app::AppState;
use rasterizer::{HEIGHT, WIDTH};

const CONFIG_PATH: &str = "spincube.ron";

/// Extra angle change per frame while an arrow key is held
const TURN_RATE: f32 = 0.05;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("spincube v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match config::load_config(CONFIG_PATH) {
        Ok(config) => config,
        // No config file is the normal case
        Err(config::ConfigError::IoError(_)) => config::Config::default(),
        Err(e) => {
            eprintln!("{}: {}, using defaults", CONFIG_PATH, e);
            config::Config::default()
        }
    };

    let mut app = AppState::new(config);
    let (fb_width, fb_height) = (app.renderer.fb.width, app.renderer.fb.height);
    let mut rgba = vec![0u8; fb_width * fb_height * 4];

    println!(
        "spincube v{} - {}x{}, {:?}",
        VERSION, fb_width, fb_height, app.renderer.settings.mode
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::Space) {
            app.toggle_pause();
        }
        if is_key_pressed(KeyCode::Tab) {
            app.toggle_mode();
        }

        let mut dx = app.config.spin_x;
        let mut dy = app.config.spin_y;
        if is_key_down(KeyCode::Left) {
            dy -= TURN_RATE;
        }
        if is_key_down(KeyCode::Right) {
            dy += TURN_RATE;
        }
        if is_key_down(KeyCode::Up) {
            dx -= TURN_RATE;
        }
        if is_key_down(KeyCode::Down) {
            dx += TURN_RATE;
        }

        let display = app.renderer.render_frame(dx, dy, app.paused);
        for (px, out) in display.iter().zip(rgba.chunks_exact_mut(4)) {
            out[0] = (px >> 16) as u8;
            out[1] = (px >> 8) as u8;
            out[2] = *px as u8;
            out[3] = 255;
        }

        clear_background(BLACK);
        let texture = Texture2D::from_rgba8(fb_width as u16, fb_height as u16, &rgba);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::F12) {
            save_screenshot(&mut app, &rgba, fb_width as u32, fb_height as u32);
        }

        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_screenshot(app: &mut AppState, rgba: &[u8], width: u32, height: u32) {
    let path = app.next_screenshot_path();
    match image::RgbaImage::from_raw(width, height, rgba.to_vec()) {
        Some(img) => match img.save(&path) {
            Ok(()) => println!("Saved {}", path),
            Err(e) => eprintln!("Screenshot failed: {}", e),
        },
        None => eprintln!("Screenshot failed: buffer size mismatch"),
    }
}
