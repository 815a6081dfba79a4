//! JUMPMAN viewer
//!
//! Opens a window, runs one level at a time and draws it with flat shapes.
//! Hold Space, Up or the mouse to jump; release early for a short hop.

mod viewer;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jumpman::config::GameConfig;
use jumpman::game::Scene;
use jumpman::level::{LevelStore, DEFAULT_LEVEL_KEY};
use jumpman::VERSION;
use viewer::host::ViewerHost;
use viewer::render::{draw_hud, draw_menu, draw_scene};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("JUMPMAN v{}", VERSION),
        window_width: 960,
        window_height: 540,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

enum Screen {
    Playing(Box<Scene>),
    /// Final coins and multiplier of the finished run
    Menu { coins: u32, multiplier: f32 },
}

fn start_level(store: &LevelStore, key: &str, config: &GameConfig) -> Option<Box<Scene>> {
    match Scene::start(store, key, config.clone()) {
        Ok(scene) => Some(Box::new(scene)),
        Err(e) => {
            error!(key, error = %e, "level failed to start");
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let subscriber = tracing_subscriber::fmt().with_env_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jumpman=info")),
    );
    // No system clock on wasm32-unknown-unknown
    #[cfg(target_arch = "wasm32")]
    let subscriber = subscriber.without_time();
    subscriber.init();

    let config = viewer::load_config().await;
    let store = viewer::load_levels().await;
    let mut host = ViewerHost::load().await;

    info!(version = VERSION, levels = store.len(), "=== JUMPMAN ===");

    let key = if store.contains(DEFAULT_LEVEL_KEY) {
        DEFAULT_LEVEL_KEY.to_string()
    } else {
        store.list_keys().into_iter().next().unwrap_or_default()
    };

    let mut screen = match start_level(&store, &key, &config) {
        Some(scene) => Screen::Playing(scene),
        None => Screen::Menu { coins: 0, multiplier: 1.0 },
    };

    loop {
        let frame_ms = get_frame_time() * 1000.0;

        let mut next = None;
        match &mut screen {
            Screen::Playing(scene) => {
                scene.tick(frame_ms, viewer::read_input(), &mut host);
                host.hud.update(frame_ms);

                draw_scene(scene);
                draw_hud(&host.hud);

                if let Some(name) = host.requested_scene.take() {
                    info!(scene = %name, "leaving level");
                    next = Some(Screen::Menu {
                        coins: scene.score().coins_collected(),
                        multiplier: scene.score().multiplier(),
                    });
                }
            }
            Screen::Menu { coins, multiplier } => {
                draw_menu(*coins, *multiplier);

                if viewer::start_pressed() {
                    host.reset();
                    if let Some(scene) = start_level(&store, &key, &config) {
                        next = Some(Screen::Playing(scene));
                    }
                }
            }
        }
        if let Some(next) = next {
            screen = next;
        }

        next_frame().await
    }
}
