//! Macroquad front end: asset loading, input mapping, drawing

pub mod host;
pub mod render;

use macroquad::prelude::*;
use tracing::{info, warn};

use jumpman::config::GameConfig;
use jumpman::game::TickInput;
use jumpman::level::LevelStore;

pub const CONFIG_PATH: &str = "assets/config.ron";
pub const LEVELS_DIR: &str = "assets/levels";

/// Tuning from `assets/config.ron`, or the defaults if it is missing or bad
pub async fn load_config() -> GameConfig {
    match load_string(CONFIG_PATH).await {
        Ok(contents) => match GameConfig::from_ron_str(&contents) {
            Ok(config) => {
                info!(path = CONFIG_PATH, "loaded config");
                config
            }
            Err(e) => {
                warn!(path = CONFIG_PATH, error = %e, "invalid config, using defaults");
                GameConfig::default()
            }
        },
        Err(_) => GameConfig::default(),
    }
}

/// Built-in level plus everything under `assets/levels/`
pub async fn load_levels() -> LevelStore {
    let mut store = match LevelStore::with_builtin() {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "built-in level failed to load");
            LevelStore::new()
        }
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = store.load_dir(LEVELS_DIR) {
            warn!(dir = LEVELS_DIR, error = %e, "level directory not loaded");
        }
    }

    // WASM can't list directories; the build script writes a manifest instead
    #[cfg(target_arch = "wasm32")]
    {
        load_levels_from_manifest(&mut store).await;
    }

    store
}

#[cfg(target_arch = "wasm32")]
async fn load_levels_from_manifest(store: &mut LevelStore) {
    use jumpman::level::load_level_from_bytes;

    let manifest = match load_string(&format!("{}/manifest.txt", LEVELS_DIR)).await {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "level manifest not found");
            return;
        }
    };

    for name in manifest.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let path = format!("{}/{}", LEVELS_DIR, name);
        let parsed = match load_file(&path).await {
            Ok(bytes) => load_level_from_bytes(&bytes),
            Err(e) => {
                warn!(path = %path, error = %e, "level file not fetched");
                continue;
            }
        };
        match parsed {
            Ok(level) => {
                let key = level.key.clone();
                store.register(&key, level);
            }
            Err(e) => warn!(path = %path, error = %e, "skipping level file"),
        }
    }
}

/// Space, Up or the left mouse button all mean "jump"
pub fn read_input() -> TickInput {
    let jump_held = is_key_down(KeyCode::Space)
        || is_key_down(KeyCode::Up)
        || is_mouse_button_down(MouseButton::Left);
    let released_edge = is_key_released(KeyCode::Space)
        || is_key_released(KeyCode::Up)
        || is_mouse_button_released(MouseButton::Left);

    TickInput {
        jump_held,
        jump_released: released_edge && !jump_held,
    }
}

/// Edge-triggered "go" on the menu screen
pub fn start_pressed() -> bool {
    is_key_pressed(KeyCode::Space)
        || is_key_pressed(KeyCode::Up)
        || is_mouse_button_pressed(MouseButton::Left)
}
