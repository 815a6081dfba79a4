//! Viewer-side host
//!
//! Plays sounds through macroquad audio, keeps the HUD model and remembers
//! which scene the simulation asked for.

use std::collections::HashMap;

use macroquad::audio::{load_sound, play_sound, stop_sound, PlaySoundParams, Sound};
use tracing::{debug, warn};

use jumpman::game::{AudioSink, Hud, HudSink, PlayOverrides, SceneSink, SoundEffect};

pub struct ViewerHost {
    sounds: HashMap<&'static str, Sound>,
    pub hud: Hud,
    /// Set when the level asks to leave; taken by the main loop
    pub requested_scene: Option<String>,
}

impl ViewerHost {
    /// Load every sound effect from `assets/audio/{key}.wav`.
    /// Missing files only cost that sound.
    pub async fn load() -> Self {
        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            let path = format!("assets/audio/{}.wav", effect.key());
            match load_sound(&path).await {
                Ok(sound) => {
                    sounds.insert(effect.key(), sound);
                }
                Err(e) => warn!(path = %path, error = %e, "sound not loaded"),
            }
        }
        debug!(loaded = sounds.len(), "audio ready");

        Self {
            sounds,
            hud: Hud::new(),
            requested_scene: None,
        }
    }

    /// Fresh HUD for a new run; sounds are kept
    pub fn reset(&mut self) {
        self.hud = Hud::new();
        self.requested_scene = None;
    }
}

impl AudioSink for ViewerHost {
    fn play(&mut self, key: &str, overrides: PlayOverrides) {
        let Some(effect) = SoundEffect::from_key(key) else {
            return;
        };
        let Some(sound) = self.sounds.get(effect.key()) else {
            return;
        };
        // Restart instead of stacking the same sample
        stop_sound(sound);
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: overrides.volume.unwrap_or_else(|| effect.default_volume()),
            },
        );
    }
}

impl HudSink for ViewerHost {
    fn update_coins(&mut self, total: u32) {
        self.hud.update_coins(total);
    }

    fn update_multiplier(&mut self, value: f32) {
        self.hud.update_multiplier(value);
    }

    fn update_progress(&mut self, fraction: f32) {
        self.hud.update_progress(fraction);
    }
}

impl SceneSink for ViewerHost {
    fn start_scene(&mut self, name: &str) {
        self.requested_scene = Some(name.to_string());
    }
}
