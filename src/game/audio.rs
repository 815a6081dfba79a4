//! Sound effect catalog

use super::sinks::{AudioSink, PlayOverrides};

/// Every sound the simulation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    PlayerJump,
    PadBoost,
    Coin,
    Ring,
    PlayerDeath,
    EnemyHit,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::PlayerJump,
        SoundEffect::PadBoost,
        SoundEffect::Coin,
        SoundEffect::Ring,
        SoundEffect::PlayerDeath,
        SoundEffect::EnemyHit,
    ];

    /// Asset key, also the file stem under `assets/audio/`
    pub fn key(self) -> &'static str {
        match self {
            SoundEffect::PlayerJump => "player-jump",
            SoundEffect::PadBoost => "pad-boost",
            SoundEffect::Coin => "coin",
            SoundEffect::Ring => "ring",
            SoundEffect::PlayerDeath => "player-death",
            SoundEffect::EnemyHit => "enemy-hit",
        }
    }

    pub fn default_volume(self) -> f32 {
        match self {
            SoundEffect::PlayerJump => 0.35,
            SoundEffect::PadBoost => 0.45,
            SoundEffect::Coin => 0.4,
            SoundEffect::Ring => 0.5,
            SoundEffect::PlayerDeath => 0.45,
            SoundEffect::EnemyHit => 0.45,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }

    /// Request this sound at its default volume
    pub fn play_on<A: AudioSink + ?Sized>(self, sink: &mut A) {
        sink.play(self.key(), PlayOverrides::volume(self.default_volume()));
    }
}
