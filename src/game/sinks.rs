//! Outbound capabilities
//!
//! The simulation never renders, plays sound or switches screens itself. It
//! makes fire-and-forget calls into whatever host drives it: the viewer in
//! the binary, or a recording host in tests.

/// Per-play tweaks on top of a sound's defaults
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayOverrides {
    pub volume: Option<f32>,
    /// Start offset in seconds
    pub seek: Option<f32>,
}

impl PlayOverrides {
    pub fn volume(volume: f32) -> Self {
        Self {
            volume: Some(volume),
            seek: None,
        }
    }
}

pub trait AudioSink {
    /// Unknown keys or a missing backend are a silent no-op.
    fn play(&mut self, key: &str, overrides: PlayOverrides);
}

pub trait HudSink {
    fn update_coins(&mut self, total: u32);
    fn update_multiplier(&mut self, value: f32);
    /// `fraction` is always in [0, 1]
    fn update_progress(&mut self, fraction: f32);
}

pub trait SceneSink {
    fn start_scene(&mut self, name: &str);
}

/// Everything a scene talks to
pub trait Host: AudioSink + HudSink + SceneSink {}

impl<T: AudioSink + HudSink + SceneSink> Host for T {}

/// Host that drops every call, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl AudioSink for NullHost {
    fn play(&mut self, _key: &str, _overrides: PlayOverrides) {}
}

impl HudSink for NullHost {
    fn update_coins(&mut self, _total: u32) {}
    fn update_multiplier(&mut self, _value: f32) {}
    fn update_progress(&mut self, _fraction: f32) {}
}

impl SceneSink for NullHost {
    fn start_scene(&mut self, _name: &str) {}
}
