//! Per-tick input snapshot

/// What the player is doing this tick.
///
/// The runner moves forward on its own, so the only control is jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump/forward intent is active this tick
    pub jump_held: bool,
    /// The jump input went from held to released since the last tick
    pub jump_released: bool,
}

impl TickInput {
    pub fn held() -> Self {
        Self {
            jump_held: true,
            jump_released: false,
        }
    }

    pub fn released() -> Self {
        Self {
            jump_held: false,
            jump_released: true,
        }
    }
}
