use serde::{Deserialize, Serialize};
use serpent_core::core::LogSummary;

/// Key codes following the DOM `keyCode` convention
pub mod key_codes {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const KEY_A: u32 = 65;
    pub const KEY_D: u32 = 68;
    /// Keys without a known code; consumers fall back to the key name
    pub const UNIDENTIFIED: u32 = 0;
}

/// A single key press or release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardInput {
    /// Key name as the source reported it ("ArrowLeft", "a", ...)
    pub key: String,
    pub code: u32,
    pub pressed: bool,
}

impl KeyboardInput {
    pub fn new(key: impl Into<String>, code: u32, pressed: bool) -> Self {
        Self {
            key: key.into(),
            code,
            pressed,
        }
    }

    pub fn press(key: impl Into<String>, code: u32) -> Self {
        Self::new(key, code, true)
    }

    pub fn release(key: impl Into<String>, code: u32) -> Self {
        Self::new(key, code, false)
    }
}

impl LogSummary for KeyboardInput {
    fn log_summary(&self) -> String {
        format!(
            "Key({} #{} {})",
            self.key,
            self.code,
            if self.pressed { "down" } else { "up" }
        )
    }
}
