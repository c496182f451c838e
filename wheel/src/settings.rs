//! Spin configuration supplied by the host.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS, MIN_SPIN_DURATION_SECS};
use crate::error::WheelError;

/// User-facing wheel settings.
///
/// JSON keys are camelCase; `duration` and `spinSound` are accepted as
/// aliases. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinSettings {
    #[serde(alias = "duration")]
    pub duration_secs: f64,
    #[serde(alias = "spinSound")]
    pub sound_enabled: bool,
    pub remove_winner: bool,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self { duration_secs: DEFAULT_SPIN_DURATION_SECS, sound_enabled: true, remove_winner: false }
    }
}

impl SpinSettings {
    /// Parse settings from JSON and clamp them into range.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::InvalidSettings`] if the JSON is malformed or a
    /// field has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, WheelError> {
        let parsed =
            serde_json::from_str::<Self>(raw).map_err(|err| WheelError::InvalidSettings(err.to_string()))?;
        Ok(parsed.clamped())
    }

    /// Copy with the duration forced into `[1, 30]` seconds.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { duration_secs: clamp_duration(self.duration_secs), ..self }
    }

    #[must_use]
    pub fn with_duration(self, secs: f64) -> Self {
        Self { duration_secs: clamp_duration(secs), ..self }
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        clamp_duration(self.duration_secs) * 1000.0
    }
}

fn clamp_duration(secs: f64) -> f64 {
    if secs.is_finite() {
        secs.clamp(MIN_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS)
    } else {
        DEFAULT_SPIN_DURATION_SECS
    }
}
