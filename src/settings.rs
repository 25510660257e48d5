//! Game settings and preferences
//!
//! Persisted as JSON next to the executable. A missing or unreadable file
//! falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Master volume choices offered by the settings menu (percent)
pub const VOLUME_STEPS: [u8; 5] = [0, 25, 50, 75, 100];

/// Simulation speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameSpeed {
    Half,
    #[default]
    Normal,
    Fast,
    Double,
}

impl GameSpeed {
    pub const ALL: [GameSpeed; 4] = [
        GameSpeed::Half,
        GameSpeed::Normal,
        GameSpeed::Fast,
        GameSpeed::Double,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Half => "0.5x",
            GameSpeed::Normal => "1x",
            GameSpeed::Fast => "1.5x",
            GameSpeed::Double => "2x",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().trim_end_matches('x') {
            "0.5" | "half" => Some(GameSpeed::Half),
            "1" | "1.0" | "normal" => Some(GameSpeed::Normal),
            "1.5" | "fast" => Some(GameSpeed::Fast),
            "2" | "2.0" | "double" => Some(GameSpeed::Double),
            _ => None,
        }
    }

    /// Factor applied to every frame's dt
    pub fn multiplier(&self) -> f32 {
        match self {
            GameSpeed::Half => 0.5,
            GameSpeed::Normal => 1.0,
            GameSpeed::Fast => 1.5,
            GameSpeed::Double => 2.0,
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(1)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (percent, 0 - 100)
    pub master_volume: u8,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    pub game_speed: GameSpeed,

    // === Visual Effects ===
    /// Screen shake on solid brick hits
    pub screen_shake: bool,
    /// Ball particle trail
    pub particles: bool,
    /// Animate the viewport between preview and full screen
    pub animate_viewport: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 75,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            game_speed: GameSpeed::Normal,

            screen_shake: true,
            particles: true,
            animate_viewport: true,
        }
    }
}

impl Settings {
    /// Master volume as a 0.0 - 1.0 gain
    pub fn master_gain(&self) -> f32 {
        f32::from(self.master_volume.min(100)) / 100.0
    }

    /// Closest menu step at or above the stored volume
    pub fn volume_step_index(&self) -> usize {
        VOLUME_STEPS
            .iter()
            .position(|&step| step >= self.master_volume)
            .unwrap_or(VOLUME_STEPS.len() - 1)
    }

    /// Read settings, propagating I/O and parse failures
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.master_volume = settings.master_volume.min(100);
        Ok(settings)
    }

    /// Read settings, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
