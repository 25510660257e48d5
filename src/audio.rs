//! Audio requests
//!
//! The game only decides *what* to play and how loud; decoding and mixing
//! belong to an `AudioBackend`. Playback is fire-and-forget.

use std::fmt;

use crate::settings::Settings;

/// Track played while the game runs
pub const BACKGROUND_MUSIC_PATH: &str = "audio/breakout.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball destroys a brick that dropped nothing
    BrickNormal,
    /// Ball bounces off a solid brick
    BrickSolid,
    /// Ball destroys a brick that dropped a power-up
    BrickPowerUp,
    /// Ball hits paddle
    PaddleHit,
}

impl SoundEffect {
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::BrickNormal => "audio/bleep.mp3",
            SoundEffect::BrickSolid => "audio/solid.wav",
            SoundEffect::BrickPowerUp => "audio/powerup.wav",
            SoundEffect::PaddleHit => "audio/bleep.wav",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend: fmt::Debug {
    fn play(&mut self, path: &str, volume: f32, looped: bool);
}

/// Backend for headless runs: every request becomes a debug log line
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, path: &str, volume: f32, looped: bool) {
        log::debug!("play {path} at {volume:.2}{}", if looped { " (looped)" } else { "" });
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.75,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Pick up volume and mute state from the player's settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_gain());
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect.path(), vol, false);
    }

    pub fn play_background_music(&mut self, looped: bool) {
        let vol = self.effective_volume(self.music_volume);
        log::info!("Background music at volume {vol:.2}");
        if vol <= 0.0 {
            return;
        }
        self.backend.play(BACKGROUND_MUSIC_PATH, vol, looped);
    }
}
