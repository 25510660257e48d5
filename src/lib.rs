//! Breakout - a 2D brick breaker
//!
//! Core modules:
//! - `sim`: Gameplay simulation (bodies, levels, collisions, power-ups, the playfield)
//! - `viewport`: The playfield wrapped as a UI element with input and rendering
//! - `ui`: Element interface, menus and the game-ended overlay
//! - `game`: Top-level mode switch and the animated viewport transitions
//! - `renderer`: Draw list and sprite batch handed to the GPU backend
//! - `resources`: Id-keyed texture/shader/font registry
//! - `audio`: Sound effect dispatch
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;
pub mod ui;
pub mod viewport;

pub use error::{LevelError, SettingsError};
pub use game::{Game, GameMode, LevelEntry};
pub use settings::{GameSpeed, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle size relative to the viewport (100x20 at 800x600)
    pub const PADDLE_SIZE_RATIO: Vec2 = Vec2::new(100.0 / 800.0, 20.0 / 600.0);
    /// Paddle speed as a fraction of viewport width per second
    pub const PADDLE_VELOCITY_RATIO: f32 = 500.0 / 800.0;
    /// Horizontal launch strength used when the ball bounces off the paddle
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Ball radius as a fraction of viewport width
    pub const BALL_RADIUS_RATIO: f32 = 12.5 / 800.0;
    /// Launch velocity relative to the viewport (100, -350 at 800x600)
    pub const INITIAL_BALL_VELOCITY_RATIO: Vec2 = Vec2::new(100.0 / 800.0, -350.0 / 600.0);

    pub const INITIAL_LIVES: u32 = 3;

    /// Particle trail behind the ball
    pub const MAX_PARTICLES: usize = 500;
    pub const NEW_PARTICLES_PER_UPDATE: usize = 2;

    /// Screen shake duration after hitting a solid brick (seconds)
    pub const SHAKE_TIME: f32 = 0.05;

    /// Power-up capsule geometry
    pub const POWER_UP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWER_UP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Ball velocity multiplier applied by the speed power-up
    pub const SPEED_POWER_UP_MULTIPLIER: f32 = 1.2;
    /// Width added to the paddle by the size power-up
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Level preview placement, relative to the screen
    pub const PREVIEW_POSITION_RATIO: Vec2 = Vec2::new(0.45, 0.25);
    pub const PREVIEW_SIZE_RATIO: f32 = 0.5;
    /// Viewport resize speed as a fraction of screen size per second
    pub const VIEWPORT_ANIMATION_RATE: f32 = 1.5;

    pub const WHITE: Vec3 = Vec3::ONE;
    /// Menu text colors
    pub const SELECTED_TEXT_COLOR: Vec3 = Vec3::ONE;
    pub const DESELECTED_TEXT_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Tint for the menu background sprite
    pub const MENU_BACKGROUND_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Built-in levels: (display name, file name under the levels directory)
    pub const DEFAULT_LEVELS: [(&str, &str); 4] = [
        ("Standard", "one.lvl"),
        ("A Few Small Gaps", "two.lvl"),
        ("Space Invader", "three.lvl"),
        ("Bounce Galore", "four.lvl"),
    ];

    /// Asset paths handed to the resource registry
    pub const DEFAULT_FONT_PATH: &str = "fonts/OCRAEXT.TTF";
    pub const DEFAULT_FONT_SIZE: u32 = 24;
    pub const BACKGROUND_TEXTURE_PATH: &str = "textures/background.jpg";
    pub const SPRITE_SHADER: (&str, &str) = ("shaders/sprite.vs", "shaders/sprite.fs");
    pub const TEXT_SHADER: (&str, &str) = ("shaders/text_2d.vs", "shaders/text_2d.fs");
}

/// Scale a relative ratio by viewport dimensions
#[inline]
pub fn scale_ratio(ratio: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(ratio.x * width, ratio.y * height)
}
