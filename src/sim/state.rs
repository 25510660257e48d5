//! Bodies, bricks and playfield states
//!
//! Coordinates are in viewport pixels: origin at the top-left, y grows downward.
//! Every body stores its top-left corner and its size.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::WHITE;

/// Lifecycle of a single play session inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayState {
    /// Level loaded, waiting for the game to start
    #[default]
    Before,
    Playing,
    Paused,
    Won,
    Lost,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndingReason {
    Won,
    Lost,
}

/// Notable things that happened during a frame, drained by the owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A destructible brick was destroyed
    BrickDestroyed { power_up_spawned: bool },
    /// The ball bounced off an indestructible brick
    SolidBrickHit,
    PaddleHit,
    PowerUpCollected(super::PowerUpKind),
    /// Ball fell below the bottom edge
    LifeLost { remaining: u32 },
    GameEnded(EndingReason),
}

/// Full-screen post-processing toggles driven by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenEffects {
    pub shake: bool,
    /// Inverted colors and flipped axes
    pub confuse: bool,
    /// Swirling edge distortion
    pub chaos: bool,
}

impl ScreenEffects {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Axis-aligned rectangle with a velocity and a tint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: WHITE,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move by velocity over `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// A grid cell of the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub body: Body,
    /// Tile code from the level file (1 = solid, 2..=5 = destructible)
    pub code: u8,
    pub solid: bool,
    pub destroyed: bool,
}

/// The ball; its body is the bounding square of the circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    radius: f32,
    /// Riding on the paddle, not moving on its own
    pub stuck: bool,
    /// Re-sticks to the paddle on contact
    pub sticky: bool,
    /// Plows through destructible bricks without bouncing
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(radius * 2.0)).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    /// Move freely and reflect off the left, right and top walls.
    ///
    /// Does nothing while stuck. Returns the new position.
    pub fn advance(&mut self, dt: f32, area_width: f32) -> Vec2 {
        if self.stuck {
            return self.body.pos;
        }

        self.body.advance(dt);

        let body = &mut self.body;
        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= area_width {
            body.vel.x = -body.vel.x;
            body.pos.x = area_width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }

        body.pos
    }

    /// Back onto the paddle with every power-up effect cleared
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}
