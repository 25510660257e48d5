//! Gameplay simulation
//!
//! Pure game logic with no rendering or platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (grid order for bricks, spawn order for power-ups)
//! - Variable timestep supplied by the caller

pub mod collision;
pub mod level;
pub mod particles;
pub mod playfield;
pub mod power_up;
pub mod state;

pub use collision::{
    Collision, Direction, aabb_overlap, bounce_off_paddle, check_ball_box, resolve_ball_box,
    vector_direction,
};
pub use level::{Level, tile_color};
pub use particles::{Particle, ParticleTrail};
pub use playfield::{PlayInput, PlayOptions, Playfield};
pub use power_up::{EffectTargets, PowerUp, PowerUpKind, PowerUps, should_spawn};
pub use state::{Ball, Body, Brick, EndingReason, GameEvent, PlayState, ScreenEffects};
