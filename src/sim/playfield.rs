//! One level's worth of gameplay
//!
//! Owns the ball, paddle, bricks, particles and power-ups, and advances them
//! with a variable timestep. Deterministic for a given seed and input stream.

use std::mem;
use std::path::Path;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{bounce_off_paddle, check_ball_box, resolve_ball_box};
use super::level::Level;
use super::particles::ParticleTrail;
use super::power_up::{EffectTargets, PowerUps};
use super::state::{Ball, Body, EndingReason, GameEvent, PlayState, ScreenEffects};
use crate::consts::*;
use crate::error::LevelError;
use crate::scale_ratio;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct PlayInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Release the ball from the paddle
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Cosmetic switches from the player's settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOptions {
    pub particles: bool,
    pub screen_shake: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            particles: true,
            screen_shake: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Playfield {
    width: f32,
    height: f32,
    state: PlayState,
    lives: u32,
    /// Level as loaded, restored on reset
    initial_level: Level,
    level: Level,
    paddle: Body,
    ball: Ball,
    particles: ParticleTrail,
    power_ups: PowerUps,
    effects: ScreenEffects,
    shake_time: f32,
    /// Gameplay randomness (power-up drops)
    rng: Pcg32,
    /// Cosmetic randomness, kept apart so toggling particles leaves drops unchanged
    fx_rng: Pcg32,
    options: PlayOptions,
    events: Vec<GameEvent>,
}

impl Playfield {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let radius = BALL_RADIUS_RATIO * width;
        let mut playfield = Self {
            width,
            height,
            state: PlayState::Before,
            lives: INITIAL_LIVES,
            initial_level: Level::default(),
            level: Level::default(),
            paddle: Body::new(Vec2::ZERO, scale_ratio(PADDLE_SIZE_RATIO, width, height)),
            ball: Ball::new(Vec2::ZERO, radius, Vec2::ZERO),
            particles: ParticleTrail::new(MAX_PARTICLES),
            power_ups: PowerUps::new(),
            effects: ScreenEffects::default(),
            shake_time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            options: PlayOptions::default(),
            events: Vec::new(),
        };
        playfield.reset_player();
        playfield
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn paddle(&self) -> &Body {
        &self.paddle
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn particles(&self) -> &ParticleTrail {
        &self.particles
    }

    pub fn power_ups(&self) -> &PowerUps {
        &self.power_ups
    }

    pub fn effects(&self) -> ScreenEffects {
        self.effects
    }

    pub fn set_options(&mut self, options: PlayOptions) {
        self.options = options;
        if !options.screen_shake {
            self.effects.shake = false;
        }
        if !options.particles {
            self.particles.clear();
        }
    }

    pub fn paddle_size(&self) -> Vec2 {
        scale_ratio(PADDLE_SIZE_RATIO, self.width, self.height)
    }

    pub fn paddle_speed(&self) -> f32 {
        PADDLE_VELOCITY_RATIO * self.width
    }

    pub fn initial_ball_velocity(&self) -> Vec2 {
        scale_ratio(INITIAL_BALL_VELOCITY_RATIO, self.width, self.height)
    }

    /// Take everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Load a level file into the top half of the playfield
    pub fn load_level(&mut self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let level = Level::load(path, self.width, self.height / 2.0)?;
        self.set_level(level);
        Ok(())
    }

    /// Install a level and start over from `Before` with full lives
    pub fn set_level(&mut self, level: Level) {
        self.initial_level = level;
        self.reset();
        self.state = PlayState::Before;
    }

    /// Full lives and a fresh copy of the level
    pub fn reset(&mut self) {
        self.lives = INITIAL_LIVES;
        self.reset_level();
    }

    fn reset_level(&mut self) {
        self.level = self.initial_level.clone();
        self.power_ups.clear();
        self.effects.clear();
        self.shake_time = 0.0;
        self.particles.clear();
        self.reset_player();
    }

    /// Paddle centered at the bottom, ball resting on it
    fn reset_player(&mut self) {
        let size = self.paddle_size();
        self.paddle.size = size;
        self.paddle.pos = Vec2::new(self.width / 2.0 - size.x / 2.0, self.height - size.y);
        self.paddle.color = WHITE;

        let radius = self.ball.radius();
        let ball_pos = self.paddle.pos + Vec2::new(size.x / 2.0 - radius, -2.0 * radius);
        let vel = self.initial_ball_velocity();
        self.ball.reset(ball_pos, vel);
    }

    pub fn start_game(&mut self) {
        match self.state {
            PlayState::Won => {
                self.reset();
                self.state = PlayState::Playing;
            }
            PlayState::Before | PlayState::Paused | PlayState::Lost => {
                self.state = PlayState::Playing;
            }
            PlayState::Playing => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
            other => other,
        };
    }

    /// Apply one frame of player input
    pub fn apply_input(&mut self, input: &PlayInput, dt: f32) {
        if input.pause {
            self.toggle_pause();
        }
        if self.state != PlayState::Playing {
            return;
        }

        let step = self.paddle_speed() * dt;
        let before = self.paddle.pos.x;
        if input.left {
            self.paddle.pos.x = (self.paddle.pos.x - step).max(0.0);
        }
        if input.right {
            let limit = self.width - self.paddle.size.x;
            self.paddle.pos.x = (self.paddle.pos.x + step).min(limit.max(0.0));
        }
        if self.ball.stuck {
            self.ball.body.pos.x += self.paddle.pos.x - before;
        }
        if input.launch {
            self.ball.stuck = false;
        }
    }

    /// Advance the simulation by `dt` seconds; only runs while playing
    pub fn update(&mut self, dt: f32) {
        if self.state != PlayState::Playing {
            return;
        }

        self.ball.advance(dt, self.width);
        self.check_collisions();
        if self.state != PlayState::Playing {
            return;
        }

        if self.ball.body.pos.y >= self.height {
            self.kill_player();
            if self.state != PlayState::Playing {
                return;
            }
        }

        if self.options.particles {
            let offset = self.ball.radius() / 2.0;
            self.particles.update(
                dt,
                &mut self.fx_rng,
                self.ball.body.pos,
                self.ball.body.vel,
                NEW_PARTICLES_PER_UPDATE,
                offset,
            );
        }

        let mut targets = EffectTargets {
            ball: &mut self.ball,
            paddle: &mut self.paddle,
            effects: &mut self.effects,
        };
        self.power_ups.update(dt, &mut targets);

        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.effects.shake = false;
            }
        }
    }

    fn check_collisions(&mut self) {
        for index in 0..self.level.bricks().len() {
            let brick = &self.level.bricks()[index];
            if brick.destroyed {
                continue;
            }
            let Some(hit) = check_ball_box(&self.ball, &brick.body) else {
                continue;
            };
            let brick = brick.clone();

            if brick.solid {
                self.shake_time = SHAKE_TIME;
                self.effects.shake = self.options.screen_shake;
                self.events.push(GameEvent::SolidBrickHit);
            } else {
                self.level.set_brick_destroyed(index);
                let power_up_spawned = self.power_ups.spawn_from_brick(&mut self.rng, &brick);
                if power_up_spawned {
                    log::debug!("Power-up dropped at {:?}", brick.body.pos);
                }
                self.events.push(GameEvent::BrickDestroyed { power_up_spawned });
                if self.level.is_completed() {
                    self.level_complete();
                    return;
                }
            }

            if !(self.ball.pass_through && !brick.solid) {
                resolve_ball_box(&mut self.ball, &hit);
            }
        }

        if !self.ball.stuck && check_ball_box(&self.ball, &self.paddle).is_some() {
            let base_vx = self.initial_ball_velocity().x;
            bounce_off_paddle(&mut self.ball, &self.paddle, base_vx, PADDLE_BOUNCE_STRENGTH);
            self.events.push(GameEvent::PaddleHit);
        }

        let mut targets = EffectTargets {
            ball: &mut self.ball,
            paddle: &mut self.paddle,
            effects: &mut self.effects,
        };
        for kind in self.power_ups.collect(self.height, &mut targets) {
            log::debug!("Collected {kind:?}");
            self.events.push(GameEvent::PowerUpCollected(kind));
        }
    }

    fn kill_player(&mut self) {
        assert!(self.lives > 0, "lost a life with none left");
        self.lives -= 1;
        self.events.push(GameEvent::LifeLost { remaining: self.lives });

        if self.lives == 0 {
            log::info!("Out of lives");
            self.reset();
            self.events.push(GameEvent::GameEnded(EndingReason::Lost));
            self.state = PlayState::Lost;
        } else {
            self.reset_player();
        }
    }

    fn level_complete(&mut self) {
        log::info!("Level complete with {} lives left", self.lives);
        self.events.push(GameEvent::GameEnded(EndingReason::Won));
        self.state = PlayState::Won;
    }
}
