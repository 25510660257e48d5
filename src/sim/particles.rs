//! Fading particle trail emitted behind the ball

use glam::{Vec2, Vec4};
use rand::Rng;

/// Alpha lost per second
const FADE_RATE: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec4,
    /// Seconds left
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct ParticleTrail {
    particles: Vec<Particle>,
    max: usize,
}

impl ParticleTrail {
    pub fn new(max: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max),
            max,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit up to `count` particles around `origin`, then age everything.
    ///
    /// New particles drift at a tenth of the emitter's velocity and move
    /// against it, so the trail lags behind the ball.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        origin: Vec2,
        origin_vel: Vec2,
        count: usize,
        offset: f32,
    ) {
        for _ in 0..count {
            if self.particles.len() >= self.max {
                break;
            }
            let jitter = rng.random_range(-50..50) as f32 / 10.0;
            let gray = 0.5 + rng.random_range(0..100) as f32 / 100.0;
            self.particles.push(Particle {
                pos: origin + Vec2::splat(jitter + offset),
                vel: origin_vel * 0.1,
                color: Vec4::new(gray, gray, gray, 1.0),
                life: 1.0,
            });
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.life > 0.0 {
                particle.pos -= particle.vel * dt;
                particle.color.w -= dt * FADE_RATE;
            }
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
