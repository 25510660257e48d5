//! Power-ups: spawning from destroyed bricks, collection, timed effects
//!
//! Capsules fall from the brick that spawned them. Collecting one applies its
//! effect immediately; timed effects revert when the last active capsule of
//! that kind runs out.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{Ball, Body, Brick, ScreenEffects};
use super::collision::aabb_overlap;
use crate::consts::{PAD_SIZE_INCREASE, POWER_UP_SIZE, POWER_UP_VELOCITY, SPEED_POWER_UP_MULTIPLIER, WHITE};

const STICKY_PADDLE_COLOR: Vec3 = Vec3::new(1.0, 0.5, 1.0);
const PASS_THROUGH_BALL_COLOR: Vec3 = Vec3::new(1.0, 0.5, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Ball velocity x1.2, permanent
    Speed,
    /// Ball re-sticks to the paddle on contact
    Sticky,
    /// Ball passes through destructible bricks
    PassThrough,
    /// Paddle grows 50 px, permanent
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Rolled in this order for every destroyed brick
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Spawn probability is `1 / spawn_chance`
    pub fn spawn_chance(self) -> u32 {
        match self {
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15,
            _ => 75,
        }
    }

    /// Seconds the effect lasts; zero for instant effects
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Texture file for the capsule sprite
    pub fn texture_path(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "textures/power_ups/powerup_speed.png",
            PowerUpKind::Sticky => "textures/power_ups/powerup_sticky.png",
            PowerUpKind::PassThrough => "textures/power_ups/powerup_passthrough.png",
            PowerUpKind::PadSizeIncrease => "textures/power_ups/powerup_increase.png",
            PowerUpKind::Confuse => "textures/power_ups/powerup_confuse.png",
            PowerUpKind::Chaos => "textures/power_ups/powerup_chaos.png",
        }
    }
}

/// A falling capsule, or a collected one whose effect is still running
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Remaining effect time once activated
    pub duration: f32,
    pub activated: bool,
    /// Collected or missed; no longer drawn or collectable
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, POWER_UP_SIZE)
                .with_color(kind.color())
                .with_velocity(POWER_UP_VELOCITY),
            kind,
            duration: kind.duration(),
            activated: false,
            destroyed: false,
        }
    }
}

/// True with probability `1 / chance`
pub fn should_spawn<R: Rng + ?Sized>(rng: &mut R, chance: u32) -> bool {
    assert!(chance > 0, "spawn chance must be positive");
    rng.random_range(0..chance) == 0
}

/// Everything a power-up effect may touch
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Body,
    pub effects: &'a mut ScreenEffects,
}

/// Apply a collected power-up
pub fn activate(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed => targets.ball.body.vel *= SPEED_POWER_UP_MULTIPLIER,
        PowerUpKind::Sticky => {
            targets.ball.sticky = true;
            targets.paddle.color = STICKY_PADDLE_COLOR;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = true;
            targets.ball.body.color = PASS_THROUGH_BALL_COLOR;
        }
        PowerUpKind::PadSizeIncrease => targets.paddle.size.x += PAD_SIZE_INCREASE,
        // Confuse and chaos are mutually exclusive
        PowerUpKind::Confuse => {
            if !targets.effects.chaos {
                targets.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !targets.effects.confuse {
                targets.effects.chaos = true;
            }
        }
    }
}

/// Undo a timed effect; instant effects have nothing to undo
pub fn revert(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Sticky => {
            targets.ball.sticky = false;
            targets.paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = false;
            targets.ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => targets.effects.confuse = false,
        PowerUpKind::Chaos => targets.effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// The live set of power-ups in the playfield
#[derive(Debug, Clone, Default)]
pub struct PowerUps {
    items: Vec<PowerUp>,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[PowerUp] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Any collected power-up of this kind with time left
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.items.iter().any(|p| p.kind == kind && p.activated)
    }

    /// Roll every kind for a destroyed brick; returns true if anything spawned
    pub fn spawn_from_brick<R: Rng + ?Sized>(&mut self, rng: &mut R, brick: &Brick) -> bool {
        assert!(!brick.solid, "solid bricks never drop power-ups");
        let before = self.items.len();
        for kind in PowerUpKind::ALL {
            if should_spawn(rng, kind.spawn_chance()) {
                self.items.push(PowerUp::new(kind, brick.body.pos));
            }
        }
        self.items.len() > before
    }

    /// Mark capsules that fell past `area_height` as missed and activate the
    /// ones touching the paddle. Returns the kinds collected.
    pub fn collect(&mut self, area_height: f32, targets: &mut EffectTargets<'_>) -> Vec<PowerUpKind> {
        let mut collected = Vec::new();
        for power_up in self.items.iter_mut().filter(|p| !p.destroyed) {
            if power_up.body.pos.y >= area_height {
                power_up.destroyed = true;
            }
            if aabb_overlap(targets.paddle, &power_up.body) {
                activate(power_up.kind, targets);
                power_up.destroyed = true;
                power_up.activated = true;
                collected.push(power_up.kind);
            }
        }
        collected
    }

    /// Fall, count down active effects, then drop what is finished
    pub fn update(&mut self, dt: f32, targets: &mut EffectTargets<'_>) {
        for i in 0..self.items.len() {
            let power_up = &mut self.items[i];
            power_up.body.advance(dt);
            if !power_up.activated {
                continue;
            }
            power_up.duration -= dt;
            if power_up.duration <= 0.0 {
                power_up.activated = false;
                let kind = power_up.kind;
                if !self.is_active(kind) {
                    revert(kind, targets);
                }
            }
        }
        self.items.retain(|p| !(p.destroyed && !p.activated));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        ball: Ball,
        paddle: Body,
        effects: ScreenEffects,
    }

    impl Fixture {
        fn new() -> Self {
            let mut ball = Ball::new(Vec2::new(390.0, 555.0), 12.5, Vec2::new(100.0, -350.0));
            ball.stuck = false;
            Self {
                ball,
                paddle: Body::new(Vec2::new(350.0, 580.0), Vec2::new(100.0, 20.0)),
                effects: ScreenEffects::default(),
            }
        }

        fn targets(&mut self) -> EffectTargets<'_> {
            EffectTargets {
                ball: &mut self.ball,
                paddle: &mut self.paddle,
                effects: &mut self.effects,
            }
        }
    }

    fn brick_at(pos: Vec2) -> Brick {
        Brick {
            body: Body::new(pos, Vec2::new(60.0, 20.0)),
            code: 2,
            solid: false,
            destroyed: false,
        }
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(PowerUpKind::Speed.spawn_chance(), 75);
        assert_eq!(PowerUpKind::Chaos.spawn_chance(), 15);
        assert_eq!(PowerUpKind::Sticky.duration(), 20.0);
        assert_eq!(PowerUpKind::PassThrough.duration(), 10.0);
        assert_eq!(PowerUpKind::Confuse.duration(), 15.0);
        assert_eq!(PowerUpKind::PadSizeIncrease.duration(), 0.0);
    }

    #[test]
    fn test_should_spawn_always_with_chance_one() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!((0..100).all(|_| should_spawn(&mut rng, 1)));
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let brick = brick_at(Vec2::new(120.0, 40.0));
        let mut a = PowerUps::new();
        let mut b = PowerUps::new();
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            a.spawn_from_brick(&mut rng_a, &brick);
            b.spawn_from_brick(&mut rng_b, &brick);
        }
        assert_eq!(a.as_slice(), b.as_slice());
        // Over 200 rolls something drops, and always at the brick
        assert!(!a.is_empty());
        assert!(a.as_slice().iter().all(|p| p.body.pos == brick.body.pos));
    }

    #[test]
    fn test_collect_sticky_and_expire() {
        let mut fx = Fixture::new();
        let mut power_ups = PowerUps::new();
        power_ups.items.push(PowerUp::new(PowerUpKind::Sticky, Vec2::new(370.0, 570.0)));

        let collected = power_ups.collect(600.0, &mut fx.targets());
        assert_eq!(collected, vec![PowerUpKind::Sticky]);
        assert!(fx.ball.sticky);
        assert_eq!(fx.paddle.color, STICKY_PADDLE_COLOR);

        power_ups.update(19.0, &mut fx.targets());
        assert!(fx.ball.sticky);
        assert_eq!(power_ups.len(), 1);

        power_ups.update(1.5, &mut fx.targets());
        assert!(!fx.ball.sticky);
        assert_eq!(fx.paddle.color, WHITE);
        assert!(power_ups.is_empty());
    }

    #[test]
    fn test_overlapping_effects_revert_on_last_expiry() {
        let mut fx = Fixture::new();
        let mut power_ups = PowerUps::new();
        power_ups.items.push(PowerUp::new(PowerUpKind::PassThrough, Vec2::new(370.0, 570.0)));
        power_ups.collect(600.0, &mut fx.targets());

        power_ups.update(5.0, &mut fx.targets());
        power_ups.items.push(PowerUp::new(PowerUpKind::PassThrough, Vec2::new(370.0, 570.0)));
        power_ups.collect(600.0, &mut fx.targets());

        // First one expires, second still running
        power_ups.update(5.5, &mut fx.targets());
        assert!(fx.ball.pass_through);
        assert!(power_ups.is_active(PowerUpKind::PassThrough));

        power_ups.update(5.0, &mut fx.targets());
        assert!(!fx.ball.pass_through);
        assert_eq!(fx.ball.body.color, WHITE);
    }

    #[test]
    fn test_missed_power_up_is_dropped() {
        let mut fx = Fixture::new();
        let mut power_ups = PowerUps::new();
        power_ups.items.push(PowerUp::new(PowerUpKind::Speed, Vec2::new(10.0, 600.0)));

        let collected = power_ups.collect(600.0, &mut fx.targets());
        assert!(collected.is_empty());
        power_ups.update(0.016, &mut fx.targets());
        assert!(power_ups.is_empty());
    }

    #[test]
    fn test_instant_effects() {
        let mut fx = Fixture::new();
        let speed = fx.ball.body.vel.length();
        activate(PowerUpKind::Speed, &mut fx.targets());
        assert!((fx.ball.body.vel.length() - speed * 1.2).abs() < 1e-3);

        activate(PowerUpKind::PadSizeIncrease, &mut fx.targets());
        assert_eq!(fx.paddle.size.x, 150.0);
    }

    #[test]
    fn test_confuse_and_chaos_exclude_each_other() {
        let mut fx = Fixture::new();
        activate(PowerUpKind::Chaos, &mut fx.targets());
        activate(PowerUpKind::Confuse, &mut fx.targets());
        assert!(fx.effects.chaos);
        assert!(!fx.effects.confuse);

        revert(PowerUpKind::Chaos, &mut fx.targets());
        activate(PowerUpKind::Confuse, &mut fx.targets());
        assert!(fx.effects.confuse);
    }

    #[test]
    #[should_panic(expected = "solid bricks never drop power-ups")]
    fn test_spawn_from_solid_brick_panics() {
        let mut brick = brick_at(Vec2::new(0.0, 0.0));
        brick.code = 1;
        brick.solid = true;
        let mut rng = Pcg32::seed_from_u64(1);
        PowerUps::new().spawn_from_brick(&mut rng, &brick);
    }
}
