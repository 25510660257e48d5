//! Collision detection and response between the ball and axis-aligned boxes
//!
//! The ball is a circle; bricks, the paddle and power-ups are boxes. A hit is
//! classified by the compass direction of the vector from the ball center to
//! the closest point on the box, and resolved by reflecting one velocity axis
//! and pushing the ball back out along that axis.

use glam::Vec2;

use super::state::{Ball, Body};

/// Compass direction of a contact, in world terms (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Closest point lies below the ball center (+y)
    Up,
    Right,
    /// Closest point lies above the ball center (-y)
    Down,
    Left,
    /// Zero-length vector
    Unknown,
}

/// Checked in this order; ties keep the earlier entry
const COMPASS: [(Direction, Vec2); 4] = [
    (Direction::Up, Vec2::new(0.0, 1.0)),
    (Direction::Right, Vec2::new(1.0, 0.0)),
    (Direction::Down, Vec2::new(0.0, -1.0)),
    (Direction::Left, Vec2::new(-1.0, 0.0)),
];

/// Result of a ball-box test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub direction: Direction,
    /// Closest point on the box minus the ball center
    pub difference: Vec2,
    /// Distance the ball must move along the contact axis to separate
    pub penetration: f32,
}

/// Pick the compass axis with the largest positive dot product against `target`
pub fn vector_direction(target: Vec2) -> Direction {
    let normalized = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Direction::Unknown;
    for (direction, axis) in COMPASS {
        let dot = normalized.dot(axis);
        if dot > max {
            max = dot;
            best = direction;
        }
    }
    best
}

/// Inclusive box overlap (touching edges count)
pub fn aabb_overlap(a: &Body, b: &Body) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    a_max.x >= b.pos.x && b_max.x >= a.pos.x && a_max.y >= b.pos.y && b_max.y >= a.pos.y
}

/// Test the ball against a box.
///
/// Returns `None` when the closest point on the box is farther than the radius.
pub fn check_ball_box(ball: &Ball, rect: &Body) -> Option<Collision> {
    let center = ball.center();
    let radius = ball.radius();
    let half = rect.size * 0.5;
    let rect_center = rect.pos + half;

    let offset = center - rect_center;
    let clamped = offset.clamp(-half, half);
    let closest = rect_center + clamped;
    let difference = closest - center;

    if difference.length() > radius {
        return None;
    }

    if difference == Vec2::ZERO {
        return Some(embedded_contact(offset, half, radius));
    }

    let direction = vector_direction(difference);
    let depth = match direction {
        Direction::Left | Direction::Right => difference.x.abs(),
        _ => difference.y.abs(),
    };
    Some(Collision {
        direction,
        difference,
        penetration: radius - depth,
    })
}

/// Ball center sits inside the box: push out through the nearest face
fn embedded_contact(offset: Vec2, half: Vec2, radius: f32) -> Collision {
    // Distance from the center to each face, keyed by the resolving direction
    let faces = [
        (Direction::Up, offset.y + half.y),
        (Direction::Right, offset.x + half.x),
        (Direction::Down, half.y - offset.y),
        (Direction::Left, half.x - offset.x),
    ];
    let mut nearest = faces[0];
    for face in &faces[1..] {
        if face.1 < nearest.1 {
            nearest = *face;
        }
    }
    Collision {
        direction: nearest.0,
        difference: Vec2::ZERO,
        penetration: radius + nearest.1,
    }
}

/// Reflect one velocity axis and move the ball out of the box.
///
/// Panics on `Direction::Unknown`, which `check_ball_box` never produces.
pub fn resolve_ball_box(ball: &mut Ball, collision: &Collision) {
    let penetration = collision.penetration;
    let body = &mut ball.body;
    match collision.direction {
        Direction::Left => {
            body.vel.x = -body.vel.x;
            body.pos.x += penetration;
        }
        Direction::Right => {
            body.vel.x = -body.vel.x;
            body.pos.x -= penetration;
        }
        Direction::Up => {
            body.vel.y = -body.vel.y;
            body.pos.y -= penetration;
        }
        Direction::Down => {
            body.vel.y = -body.vel.y;
            body.pos.y += penetration;
        }
        Direction::Unknown => panic!("cannot resolve a collision without a direction"),
    }
}

/// Paddle response: steer by where the ball struck, always send it upward,
/// and keep its speed.
///
/// `base_vx` is the horizontal launch speed; hitting the paddle's edge gives
/// `base_vx * strength` before renormalizing.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Body, base_vx: f32, strength: f32) {
    let half_width = paddle.size.x * 0.5;
    let paddle_center = paddle.pos.x + half_width;
    let percentage = (ball.center().x - paddle_center) / half_width;

    let old = ball.body.vel;
    let steered = Vec2::new(base_vx * percentage * strength, -old.y.abs());
    ball.body.vel = steered.normalize_or_zero() * old.length();
    ball.stuck = ball.sticky;
}
