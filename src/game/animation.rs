//! Viewport resize animation
//!
//! Size moves toward the target at a fixed rate per axis. Position follows
//! the size along a straight line fixed when the animation starts, so both
//! arrive together.

use glam::Vec2;

/// Screen rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Zero-size rectangle at this one's center
    pub fn collapsed(&self) -> Self {
        Self::new(self.center(), Vec2::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportAnimation {
    current: Rect,
    target: Rect,
    /// Size change per second, always non-negative
    rate: Vec2,
    slope: Vec2,
    offset: Vec2,
}

impl ViewportAnimation {
    pub fn new(from: Rect, to: Rect, rate: Vec2) -> Self {
        let delta = to.size - from.size;
        let mut slope = Vec2::ZERO;
        let mut offset = to.pos;
        let mut current = from;
        for axis in 0..2 {
            if delta[axis] != 0.0 {
                slope[axis] = (to.pos[axis] - from.pos[axis]) / delta[axis];
                offset[axis] = from.pos[axis] - slope[axis] * from.size[axis];
            } else {
                current.pos[axis] = to.pos[axis];
            }
        }
        Self {
            current,
            target: to,
            rate: rate.abs(),
            slope,
            offset,
        }
    }

    pub fn current(&self) -> Rect {
        self.current
    }

    pub fn target(&self) -> Rect {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.current == self.target
    }

    /// Advance by `dt` seconds and return the new rectangle
    pub fn step(&mut self, dt: f32) -> Rect {
        for axis in 0..2 {
            let size = self.current.size[axis];
            let target = self.target.size[axis];
            if size == target {
                self.current.pos[axis] = self.target.pos[axis];
                continue;
            }

            let step = dt * self.rate[axis];
            let next = if size < target {
                (size + step).min(target)
            } else {
                (size - step).max(target)
            };
            self.current.size[axis] = next;
            self.current.pos[axis] = if next == target {
                self.target.pos[axis]
            } else {
                self.slope[axis] * next + self.offset[axis]
            };
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0))
    }

    fn preview() -> Rect {
        Rect::new(Vec2::new(360.0, 150.0), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_grow_from_collapsed_preview() {
        let from = preview().collapsed();
        assert_eq!(from.pos, Vec2::new(560.0, 300.0));

        let mut anim = ViewportAnimation::new(from, preview(), Vec2::new(1200.0, 900.0));
        let rect = anim.step(1.0 / 6.0);
        assert!(rect.size.abs_diff_eq(Vec2::new(200.0, 150.0), 1e-3));
        // Halfway in size means halfway along the line
        assert!(rect.pos.abs_diff_eq(Vec2::new(460.0, 225.0), 1e-3));
        assert!(!anim.is_finished());

        anim.step(1.0);
        assert!(anim.is_finished());
        assert_eq!(anim.current(), preview());
    }

    #[test]
    fn test_preview_to_full_screen() {
        let mut anim = ViewportAnimation::new(preview(), full(), Vec2::new(1200.0, 900.0));
        let rect = anim.step(0.1);
        assert!(rect.size.abs_diff_eq(Vec2::new(520.0, 390.0), 1e-3));
        assert!(rect.pos.abs_diff_eq(Vec2::new(252.0, 105.0), 1e-3));

        for _ in 0..10 {
            anim.step(0.1);
        }
        assert_eq!(anim.current(), full());
    }

    #[test]
    fn test_unchanged_axis_jumps_to_target() {
        let from = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0));
        let to = Rect::new(Vec2::new(0.0, 40.0), Vec2::new(200.0, 50.0));
        let mut anim = ViewportAnimation::new(from, to, Vec2::splat(100.0));
        assert_eq!(anim.current().pos.y, 40.0);

        let rect = anim.step(0.5);
        assert_eq!(rect.size.x, 150.0);
        assert_eq!(rect.pos.x, 5.0);
        assert_eq!(rect.pos.y, 40.0);
    }

    #[test]
    fn test_axes_finish_independently() {
        let from = Rect::new(Vec2::ZERO, Vec2::new(0.0, 0.0));
        let to = Rect::new(Vec2::ZERO, Vec2::new(100.0, 400.0));
        let mut anim = ViewportAnimation::new(from, to, Vec2::splat(200.0));
        let rect = anim.step(1.0);
        assert_eq!(rect.size, Vec2::new(100.0, 200.0));
        assert!(!anim.is_finished());
        anim.step(1.0);
        assert!(anim.is_finished());
    }
}
