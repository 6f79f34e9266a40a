//! Arcade bodies
//!
//! Axis-aligned boxes that integrate velocity and bounce off the world edges.
//! No gravity, drag or body-vs-body collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Velocity state of a physics image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub vel: Vec2,
    /// Fraction of the normal velocity kept after a wall hit
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            vel: Vec2::ZERO,
            bounce: 0.0,
            collide_world_bounds: false,
        }
    }
}

impl Body {
    /// Advance a body whose box is `half_extents` around `center`
    ///
    /// Returns the new centre. A body bigger than the world is pinned to the
    /// world centre on that axis.
    pub fn step(&mut self, center: Vec2, half_extents: Vec2, world: Vec2, dt: f32) -> Vec2 {
        let mut pos = center + self.vel * dt;

        if !self.collide_world_bounds {
            return pos;
        }

        (pos.x, self.vel.x) = resolve_axis(pos.x, self.vel.x, half_extents.x, world.x, self.bounce);
        (pos.y, self.vel.y) = resolve_axis(pos.y, self.vel.y, half_extents.y, world.y, self.bounce);

        pos
    }
}

/// Clamp one axis into [half, extent - half], reflecting velocity on contact
fn resolve_axis(pos: f32, vel: f32, half: f32, extent: f32, bounce: f32) -> (f32, f32) {
    let min = half;
    let max = extent - half;

    if min > max {
        return (extent / 2.0, 0.0);
    }

    if pos < min {
        // Only reflect when moving into the wall
        let vel = if vel < 0.0 { -vel * bounce } else { vel };
        (min, vel)
    } else if pos > max {
        let vel = if vel > 0.0 { -vel * bounce } else { vel };
        (max, vel)
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_free_body_integrates_velocity() {
        let mut body = Body {
            vel: Vec2::new(120.0, -60.0),
            ..Default::default()
        };
        let pos = body.step(Vec2::new(400.0, 300.0), Vec2::splat(10.0), WORLD, 0.5);
        assert_eq!(pos, Vec2::new(460.0, 270.0));
        assert_eq!(body.vel, Vec2::new(120.0, -60.0));
    }

    #[test]
    fn test_right_wall_reflects_and_damps() {
        let mut body = Body {
            vel: Vec2::new(200.0, 0.0),
            bounce: 0.8,
            collide_world_bounds: true,
        };
        let pos = body.step(Vec2::new(785.0, 300.0), Vec2::splat(10.0), WORLD, 0.1);
        assert_eq!(pos.x, 790.0);
        assert!((body.vel.x + 160.0).abs() < 1e-4);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut body = Body {
            vel: Vec2::new(0.0, -100.0),
            bounce: 0.5,
            collide_world_bounds: true,
        };
        let pos = body.step(Vec2::new(400.0, 12.0), Vec2::splat(10.0), WORLD, 0.1);
        assert_eq!(pos.y, 10.0);
        assert!((body.vel.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_without_world_bounds_body_leaves_world() {
        let mut body = Body {
            vel: Vec2::new(-1000.0, 0.0),
            bounce: 0.8,
            collide_world_bounds: false,
        };
        let pos = body.step(Vec2::new(5.0, 300.0), Vec2::splat(10.0), WORLD, 0.1);
        assert!(pos.x < 0.0);
        assert_eq!(body.vel.x, -1000.0);
    }

    #[test]
    fn test_oversized_body_is_pinned_to_center() {
        let mut body = Body {
            vel: Vec2::new(50.0, 0.0),
            bounce: 0.8,
            collide_world_bounds: true,
        };
        let pos = body.step(Vec2::new(100.0, 300.0), Vec2::new(500.0, 10.0), WORLD, 0.1);
        assert_eq!(pos.x, 400.0);
        assert_eq!(body.vel.x, 0.0);
    }
}
