//! Vertical fall behavior for drops and power-ups
//!
//! Every variant has the same shape (a speed and a multiplier), so the
//! strategy is plain data: the field hands each entity a `Movement` at spawn
//! time and never branches on entity kind when moving it.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Fall speed profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    Normal,
    /// 50% faster
    Fast,
    /// 30% slower
    Slow,
}

impl MovementKind {
    pub fn multiplier(self) -> f32 {
        match self {
            MovementKind::Normal => 1.0,
            MovementKind::Fast => 1.5,
            MovementKind::Slow => 0.7,
        }
    }
}

/// A fall strategy with its effective speed baked in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub kind: MovementKind,
    /// Effective fall speed (px/s), multiplier already applied
    pub speed: f32,
}

impl Movement {
    pub fn new(kind: MovementKind, base_speed: f32) -> Self {
        Self {
            kind,
            speed: base_speed * kind.multiplier(),
        }
    }

    pub fn normal(base_speed: f32) -> Self {
        Self::new(MovementKind::Normal, base_speed)
    }

    pub fn fast(base_speed: f32) -> Self {
        Self::new(MovementKind::Fast, base_speed)
    }

    pub fn slow(base_speed: f32) -> Self {
        Self::new(MovementKind::Slow, base_speed)
    }

    /// Vertical velocity (negative: falling)
    #[inline]
    pub fn velocity_y(&self) -> f32 {
        -self.speed
    }

    /// Move the box down by `speed * dt`
    #[inline]
    pub fn advance(&self, rect: &mut Rect, dt: f32) {
        rect.pos.y -= self.speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_scale_speed() {
        let mut normal = Rect::new(0.0, 480.0, 64.0, 64.0);
        let mut fast = normal;
        let mut slow = normal;

        Movement::normal(200.0).advance(&mut normal, 0.5);
        Movement::fast(200.0).advance(&mut fast, 0.5);
        Movement::slow(200.0).advance(&mut slow, 0.5);

        assert_eq!(normal.y(), 380.0);
        assert_eq!(fast.y(), 330.0);
        assert!((slow.y() - 410.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut rect = Rect::new(10.0, 200.0, 64.0, 64.0);
        Movement::fast(280.0).advance(&mut rect, 0.0);
        assert_eq!(rect, Rect::new(10.0, 200.0, 64.0, 64.0));
    }

    #[test]
    fn test_only_y_changes() {
        let mut rect = Rect::new(42.0, 100.0, 64.0, 64.0);
        Movement::normal(150.0).advance(&mut rect, 0.1);
        assert_eq!(rect.x(), 42.0);
        assert_eq!(rect.size.x, 64.0);
        assert_eq!(Movement::normal(150.0).velocity_y(), -150.0);
    }
}
