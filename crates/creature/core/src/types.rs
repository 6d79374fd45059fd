//! Identity and geometry primitives shared by every creature-facing API.

use std::fmt;

/// Handle of anything that lives in the world: creatures, players, props.
///
/// A handle never implies liveness. Ask [`crate::Census::position`] whether
/// the entity still exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team membership. Creatures on the same team never treat each other as threats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u16);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team{}", self.0)
    }
}

/// Continuous world position.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Returns `true` if `other` lies within `radius` (inclusive).
    pub fn within(self, other: Point, radius: f32) -> bool {
        self.distance_squared(other) <= radius * radius
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Moves from `self` toward `target` by at most `step`.
    pub fn step_toward(self, target: Point, step: f32) -> Point {
        let distance = self.distance(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let t = step / distance;
        Point::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_clamps_at_target() {
        let from = Point::new(0.0, 0.0);
        let to = Point::new(3.0, 4.0);

        assert_eq!(from.step_toward(to, 10.0), to);
        let halfway = from.step_toward(to, 2.5);
        assert!((halfway.x - 1.5).abs() < 1e-5);
        assert!((halfway.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn within_is_inclusive() {
        assert!(Point::ORIGIN.within(Point::new(3.0, 4.0), 5.0));
        assert!(!Point::ORIGIN.within(Point::new(3.0, 4.1), 5.0));
    }
}
