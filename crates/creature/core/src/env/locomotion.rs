use behavior_tree::Wait;

use crate::types::{EntityId, Point};

/// Movement primitives, addressed by the moving creature's id.
///
/// Methods returning [`Wait`] issue one steering step and say when the
/// calling behavior should be resumed.
pub trait Locomotion: Send + Sync {
    /// Wander to a random nearby point.
    fn roam(&self, me: EntityId) -> Wait;

    /// Keep pace with a moving point.
    fn follow(&self, me: EntityId, target: Point) -> Wait;

    /// Walk to `point` and stop once within `tolerance` of it.
    fn approach_then_idle(&self, me: EntityId, point: Point, tolerance: f32) -> Wait;

    /// Steer toward `point` without any arrival logic.
    fn move_toward(&self, me: EntityId, point: Point);

    fn face(&self, me: EntityId, point: Point);

    fn halt(&self, me: EntityId);

    /// The closest obstacle blocking the current heading, if any.
    fn obstacle(&self, me: EntityId) -> Option<Point>;
}
