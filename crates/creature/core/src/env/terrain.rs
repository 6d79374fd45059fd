use crate::types::{EntityId, Point};

/// Static world geometry: concealment and spatial queries.
pub trait Terrain: Send + Sync {
    /// Returns `true` if nothing conceals `to` from an observer standing at `from`.
    fn line_of_sight(&self, from: Point, to: Point) -> bool;

    /// Living creatures within `radius` of `center`, nearest first.
    fn nearby(&self, center: Point, radius: f32) -> Vec<EntityId>;
}
