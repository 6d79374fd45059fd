use crate::types::{EntityId, Point};

/// Who is alive and where.
pub trait Census: Send + Sync {
    /// Current position, or `None` once the creature is dead or despawned.
    fn position(&self, id: EntityId) -> Option<Point>;

    /// Whether the creature can be seen at all. Creatures without a visual
    /// presence (e.g. sound sources) are sensed regardless of concealment.
    fn has_visual_presence(&self, id: EntityId) -> bool;

    fn is_alive(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }
}
