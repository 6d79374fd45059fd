use crate::types::{EntityId, TeamId};

/// Team membership.
pub trait Team: Send + Sync {
    fn team_of(&self, id: EntityId) -> Option<TeamId>;

    fn members(&self, team: TeamId) -> Vec<EntityId>;

    /// Creatures without a team are never allies, not even of each other.
    fn same_team(&self, a: EntityId, b: EntityId) -> bool {
        match (self.team_of(a), self.team_of(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}
