//! The priority model arbitrating every state transition.
//!
//! [`StateKind`] is both the key of a creature's state and its priority
//! level: declaration order is priority order, lowest first. A transition is
//! legal either because it *escalates* (the new kind strictly outranks the old
//! one) or because the caller explicitly *relinquishes* a priority at least as
//! high as the current kind.

/// State categories, ordered from lowest to highest priority.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    /// Roaming, following or stationed under a standing command.
    PassiveCommand,
    /// Walking to the last known point of a sensed-but-unseen threat.
    Investigate,
    /// Being courted by another creature.
    Pair,
    /// Approaching or attacking a specific transform.
    CharacterFocus,
    /// Running a player-issued behavior queue.
    Execute,
    /// Knocked out.
    Faint,
    /// Controlled by an external actor.
    Override,
}

impl StateKind {
    /// Kinds during which the background scanner may look for a new focus.
    pub const fn is_scanning_eligible(self) -> bool {
        matches!(self, StateKind::PassiveCommand | StateKind::Investigate)
    }

    /// Kinds during which the creature cannot be focused.
    pub const fn is_busy(self) -> bool {
        matches!(self, StateKind::Execute | StateKind::Pair | StateKind::Faint)
    }
}

/// Returns `true` if ending a state of kind `from` at the `relinquished` level is legal.
#[inline]
pub fn can_transition(from: StateKind, relinquished: StateKind) -> bool {
    relinquished >= from
}

/// Returns `true` if kind `to` outranks `from` strictly enough to escalate without relinquishing.
///
/// Equal kinds never escalate: re-entering the same kind always needs an
/// explicit relinquishment.
#[inline]
pub fn can_transition_to(from: StateKind, to: StateKind) -> bool {
    to > from
}

/// The full two-path rule.
///
/// - With an explicit relinquishment, the relinquished level must be at least `from`.
/// - Without one, `to` must strictly outrank `from`.
#[inline]
pub fn permits(from: StateKind, to: StateKind, relinquished: Option<StateKind>) -> bool {
    match relinquished {
        Some(level) => can_transition(from, level),
        None => can_transition_to(from, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn declaration_order_is_priority_order() {
        let kinds: Vec<_> = StateKind::iter().collect();
        assert_eq!(kinds.first(), Some(&StateKind::PassiveCommand));
        assert_eq!(kinds.last(), Some(&StateKind::Override));
        assert!(kinds.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn escalation_requires_strictly_higher_kind() {
        for from in StateKind::iter() {
            for to in StateKind::iter() {
                assert_eq!(permits(from, to, None), to > from, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn relinquishment_must_cover_current_kind() {
        assert!(permits(
            StateKind::Execute,
            StateKind::PassiveCommand,
            Some(StateKind::Execute)
        ));
        assert!(!permits(
            StateKind::Faint,
            StateKind::PassiveCommand,
            Some(StateKind::Execute)
        ));
        assert!(permits(
            StateKind::PassiveCommand,
            StateKind::PassiveCommand,
            Some(StateKind::PassiveCommand)
        ));
    }

    #[test]
    fn scanning_and_busy_partition() {
        assert!(StateKind::PassiveCommand.is_scanning_eligible());
        assert!(StateKind::Investigate.is_scanning_eligible());
        assert!(!StateKind::Pair.is_scanning_eligible());
        assert!(StateKind::Pair.is_busy());
        assert!(!StateKind::CharacterFocus.is_busy());
    }
}
