//! Rejection reasons for state transitions.
//!
//! A rejected stimulus is ordinary control flow: the decision function says
//! why it refused and the orchestrator logs it at the caller's chosen level.
//! Only [`Misuse`] indicates a bug in the caller.

use crate::priority::StateKind;
use crate::types::EntityId;

/// Severity of a rejection, used to pick how loudly it is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The stimulus lost to something more important; it may succeed later.
    Recoverable,
    /// The stimulus does not apply to this creature right now.
    Validation,
    /// The caller broke a contract, e.g. nested overrides.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Contract violations by whoever dispatched the stimulus.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Misuse {
    /// Overrides do not nest.
    #[error("already overridden by {controller}")]
    NestedOverride { controller: EntityId },

    /// Release sent to a creature nobody controls.
    #[error("release without an active override")]
    NotOverridden,
}

/// Why the decision function refused a stimulus.
///
/// The `Display` text is the reason string surfaced in logs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    #[error("no change")]
    NoChange,

    #[error("cannot escalate from {from} to {to}")]
    Outranked { from: StateKind, to: StateKind },

    #[error("relinquishing {relinquished} cannot end {from}")]
    Insufficient {
        from: StateKind,
        relinquished: StateKind,
    },

    #[error("investigating something more important")]
    InvestigatingSomethingMoreImportant,

    #[error("already focused")]
    AlreadyFocused,

    #[error("busy with {current}")]
    Busy { current: StateKind },

    #[error("nothing to unfocus")]
    NotFocused,

    #[error("focused on {target}, not {requester}")]
    FocusedElsewhere {
        target: EntityId,
        requester: EntityId,
    },

    #[error("nothing to stop investigating")]
    NotInvestigating,

    #[error("not paired with {requester}")]
    NotPairedWith { requester: EntityId },

    #[error("species cannot attack")]
    CannotAttack,

    #[error("offense hints need a follow command")]
    NotFollowing,

    #[error("cannot target itself")]
    TargetIsSelf,

    #[error("{ended} already ended, now {current}")]
    StaleEndState { ended: StateKind, current: StateKind },

    #[error(transparent)]
    Misuse(#[from] Misuse),
}

impl Rejection {
    /// Stable snake_case identifier, suitable for log fields.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Rejection::NoChange
            | Rejection::Outranked { .. }
            | Rejection::Insufficient { .. }
            | Rejection::InvestigatingSomethingMoreImportant
            | Rejection::AlreadyFocused
            | Rejection::Busy { .. }
            | Rejection::StaleEndState { .. } => ErrorSeverity::Recoverable,
            Rejection::NotFocused
            | Rejection::FocusedElsewhere { .. }
            | Rejection::NotInvestigating
            | Rejection::NotPairedWith { .. }
            | Rejection::CannotAttack
            | Rejection::NotFollowing
            | Rejection::TargetIsSelf => ErrorSeverity::Validation,
            Rejection::Misuse(_) => ErrorSeverity::Internal,
        }
    }

    pub fn is_misuse(&self) -> bool {
        matches!(self, Rejection::Misuse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings() {
        assert_eq!(Rejection::NoChange.to_string(), "no change");
        assert_eq!(
            Rejection::InvestigatingSomethingMoreImportant.to_string(),
            "investigating something more important"
        );
        assert_eq!(
            Rejection::Outranked {
                from: StateKind::Execute,
                to: StateKind::CharacterFocus
            }
            .to_string(),
            "cannot escalate from execute to character_focus"
        );
    }

    #[test]
    fn misuse_is_internal() {
        let rejection = Rejection::from(Misuse::NotOverridden);
        assert!(rejection.is_misuse());
        assert!(rejection.severity().is_internal());
        assert_eq!(rejection.code(), "misuse");
        assert_eq!(rejection.to_string(), "release without an active override");
    }
}
