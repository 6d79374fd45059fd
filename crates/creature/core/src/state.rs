//! The creature's decision state.
//!
//! A [`CreatureState`] is created once at spawn (roaming) and afterwards only
//! ever replaced wholesale by [`Will::decide`](crate::Will::decide). Focus-type
//! states carry the standing [`PassiveCommand`] so that it can be restored
//! when they end.

use bitflags::bitflags;

use crate::command::{ExecuteCommand, FollowDirective, PassiveCommand};
use crate::priority::StateKind;
use crate::types::{EntityId, Point};

/// Why a creature is focused on another one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FocusPurpose {
    /// Approach and attack.
    Engage,
    /// Approach and court: the target is asked to pair.
    Pair,
}

/// The creature being approached and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Focus {
    pub target: EntityId,
    pub purpose: FocusPurpose,
}

impl Focus {
    pub const fn engage(target: EntityId) -> Self {
        Self {
            target,
            purpose: FocusPurpose::Engage,
        }
    }

    pub const fn pair(target: EntityId) -> Self {
        Self {
            target,
            purpose: FocusPurpose::Pair,
        }
    }

    pub fn is_pairing(&self) -> bool {
        self.purpose == FocusPurpose::Pair
    }
}

bitflags! {
    /// Derived classification of a state.
    ///
    /// Every non-overridden state has exactly one of `FOCUSED | BUSY |
    /// TREKKING_FREE` and exactly one of `FOCUSED | INVESTIGATING | EXECUTING
    /// | FAINT | PAIRING | TREKKING`. An overridden state adds `OVERRIDDEN` to
    /// the flags of the state it suspended.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Disposition: u16 {
        const FOCUSED       = 1 << 0;
        const BUSY          = 1 << 1;
        const TREKKING_FREE = 1 << 2;
        const INVESTIGATING = 1 << 3;
        const EXECUTING     = 1 << 4;
        const FAINT         = 1 << 5;
        const PAIRING       = 1 << 6;
        const TREKKING      = 1 << 7;
        const OVERRIDDEN    = 1 << 8;
    }
}

impl Disposition {
    /// First exclusivity set: attention.
    pub const ATTENTION: Self = Self::FOCUSED.union(Self::BUSY).union(Self::TREKKING_FREE);

    /// Second exclusivity set: activity.
    pub const ACTIVITY: Self = Self::FOCUSED
        .union(Self::INVESTIGATING)
        .union(Self::EXECUTING)
        .union(Self::FAINT)
        .union(Self::PAIRING)
        .union(Self::TREKKING);

    /// Returns `true` if exactly one flag of each exclusivity set is present.
    pub fn is_consistent(self) -> bool {
        self.intersection(Self::ATTENTION).bits().count_ones() == 1
            && self.intersection(Self::ACTIVITY).bits().count_ones() == 1
    }
}

/// What a creature is doing, at which priority.
#[derive(Clone, Debug, PartialEq)]
pub enum CreatureState {
    PassiveCommand(PassiveCommand),
    Investigate {
        point: Point,
        passive: PassiveCommand,
    },
    Pair {
        initiator: EntityId,
        passive: PassiveCommand,
    },
    CharacterFocus {
        focus: Focus,
        passive: PassiveCommand,
    },
    Execute(ExecuteCommand),
    Faint,
    Override {
        controller: EntityId,
        suspended: Box<CreatureState>,
    },
}

impl CreatureState {
    /// The state every creature spawns in.
    pub const fn roam() -> Self {
        CreatureState::PassiveCommand(PassiveCommand::Roam)
    }

    pub fn kind(&self) -> StateKind {
        match self {
            CreatureState::PassiveCommand(_) => StateKind::PassiveCommand,
            CreatureState::Investigate { .. } => StateKind::Investigate,
            CreatureState::Pair { .. } => StateKind::Pair,
            CreatureState::CharacterFocus { .. } => StateKind::CharacterFocus,
            CreatureState::Execute(_) => StateKind::Execute,
            CreatureState::Faint => StateKind::Faint,
            CreatureState::Override { .. } => StateKind::Override,
        }
    }

    /// The standing command: either the active passive command or the one
    /// retained beneath a focus-type state.
    pub fn passive(&self) -> Option<&PassiveCommand> {
        match self {
            CreatureState::PassiveCommand(passive)
            | CreatureState::Investigate { passive, .. }
            | CreatureState::Pair { passive, .. }
            | CreatureState::CharacterFocus { passive, .. } => Some(passive),
            CreatureState::Execute(_) | CreatureState::Faint | CreatureState::Override { .. } => {
                None
            }
        }
    }

    /// Who this creature is (or will return to) following, if anyone.
    pub fn follow_directive(&self) -> Option<&FollowDirective> {
        match self {
            CreatureState::Execute(command) => command.return_to.as_ref(),
            _ => self.passive().and_then(PassiveCommand::follow_directive),
        }
    }

    pub fn focus(&self) -> Option<&Focus> {
        match self {
            CreatureState::CharacterFocus { focus, .. } => Some(focus),
            _ => None,
        }
    }

    pub fn investigation(&self) -> Option<Point> {
        match self {
            CreatureState::Investigate { point, .. } => Some(*point),
            _ => None,
        }
    }

    pub fn controller(&self) -> Option<EntityId> {
        match self {
            CreatureState::Override { controller, .. } => Some(*controller),
            _ => None,
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, CreatureState::Override { .. })
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            CreatureState::PassiveCommand(_) => Disposition::TREKKING_FREE | Disposition::TREKKING,
            CreatureState::Investigate { .. } => {
                Disposition::TREKKING_FREE | Disposition::INVESTIGATING
            }
            CreatureState::Pair { .. } => Disposition::BUSY | Disposition::PAIRING,
            CreatureState::CharacterFocus { .. } => Disposition::FOCUSED,
            CreatureState::Execute(_) => Disposition::BUSY | Disposition::EXECUTING,
            CreatureState::Faint => Disposition::BUSY | Disposition::FAINT,
            CreatureState::Override { suspended, .. } => {
                suspended.disposition() | Disposition::OVERRIDDEN
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.disposition().contains(Disposition::BUSY)
    }

    /// Whether the background scanner may look for a new focus.
    pub fn is_scanning(&self) -> bool {
        let disposition = self.disposition();
        disposition.contains(Disposition::TREKKING_FREE)
            && !disposition.contains(Disposition::OVERRIDDEN)
    }

    /// Whether a pairing request could be honoured right now.
    pub fn can_transition_to_pair(&self) -> bool {
        self.is_scanning()
    }
}

impl Default for CreatureState {
    fn default() -> Self {
        Self::roam()
    }
}
