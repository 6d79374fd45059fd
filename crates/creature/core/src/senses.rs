//! Stimuli and the snapshot they are judged against.

use crate::command::Command;
use crate::config::SpeciesConfig;
use crate::priority::StateKind;
use crate::state::Focus;
use crate::types::{EntityId, Point, TeamId};

/// Changes to who controls the creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideDelta {
    Seize { controller: EntityId },
    Release,
}

/// Player hints that adjust a follow directive's offense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    /// Toggle between passive and seeking.
    Offensive,
    /// Attack one specific creature; sent twice, it toggles back to passive.
    Target(EntityId),
    StandDown,
}

/// Messages exchanged between creatures during pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerMessage {
    /// Sent by an initiator that reached its partner.
    PairRequest { from: EntityId },
    /// The initiator gave up or finished; the subject may leave `Pair`.
    EndPairToSubject { from: EntityId },
    /// The subject left `Pair`; the initiator may drop its pairing focus.
    EndPairToInitiator { from: EntityId },
}

impl PeerMessage {
    pub fn sender(&self) -> EntityId {
        match self {
            PeerMessage::PairRequest { from }
            | PeerMessage::EndPairToSubject { from }
            | PeerMessage::EndPairToInitiator { from } => *from,
        }
    }
}

/// A sensed threat: who, and where it was last noticed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Desire {
    pub target: EntityId,
    pub last_seen: Point,
}

/// Changes raised by the creature's own senses or behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvironmentDelta {
    AddFocus(Focus),
    RemoveFocus,
    ClearInvestigation,
}

/// Synthetic stimuli raised by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// The running behavior of a state of this kind finished on its own.
    EndState(StateKind),
}

/// One input to the decision function.
#[derive(Clone, Debug, PartialEq, Default, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stimulus {
    #[default]
    Nothing,
    Override(OverrideDelta),
    Faint,
    Command(Command),
    Hint(Hint),
    Peer(PeerMessage),
    Desire(Desire),
    Environment(EnvironmentDelta),
    Feedback(Feedback),
}

impl Stimulus {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn end_state(kind: StateKind) -> Self {
        Stimulus::Feedback(Feedback::EndState(kind))
    }
}

impl From<Command> for Stimulus {
    fn from(command: Command) -> Self {
        Stimulus::Command(command)
    }
}

impl From<PeerMessage> for Stimulus {
    fn from(message: PeerMessage) -> Self {
        Stimulus::Peer(message)
    }
}

impl From<Hint> for Stimulus {
    fn from(hint: Hint) -> Self {
        Stimulus::Hint(hint)
    }
}

impl From<Desire> for Stimulus {
    fn from(desire: Desire) -> Self {
        Stimulus::Desire(desire)
    }
}

impl From<EnvironmentDelta> for Stimulus {
    fn from(delta: EnvironmentDelta) -> Self {
        Stimulus::Environment(delta)
    }
}

/// How loudly a rejected stimulus is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// Rejections are expected; say nothing.
    #[default]
    Silent,
    Debug,
    Warn,
    Error,
}

/// Immutable facts about the creature taken when the stimulus was dispatched.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub me: EntityId,
    pub position: Point,
    pub team: Option<TeamId>,
    pub species: SpeciesConfig,
}

/// A stimulus together with the snapshot it is judged against.
#[derive(Clone, Debug, PartialEq)]
pub struct Senses {
    pub stimulus: Stimulus,
    pub snapshot: Snapshot,
}

impl Senses {
    pub fn new(stimulus: impl Into<Stimulus>, snapshot: Snapshot) -> Self {
        Self {
            stimulus: stimulus.into(),
            snapshot,
        }
    }
}
