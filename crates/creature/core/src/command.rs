//! Player-issued commands and their directives.

use behavior_tree::{Queue, Recipe, TargetedBehavior};

use crate::body::Body;
use crate::types::{EntityId, Point};

/// A runnable directive: a lazily instantiated behavior over [`Body`].
pub type Plan = Recipe<Body>;

/// "What to do once a target of type `T` is known", producing [`Plan`]s.
pub type TargetedPlan<T> = TargetedBehavior<T, Body>;

/// Offensive sub-state of a follow directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Offense {
    /// Never starts fights on its own.
    #[default]
    Passive,
    /// Attacks any hostile it notices while following.
    Seeking,
    /// Attacks one specific creature.
    Targeting(EntityId),
}

impl Offense {
    pub fn is_offensive(self) -> bool {
        !matches!(self, Offense::Passive)
    }
}

/// Follow someone, optionally fighting on their behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowDirective {
    pub target: EntityId,
    pub offense: Offense,
}

impl FollowDirective {
    pub const fn new(target: EntityId) -> Self {
        Self {
            target,
            offense: Offense::Passive,
        }
    }

    pub const fn with_offense(mut self, offense: Offense) -> Self {
        self.offense = offense;
        self
    }
}

/// Discriminant of [`PassiveCommand`], keying the passive behavior table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PassiveKind {
    Roam,
    Follow,
    Station,
}

/// The standing command a creature returns to whenever nothing more
/// important is going on.
///
/// This is the only part of a creature's decision state that outlives a
/// session; the surrounding save system persists it as-is.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveCommand {
    #[default]
    Roam,
    Follow(FollowDirective),
    Station(Point),
}

impl PassiveCommand {
    pub fn kind(&self) -> PassiveKind {
        match self {
            PassiveCommand::Roam => PassiveKind::Roam,
            PassiveCommand::Follow(_) => PassiveKind::Follow,
            PassiveCommand::Station(_) => PassiveKind::Station,
        }
    }

    pub fn follow_directive(&self) -> Option<&FollowDirective> {
        match self {
            PassiveCommand::Follow(directive) => Some(directive),
            _ => None,
        }
    }
}

/// Queued behaviors issued by a player, plus who to return to afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecuteCommand {
    pub plans: Queue<Plan>,
    pub return_to: Option<FollowDirective>,
}

impl ExecuteCommand {
    /// One plan that replaces whatever is executing.
    pub fn new(plan: Plan) -> Self {
        Self {
            plans: Queue::single(plan),
            return_to: None,
        }
    }

    /// Plans appended behind whatever is executing.
    pub fn queued(plans: impl IntoIterator<Item = Plan>) -> Self {
        Self {
            plans: Queue::chain(plans),
            return_to: None,
        }
    }

    pub fn returning_to(mut self, directive: FollowDirective) -> Self {
        self.return_to = Some(directive);
        self
    }

    /// The plan that is currently running.
    pub fn current(&self) -> Option<&Plan> {
        self.plans.front()
    }

    /// Whether this queue is `earlier` with more plans appended behind it.
    ///
    /// The front plan is then the same one `earlier` was running.
    pub fn extends(&self, earlier: &ExecuteCommand) -> bool {
        self.plans.len() > earlier.plans.len()
            && earlier.plans.iter().zip(self.plans.iter()).all(|(a, b)| a == b)
    }

    /// Where the creature goes once every plan is done.
    pub fn fallback(&self) -> PassiveCommand {
        self.return_to
            .map(PassiveCommand::Follow)
            .unwrap_or(PassiveCommand::Roam)
    }
}

/// A player command.
#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Roam,
    Follow(FollowDirective),
    Station(Point),
    Execute(ExecuteCommand),
}

impl Command {
    pub fn follow(target: EntityId) -> Self {
        Command::Follow(FollowDirective::new(target))
    }

    /// The standing command this becomes, unless it is an execute directive.
    pub fn as_passive(&self) -> Option<PassiveCommand> {
        match self {
            Command::Roam => Some(PassiveCommand::Roam),
            Command::Follow(directive) => Some(PassiveCommand::Follow(*directive)),
            Command::Station(point) => Some(PassiveCommand::Station(*point)),
            Command::Execute(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl From<PassiveCommand> for Command {
    fn from(passive: PassiveCommand) -> Self {
        match passive {
            PassiveCommand::Roam => Command::Roam,
            PassiveCommand::Follow(directive) => Command::Follow(directive),
            PassiveCommand::Station(point) => Command::Station(point),
        }
    }
}
