//! Ready-made plans for execute commands.
//!
//! Point plans are plain [`Plan`]s. Plans aimed at another creature are
//! [`TargetedPlan`]s: bind a target to get a plan that aborts as soon as the
//! target dies.

use behavior_tree::builder::{delay, from_fn, sequence};
use behavior_tree::{Poll, Recipe, TargetedBehavior};
use creature_core::{ActionKind, ActionTarget, Body, EntityId, Plan, Point, TargetedPlan};

use crate::behaviors;

/// Seconds a gathering creature stays at the spot after collecting.
const GATHER_SECONDS: f32 = 1.0;

pub fn go_to(point: Point) -> Plan {
    Recipe::new("go_to", move || behaviors::go_to(point))
}

pub fn wait(seconds: f32) -> Plan {
    Recipe::new("wait", move || delay(seconds))
}

/// Walks to `point` and gathers whatever is there.
pub fn gather(point: Point) -> Plan {
    Recipe::new("gather", move || {
        sequence(vec![
            behaviors::go_to(point),
            from_fn(move |body: &mut Body| {
                body.perform(ActionKind::Gather, ActionTarget::Point(point));
                Poll::SUCCESS
            }),
            delay(GATHER_SECONDS),
        ])
    })
}

/// Attacks the bound target until it dies.
pub fn strike() -> TargetedPlan<EntityId> {
    TargetedBehavior::new(
        "strike",
        |target: &EntityId| behaviors::engage(*target),
        |body: &Body, target: &EntityId| body.is_alive(*target),
    )
}

/// Walks up to the bound target and tames it.
pub fn tame() -> TargetedPlan<EntityId> {
    TargetedBehavior::new(
        "tame",
        |target: &EntityId| {
            let target = *target;
            from_fn(move |body: &mut Body| {
                let Some(at) = body.position_of(target) else {
                    return Poll::FAILURE;
                };
                if body.has_arrived(at) {
                    body.face(at);
                    body.perform(ActionKind::Tame, ActionTarget::Entity(target));
                    Poll::SUCCESS
                } else {
                    Poll::Pending(body.approach_then_idle(at))
                }
            })
        },
        |body: &Body, target: &EntityId| body.is_alive(*target),
    )
}
