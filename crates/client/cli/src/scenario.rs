//! The scripted simulation: a player with a hound, a wolf pack and a herd.
//!
//! The player never moves and has no brain; it only anchors the hound's
//! follow command. Commands are issued at fixed simulated times and every
//! state change is logged as it happens.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use creature_content::{SpeciesCatalog, SpeciesLoader};
use creature_core::{
    Command, CreatureConfig, EntityId, ExecuteCommand, FollowDirective, Hint, LogLevel, Point,
    StateKind, Stimulus, TeamId,
};
use creature_runtime::{Colony, Placement, SandboxWorld, plans};
use tracing::{info, warn};

use crate::config::SimConfig;

const PLAYER: EntityId = EntityId(1);
const HOUND: EntityId = EntityId(10);

const PLAYERS: TeamId = TeamId(1);
const PACK: TeamId = TeamId(2);
const HERD: TeamId = TeamId(3);

/// Who starts where.
const POPULATION: &[(EntityId, &str, Point, TeamId)] = &[
    (HOUND, "hound", Point::new(1.0, 0.0), PLAYERS),
    (EntityId(20), "wolf", Point::new(18.0, 6.0), PACK),
    (EntityId(21), "wolf", Point::new(20.0, -4.0), PACK),
    (EntityId(30), "deer", Point::new(-9.0, 5.0), HERD),
    (EntityId(31), "deer", Point::new(-7.0, 7.0), HERD),
];

/// Something the player does to the hound.
enum Order {
    Command(Command),
    Stimulus(Stimulus),
}

/// Orders issued to the hound, by simulated second.
fn script() -> Vec<(f32, Order)> {
    let errand = ExecuteCommand::queued([
        plans::gather(Point::new(-4.0, -4.0)),
        plans::go_to(Point::new(0.0, -2.0)),
    ]);
    vec![
        (0.0, Order::Command(Command::follow(PLAYER))),
        (2.0, Order::Stimulus(Hint::Offensive.into())),
        (8.0, Order::Command(Command::Execute(errand))),
        (16.0, Order::Command(Command::Station(Point::new(3.0, 3.0)))),
        (22.0, Order::Stimulus(Stimulus::Faint)),
        (24.0, Order::Command(Command::Roam)),
        (26.0, Order::Command(Command::Follow(FollowDirective::new(PLAYER)))),
    ]
}

pub async fn run(config: SimConfig) -> Result<()> {
    let catalog = load_catalog(&config)?;
    info!(species = catalog.len(), seed = config.seed, "starting simulation");

    let world = Arc::new(SandboxWorld::new(config.seed));
    let mut colony = Colony::new(world.env(CreatureConfig::default()), catalog);
    populate(&world, &mut colony)?;

    let dt = config.dt();
    let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
    let mut script = script().into_iter().peekable();
    let mut last_seen = kinds(&colony);

    for tick in 0..config.ticks {
        interval.tick().await;
        let now = tick as f32 * dt;

        while let Some((_, order)) = script.next_if(|(at, _)| *at <= now) {
            issue(&mut colony, order)?;
        }

        world.physics_step(dt);
        let mut killed = world.apply(&colony.fixed_update());
        killed.extend(world.apply(&colony.update(dt)));
        for id in killed {
            info!(creature = %id, "killed");
            if colony.despawn(id).is_ok() {
                world.remove_creature(id);
            }
        }

        let current = kinds(&colony);
        log_changes(now, &last_seen, &current);
        last_seen = current;
    }

    for (id, command) in colony.saved_commands() {
        info!(creature = %id, ?command, "standing command at exit");
    }
    Ok(())
}

fn load_catalog(config: &SimConfig) -> Result<SpeciesCatalog> {
    match &config.species_path {
        Some(path) => SpeciesLoader::load(path)
            .with_context(|| format!("loading species from {}", path.display())),
        None => Ok(SpeciesCatalog::builtin()),
    }
}

fn populate(world: &SandboxWorld, colony: &mut Colony) -> Result<()> {
    world.add_creature(PLAYER, Placement::at(Point::ORIGIN).on_team(PLAYERS));

    for &(id, species, position, team) in POPULATION {
        let speed = colony
            .catalog()
            .get(species)
            .map(|s| s.config.speed)
            .with_context(|| format!("species `{species}` is missing from the catalog"))?;
        world.add_creature(id, Placement::at(position).on_team(team).with_speed(speed));
        colony.spawn(id, species)?;
    }
    Ok(())
}

fn issue(colony: &mut Colony, order: Order) -> Result<()> {
    let accepted = match order {
        Order::Command(command) => {
            let name = command.name();
            let accepted = colony.command(HOUND, command)?;
            info!(creature = %HOUND, command = name, accepted, "player command");
            accepted
        }
        Order::Stimulus(stimulus) => {
            let name = stimulus.name();
            let accepted = colony.dispatch(HOUND, stimulus, LogLevel::Warn)?;
            info!(creature = %HOUND, stimulus = name, accepted, "player stimulus");
            accepted
        }
    };
    if !accepted {
        warn!(creature = %HOUND, "order ignored");
    }
    Ok(())
}

fn kinds(colony: &Colony) -> BTreeMap<EntityId, StateKind> {
    colony
        .ids()
        .filter_map(|id| colony.state(id).map(|state| (id, state.kind())))
        .collect()
}

fn log_changes(
    now: f32,
    before: &BTreeMap<EntityId, StateKind>,
    after: &BTreeMap<EntityId, StateKind>,
) {
    for (id, to) in after {
        match before.get(id) {
            Some(from) if from != to => {
                info!(t = %format!("{now:.2}"), creature = %id, %from, %to, "state changed")
            }
            _ => {}
        }
    }
}
