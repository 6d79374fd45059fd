//! Shared harness: a sandbox world and a colony stepped together.
#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};

use creature_content::SpeciesCatalog;
use creature_core::{Census, CreatureConfig, CreatureState, EntityId, Point, TeamId};
use creature_runtime::{Colony, Placement, SandboxWorld};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub const STEP: f32 = 0.1;
pub const PLAYER: EntityId = EntityId(100);

pub struct Sim {
    pub world: Arc<SandboxWorld>,
    pub colony: Colony,
}

impl Sim {
    pub fn new() -> Self {
        Self::with(CreatureConfig::default(), SpeciesCatalog::builtin())
    }

    pub fn with(config: CreatureConfig, catalog: SpeciesCatalog) -> Self {
        let world = Arc::new(SandboxWorld::new(42));
        let colony = Colony::new(world.env(config), catalog);
        Self { world, colony }
    }

    /// Places a creature in the world and gives it a brain.
    pub fn spawn(&mut self, id: EntityId, species: &str, placement: Placement) {
        let speed = self
            .colony
            .catalog()
            .get(species)
            .map(|s| s.config.speed)
            .expect("species in catalog");
        self.world.add_creature(id, placement.with_speed(speed));
        self.colony.spawn(id, species).expect("spawn");
    }

    /// Places a brainless creature, e.g. a player or prey.
    pub fn place(&mut self, id: EntityId, placement: Placement) {
        self.world.add_creature(id, placement);
    }

    pub fn place_player(&mut self, at: Point) {
        self.place(PLAYER, Placement::at(at).on_team(TeamId(1)));
    }

    pub fn step(&mut self) {
        self.world.physics_step(STEP);
        let actions = self.colony.fixed_update();
        self.world.apply(&actions);
        let actions = self.colony.update(STEP);
        self.world.apply(&actions);
    }

    pub fn run(&mut self, seconds: f32) {
        let steps = (seconds / STEP).round() as usize;
        for _ in 0..steps {
            self.step();
        }
    }

    /// Steps until `done` holds; returns whether it did within `seconds`.
    pub fn run_until(&mut self, seconds: f32, done: impl Fn(&Sim) -> bool) -> bool {
        let steps = (seconds / STEP).round() as usize;
        for _ in 0..steps {
            if done(self) {
                return true;
            }
            self.step();
        }
        done(self)
    }

    pub fn state(&self, id: EntityId) -> &CreatureState {
        self.colony.state(id).expect("creature in colony")
    }

    pub fn position(&self, id: EntityId) -> Point {
        self.world.position(id).expect("creature alive")
    }
}

/// Records the message of every error event emitted while capturing.
#[derive(Clone, Default)]
pub struct ErrorLog(Arc<Mutex<Vec<String>>>);

impl ErrorLog {
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for ErrorLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            let mut message = Message(String::new());
            event.record(&mut message);
            self.0.lock().unwrap().push(message.0);
        }
    }
}

struct Message(String);

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
