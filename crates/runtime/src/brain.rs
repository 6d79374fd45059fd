//! The per-creature orchestrator.
//!
//! A [`Brain`] exclusively owns one [`CreatureState`]. Every change goes
//! through [`Brain::try_update_state`], which asks the pure decision function
//! for the next state and then drives the habit hooks until no further
//! transition is pending. Afterwards it restarts the running behavior (or
//! lets it carry on when plans were only queued behind it) and starts or
//! stops the background scanner.
//!
//! Scheduling is cooperative: [`Brain::update`] advances frame-phase waits and
//! [`Brain::fixed_update`] advances physics-phase waits. Stimuli that
//! behaviors post are processed right after the step that posted them.

use std::collections::HashMap;

use behavior_tree::{Clock, Completion, Task};
use creature_content::Species;
use creature_core::{
    Body, Command, CreatureState, EntityId, Env, EnvironmentDelta, LogLevel, PassiveCommand,
    Point, Rejection, Senses, Signal, Snapshot, StateKind, Stimulus, Will,
};
use strum::IntoEnumIterator;
use tracing::{debug, error, warn};

use crate::behaviors;
use crate::habit::{Update, habit};
use crate::species::Capabilities;

/// One-shot tasks that post a stimulus unless cancelled first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Timer {
    /// Gives up an investigation after roughly the travel time to its point.
    InvestigationTimeout,
    /// Ends a faint.
    FaintRecovery,
}

pub struct Brain {
    id: EntityId,
    species: String,
    capabilities: Capabilities,
    body: Body,
    state: CreatureState,
    /// A transition was applied that the hooks have not seen yet.
    dirty: bool,
    /// State held before the first pending transition of this batch.
    before: Option<CreatureState>,
    /// Guards `on_state_change` against re-entry from its own hooks.
    changing: bool,
    running: Task<Body>,
    scanner: Task<Body>,
    timers: HashMap<Timer, Task<Body>>,
}

impl Brain {
    /// Spawns a roaming creature.
    pub fn new(id: EntityId, env: Env, species: &Species) -> Self {
        let mut brain = Self {
            id,
            species: species.name.clone(),
            capabilities: Capabilities::of(species.kind),
            body: Body::new(id, env, species.config.clone()),
            state: CreatureState::roam(),
            dirty: false,
            before: None,
            changing: false,
            running: Task::idle(),
            scanner: Task::idle(),
            timers: HashMap::new(),
        };
        brain.refresh_body();
        brain.enter_initial();
        brain
    }

    /// Spawns a creature and restores a saved standing command.
    pub fn with_command(id: EntityId, env: Env, species: &Species, command: PassiveCommand) -> Self {
        let mut brain = Self::new(id, env, species);
        if command != PassiveCommand::Roam {
            brain.try_update_state(Command::from(command), LogLevel::Warn);
        }
        brain
    }

    fn enter_initial(&mut self) {
        self.changing = true;
        (habit(self.state.kind()).on_enter)(self);
        self.changing = false;
        if self.dirty {
            self.on_state_change();
        } else {
            self.restart_running();
            self.sync_scanner();
        }
    }

    // ===== queries =====

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn state(&self) -> &CreatureState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn position(&self) -> Point {
        self.body
            .env()
            .census()
            .position(self.id)
            .unwrap_or_else(|| self.body.position())
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_scanning(&self) -> bool {
        self.state.is_scanning()
    }

    pub fn can_transition_to_pair(&self) -> bool {
        self.state.can_transition_to_pair()
    }

    pub fn is_running_behavior(&self) -> bool {
        self.running.is_running()
    }

    /// How many behaviors the running task has started so far.
    pub fn behavior_starts(&self) -> u64 {
        self.running.starts()
    }

    pub fn is_scanner_running(&self) -> bool {
        self.scanner.is_running()
    }

    pub fn is_timer_running(&self, timer: Timer) -> bool {
        self.timers.get(&timer).is_some_and(Task::is_running)
    }

    /// The standing command to persist for this creature.
    pub fn saved_command(&self) -> PassiveCommand {
        saved_command(&self.state)
    }

    // ===== stimuli =====

    /// Applies `stimulus` if the decision function accepts it.
    ///
    /// Rejections are reported at `level`; programming misuse is always an
    /// error and fails loudly in debug builds.
    pub fn try_update_state(&mut self, stimulus: impl Into<Stimulus>, level: LogLevel) -> bool {
        let stimulus = stimulus.into();
        let senses = self.senses(stimulus);
        let decision = Will::new(self.body.env()).decide(&self.state, &senses);

        match decision {
            Ok(next) => {
                debug!(
                    creature = %self.id,
                    stimulus = senses.stimulus.name(),
                    from = %self.state.kind(),
                    to = %next.kind(),
                    "state transition"
                );
                if !self.dirty {
                    self.before = Some(self.state.clone());
                }
                self.state = next;
                self.dirty = true;
                self.on_state_change();
                true
            }
            Err(rejection) => {
                self.report(&senses.stimulus, &rejection, level);
                false
            }
        }
    }

    fn senses(&self, stimulus: Stimulus) -> Senses {
        let env = self.body.env();
        Senses::new(
            stimulus,
            Snapshot {
                me: self.id,
                position: self.position(),
                team: env.team().team_of(self.id),
                species: self.body.species().clone(),
            },
        )
    }

    fn report(&self, stimulus: &Stimulus, rejection: &Rejection, level: LogLevel) {
        let name = stimulus.name();
        let kind = self.state.kind();
        if rejection.is_misuse() {
            error!(creature = %self.id, stimulus = name, state = %kind, reason = %rejection, "stimulus misuse");
            if cfg!(debug_assertions) {
                panic!("{} received misused {name} in {kind}: {rejection}", self.id);
            }
            return;
        }
        match level {
            LogLevel::Silent => {}
            LogLevel::Debug => {
                debug!(creature = %self.id, stimulus = name, state = %kind, reason = %rejection, "stimulus rejected")
            }
            LogLevel::Warn => {
                warn!(creature = %self.id, stimulus = name, state = %kind, reason = %rejection, "stimulus rejected")
            }
            LogLevel::Error => {
                error!(creature = %self.id, stimulus = name, state = %kind, reason = %rejection, "stimulus rejected")
            }
        }
    }

    /// Runs exit/enter or update hooks until no transition is pending, then
    /// restarts (or resumes) the running behavior and syncs the scanner.
    fn on_state_change(&mut self) {
        if self.changing {
            return;
        }
        self.changing = true;

        let mut resume = false;
        while self.dirty {
            self.dirty = false;
            let Some(old) = self.before.take() else {
                error!(
                    creature = %self.id,
                    kind = %self.state.kind(),
                    "pending transition lost its previous state"
                );
                break;
            };
            let (from, to) = (old.kind(), self.state.kind());
            if from == to {
                resume = match (habit(to).on_update)(self, &old) {
                    Update::Unsupported => {
                        error!(creature = %self.id, kind = %to, "same-kind transition is not supported");
                        false
                    }
                    Update::Restart => false,
                    Update::Resume => true,
                };
            } else {
                resume = false;
                (habit(from).on_exit)(self, &old);
                (habit(to).on_enter)(self);
            }
        }

        if !(resume && self.running.is_running()) {
            self.restart_running();
        }
        self.sync_scanner();
        self.changing = false;
    }

    fn restart_running(&mut self) {
        let kind = self.state.kind();
        match (habit(kind).run)(&self.state, self.capabilities) {
            Some(node) => {
                let on_complete: Completion<Body> = Box::new(move |_status, body: &mut Body| {
                    body.post(Stimulus::end_state(kind), LogLevel::Debug);
                });
                self.running.start(node, Some(on_complete));
            }
            None => {
                self.running.stop();
            }
        }
    }

    fn sync_scanner(&mut self) {
        if !self.state.is_scanning() {
            self.scanner.stop();
        } else if !self.scanner.is_running() {
            self.scanner
                .start(behaviors::scanner(self.capabilities), None);
        }
    }

    // ===== habit support =====

    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub(crate) fn refresh_body(&mut self) {
        let position = self.position();
        self.body.refresh(&self.state, position);
    }

    /// Starts (or restarts) a one-shot timer posting `stimulus` after `seconds`.
    pub(crate) fn start_timer(&mut self, timer: Timer, seconds: f32, stimulus: Stimulus) {
        debug!(creature = %self.id, %timer, seconds, "timer started");
        let node = behaviors::after(seconds, move |body: &mut Body| {
            body.post(stimulus.clone(), LogLevel::Debug);
        });
        self.timers.entry(timer).or_default().start(node, None);
    }

    pub(crate) fn stop_timer(&mut self, timer: Timer) {
        if let Some(task) = self.timers.get_mut(&timer) {
            task.stop();
        }
    }

    // ===== ticking =====

    /// Frame step: checks state assumptions, then advances every task.
    pub fn update(&mut self, dt: f32) {
        self.body.tick(dt);
        self.state_assumptions();
        self.advance(Clock::frame(dt));
    }

    /// Physics step: resumes behaviors waiting for the next physics step.
    pub fn fixed_update(&mut self) {
        self.advance(Clock::physics());
    }

    fn advance(&mut self, clock: Clock) {
        self.refresh_body();
        self.running.advance(&mut self.body, clock);
        self.drain();

        self.refresh_body();
        self.scanner.advance(&mut self.body, clock);
        self.drain();

        for timer in Timer::iter() {
            self.refresh_body();
            if let Some(task) = self.timers.get_mut(&timer) {
                task.advance(&mut self.body, clock);
            }
            self.drain();
        }
    }

    /// Processes stimuli posted by behaviors, in posting order.
    fn drain(&mut self) {
        loop {
            let posted = self.body.take_posted();
            if posted.is_empty() {
                break;
            }
            for (stimulus, level) in posted {
                self.try_update_state(stimulus, level);
            }
        }
    }

    /// Messages, broadcasts and actions emitted since the last call.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        self.body.take_signals()
    }

    /// Self-heals states whose preconditions no longer hold.
    ///
    /// Skipped while overridden: the controller owns the creature then.
    fn state_assumptions(&mut self) {
        if self.state.is_overridden() {
            return;
        }
        if let Some((problem, fallback)) = self.violated_assumption() {
            error!(
                creature = %self.id,
                state = %self.state.kind(),
                problem,
                fallback = fallback.name(),
                "state assumption violated"
            );
            self.try_update_state(fallback, LogLevel::Error);
        }
    }

    fn violated_assumption(&self) -> Option<(&'static str, Stimulus)> {
        let census = self.body.env().census();
        let roam = || Stimulus::Command(Command::Roam);

        if !self.state.disposition().is_consistent() {
            return Some(("disposition is inconsistent", roam()));
        }
        match &self.state {
            CreatureState::PassiveCommand(PassiveCommand::Follow(directive))
                if !census.is_alive(directive.target) =>
            {
                Some(("follow target is gone", roam()))
            }
            CreatureState::PassiveCommand(PassiveCommand::Station(point)) if !point.is_finite() => {
                Some(("station point is not finite", roam()))
            }
            CreatureState::Execute(command)
                if command
                    .return_to
                    .is_some_and(|directive| !census.is_alive(directive.target)) =>
            {
                Some(("return-to target is gone", roam()))
            }
            CreatureState::Execute(_) if !self.running.is_running() => {
                Some(("execute has no running behavior", roam()))
            }
            CreatureState::CharacterFocus { focus, .. } if !census.is_alive(focus.target) => {
                Some(("focus target is gone", EnvironmentDelta::RemoveFocus.into()))
            }
            CreatureState::Pair { initiator, .. } if !census.is_alive(*initiator) => Some((
                "pair initiator is gone",
                Stimulus::end_state(StateKind::Pair),
            )),
            _ => None,
        }
    }

    /// Runs the exit hooks of the current state and stops every task.
    pub fn on_despawn(&mut self) {
        let state = self.state.clone();
        if let CreatureState::Override { suspended, .. } = &state {
            (habit(suspended.kind()).on_exit)(self, suspended);
        }
        (habit(state.kind()).on_exit)(self, &state);
        self.running.stop();
        self.scanner.stop();
        for task in self.timers.values_mut() {
            task.stop();
        }
        debug!(creature = %self.id, state = %state.kind(), "despawned");
    }
}

fn saved_command(state: &CreatureState) -> PassiveCommand {
    match state {
        CreatureState::Override { suspended, .. } => saved_command(suspended),
        CreatureState::Execute(command) => command.fallback(),
        CreatureState::Faint => PassiveCommand::Roam,
        other => other.passive().copied().unwrap_or_default(),
    }
}
