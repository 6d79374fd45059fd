//! Drives many brains against one shared world.
//!
//! The colony owns every [`Brain`], ticks them in id order and delivers what
//! their behaviors emit: peer messages go to the addressed creature, threat
//! broadcasts go to the sender's team, and performed actions are handed back
//! to the host, which owns the world and applies them.

use std::collections::BTreeMap;

use creature_content::SpeciesCatalog;
use creature_core::{
    Action, Command, CreatureState, Desire, EntityId, Env, LogLevel, PassiveCommand, Signal,
    Stimulus,
};
use tracing::{debug, info, warn};

use crate::brain::Brain;
use crate::error::{Result, RuntimeError};

/// Signals may trigger hooks that emit more signals; give up after this many rounds.
const MAX_ROUTING_ROUNDS: usize = 8;

pub struct Colony {
    env: Env,
    catalog: SpeciesCatalog,
    brains: BTreeMap<EntityId, Brain>,
    /// Actions emitted since the host last collected them.
    actions: Vec<Action>,
}

impl Colony {
    pub fn new(env: Env, catalog: SpeciesCatalog) -> Self {
        Self {
            env,
            catalog,
            brains: BTreeMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    // ===== lifecycle =====

    /// Spawns a roaming creature of the named species.
    pub fn spawn(&mut self, id: EntityId, species: &str) -> Result<()> {
        self.spawn_with_command(id, species, PassiveCommand::Roam)
    }

    /// Spawns a creature and restores its saved standing command.
    pub fn spawn_with_command(
        &mut self,
        id: EntityId,
        species: &str,
        command: PassiveCommand,
    ) -> Result<()> {
        if self.brains.contains_key(&id) {
            return Err(RuntimeError::DuplicateCreature(id));
        }
        let species = self
            .catalog
            .get(species)
            .ok_or_else(|| RuntimeError::UnknownSpecies(species.to_owned()))?;

        let brain = Brain::with_command(id, self.env.clone(), species, command);
        info!(creature = %id, species = %species.name, state = %brain.kind(), "spawned");
        self.brains.insert(id, brain);
        self.route();
        Ok(())
    }

    /// Removes a creature after running its exit hooks, so partners are released.
    pub fn despawn(&mut self, id: EntityId) -> Result<()> {
        let mut brain = self
            .brains
            .remove(&id)
            .ok_or(RuntimeError::UnknownCreature(id))?;
        brain.on_despawn();
        for signal in brain.take_signals() {
            self.deliver(id, signal);
        }
        self.route();
        info!(creature = %id, "despawned");
        Ok(())
    }

    // ===== stimuli =====

    /// Offers a stimulus to one creature; `Ok(false)` means it was rejected.
    pub fn dispatch(
        &mut self,
        id: EntityId,
        stimulus: impl Into<Stimulus>,
        level: LogLevel,
    ) -> Result<bool> {
        let brain = self
            .brains
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownCreature(id))?;
        let accepted = brain.try_update_state(stimulus, level);
        self.route();
        Ok(accepted)
    }

    /// Issues a player command. Only tameable species take commands.
    pub fn command(&mut self, id: EntityId, command: Command) -> Result<bool> {
        let brain = self
            .brains
            .get(&id)
            .ok_or(RuntimeError::UnknownCreature(id))?;
        if !brain.capabilities().can_tame(brain.body().species()) {
            return Err(RuntimeError::not_tameable(brain.species(), &command));
        }
        self.dispatch(id, command, LogLevel::Warn)
    }

    /// Alerts `from`'s team about a threat and returns how many creatures heard it.
    pub fn broadcast(&mut self, from: EntityId, desire: Desire) -> usize {
        let heard = self.deliver_broadcast(from, desire);
        self.route();
        heard
    }

    fn deliver_broadcast(&mut self, from: EntityId, desire: Desire) -> usize {
        let team = self.env.team();
        let Some(team_id) = team.team_of(from) else {
            return 0;
        };
        let recipients: Vec<EntityId> = team
            .members(team_id)
            .into_iter()
            .filter(|&member| member != from && member != desire.target)
            .filter(|member| self.brains.contains_key(member))
            .collect();

        for member in &recipients {
            if let Some(brain) = self.brains.get_mut(member) {
                brain.try_update_state(desire, LogLevel::Debug);
            }
        }
        debug!(creature = %from, target = %desire.target, recipients = recipients.len(), "rallied team");
        recipients.len()
    }

    // ===== ticking =====

    /// Frame step for every creature; returns the actions to apply to the world.
    pub fn update(&mut self, dt: f32) -> Vec<Action> {
        for brain in self.brains.values_mut() {
            brain.update(dt);
        }
        self.route();
        std::mem::take(&mut self.actions)
    }

    /// Physics step for every creature; returns the actions to apply to the world.
    pub fn fixed_update(&mut self) -> Vec<Action> {
        for brain in self.brains.values_mut() {
            brain.fixed_update();
        }
        self.route();
        std::mem::take(&mut self.actions)
    }

    fn route(&mut self) {
        for _ in 0..MAX_ROUTING_ROUNDS {
            let mut pending = Vec::new();
            for (&id, brain) in self.brains.iter_mut() {
                pending.extend(brain.take_signals().into_iter().map(|signal| (id, signal)));
            }
            if pending.is_empty() {
                return;
            }
            for (from, signal) in pending {
                self.deliver(from, signal);
            }
        }
        warn!(rounds = MAX_ROUTING_ROUNDS, "signal routing did not settle");
    }

    fn deliver(&mut self, from: EntityId, signal: Signal) {
        match signal {
            Signal::Peer { to, message } => match self.brains.get_mut(&to) {
                Some(brain) => {
                    brain.try_update_state(message, LogLevel::Debug);
                }
                None => debug!(creature = %from, %to, "peer message to a missing creature dropped"),
            },
            Signal::Broadcast(desire) => {
                self.deliver_broadcast(from, desire);
            }
            Signal::Perform(action) => self.actions.push(action),
        }
    }

    // ===== queries =====

    pub fn brain(&self, id: EntityId) -> Option<&Brain> {
        self.brains.get(&id)
    }

    pub fn state(&self, id: EntityId) -> Option<&CreatureState> {
        self.brains.get(&id).map(Brain::state)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.brains.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.brains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brains.is_empty()
    }

    /// Standing commands of every creature, for persisting the colony.
    pub fn saved_commands(&self) -> Vec<(EntityId, PassiveCommand)> {
        self.brains
            .iter()
            .map(|(&id, brain)| (id, brain.saved_command()))
            .collect()
    }
}
