//! Global tuning constants and per-species configuration.

/// Creature-wide configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureConfig {
    /// Targets farther than this are never visible, whatever the terrain says.
    pub neighborhood_radius: f32,
    /// Distance at which an approach counts as arrived.
    pub arrival_tolerance: f32,
    /// Multiplier on `distance / speed` before an investigation is given up.
    pub investigation_patience: f32,
}

impl CreatureConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NEIGHBORHOOD_RADIUS: f32 = 24.0;
    pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 0.75;
    pub const DEFAULT_INVESTIGATION_PATIENCE: f32 = 1.5;

    /// Investigations never time out faster than this, however close the point.
    pub const MIN_INVESTIGATION_SECONDS: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            neighborhood_radius: Self::DEFAULT_NEIGHBORHOOD_RADIUS,
            arrival_tolerance: Self::DEFAULT_ARRIVAL_TOLERANCE,
            investigation_patience: Self::DEFAULT_INVESTIGATION_PATIENCE,
        }
    }

    pub fn with_neighborhood_radius(mut self, radius: f32) -> Self {
        self.neighborhood_radius = radius;
        self
    }

    pub fn with_arrival_tolerance(mut self, tolerance: f32) -> Self {
        self.arrival_tolerance = tolerance;
        self
    }

    /// Seconds a creature moving at `speed` keeps investigating a point `distance` away.
    pub fn investigation_timeout(&self, distance: f32, speed: f32) -> f32 {
        let travel = if speed > 0.0 { distance / speed } else { 0.0 };
        (travel * self.investigation_patience).max(Self::MIN_INVESTIGATION_SECONDS)
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-species capabilities and tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeciesConfig {
    /// Whether the species can attack at all. Offense hints require it.
    pub can_attack: bool,
    /// Whether players can tame (command) this species.
    pub can_tame: bool,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Radius used when scanning for a focus and when tethering a chase.
    pub sense_radius: f32,
    /// Distance at which a strike lands.
    pub attack_range: f32,
    /// Seconds between strikes.
    pub attack_cooldown: f32,
    /// Seconds between background focus scans.
    pub scan_interval: f32,
    /// Minimum seconds between two pairings; `None` never seeks a partner.
    pub pair_interval: Option<f32>,
    /// Seconds a pairing lasts once both creatures are together.
    pub pair_duration: f32,
    /// Seconds until a fainted creature recovers; `None` stays down until commanded.
    pub faint_recovery: Option<f32>,
    /// Whether engaging a threat alerts the rest of the team.
    pub rallies: bool,
}

impl SpeciesConfig {
    pub const DEFAULT_SPEED: f32 = 3.0;
    pub const DEFAULT_SENSE_RADIUS: f32 = 12.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 1.5;
    pub const DEFAULT_ATTACK_COOLDOWN: f32 = 1.0;
    pub const DEFAULT_SCAN_INTERVAL: f32 = 0.5;
    pub const DEFAULT_PAIR_DURATION: f32 = 3.0;

    pub fn new() -> Self {
        Self {
            can_attack: false,
            can_tame: false,
            speed: Self::DEFAULT_SPEED,
            sense_radius: Self::DEFAULT_SENSE_RADIUS,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            attack_cooldown: Self::DEFAULT_ATTACK_COOLDOWN,
            scan_interval: Self::DEFAULT_SCAN_INTERVAL,
            pair_interval: None,
            pair_duration: Self::DEFAULT_PAIR_DURATION,
            faint_recovery: None,
            rallies: false,
        }
    }

    pub fn attacking(mut self) -> Self {
        self.can_attack = true;
        self
    }

    pub fn tameable(mut self) -> Self {
        self.can_tame = true;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sense_radius(mut self, radius: f32) -> Self {
        self.sense_radius = radius;
        self
    }

    pub fn with_pair_interval(mut self, interval: f32) -> Self {
        self.pair_interval = Some(interval);
        self
    }

    pub fn with_faint_recovery(mut self, seconds: f32) -> Self {
        self.faint_recovery = Some(seconds);
        self
    }

    pub fn rallying(mut self) -> Self {
        self.rallies = true;
        self
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self::new()
    }
}
