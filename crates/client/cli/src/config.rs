//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// How long and how fast the simulation runs, and what it loads.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Frames per second of simulated time.
    pub tick_rate: u32,
    /// Number of frames to run before exiting.
    pub ticks: u64,
    /// Species catalog to load instead of the built-in presets.
    pub species_path: Option<PathBuf>,
    /// Seed for sandbox roaming.
    pub seed: u64,
    /// Directory for an additional log file.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20,
            ticks: 600,
            species_path: None,
            seed: 7,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CREATURE_SIM_TICK_RATE` - Frames per second (default: 20)
    /// - `CREATURE_SIM_TICKS` - Frames to run (default: 600)
    /// - `CREATURE_SIM_SPECIES` - TOML or RON species catalog (default: built-in presets)
    /// - `CREATURE_SIM_SEED` - Roaming seed (default: 7)
    /// - `CREATURE_SIM_LOG_DIR` - Also log to a file in this directory (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(rate) = parse::<u32>(&lookup, "CREATURE_SIM_TICK_RATE") {
            config.tick_rate = rate.max(1);
        }
        if let Some(ticks) = parse::<u64>(&lookup, "CREATURE_SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(seed) = parse::<u64>(&lookup, "CREATURE_SIM_SEED") {
            config.seed = seed;
        }
        config.species_path = lookup("CREATURE_SIM_SPECIES").map(PathBuf::from);
        config.log_dir = lookup("CREATURE_SIM_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Seconds of simulated time per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(SimConfig::from_lookup(|_| None), SimConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = SimConfig::from_lookup(|key| match key {
            "CREATURE_SIM_TICK_RATE" => Some("0".into()),
            "CREATURE_SIM_TICKS" => Some("50".into()),
            "CREATURE_SIM_SEED" => Some("not a number".into()),
            "CREATURE_SIM_SPECIES" => Some("data/species.toml".into()),
            _ => None,
        });

        assert_eq!(config.tick_rate, 1);
        assert_eq!(config.ticks, 50);
        assert_eq!(config.seed, SimConfig::default().seed);
        assert_eq!(config.species_path, Some(PathBuf::from("data/species.toml")));
        assert_eq!(config.dt(), 1.0);
    }
}
