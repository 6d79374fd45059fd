//! Built-in species used when no catalog file is given.

use creature_core::SpeciesConfig;

use crate::catalog::{Species, SpeciesCatalog, SpeciesKind};

pub fn wolf() -> Species {
    Species::new(
        "wolf",
        SpeciesKind::Predator,
        SpeciesConfig::new()
            .attacking()
            .rallying()
            .with_speed(4.0)
            .with_sense_radius(14.0),
    )
}

pub fn deer() -> Species {
    Species::new(
        "deer",
        SpeciesKind::Grazer,
        SpeciesConfig::new()
            .with_speed(3.5)
            .with_pair_interval(20.0)
            .with_faint_recovery(4.0),
    )
}

pub fn hound() -> Species {
    Species::new(
        "hound",
        SpeciesKind::Companion,
        SpeciesConfig::new()
            .attacking()
            .tameable()
            .with_speed(4.5)
            .with_faint_recovery(6.0),
    )
}

impl SpeciesCatalog {
    pub fn builtin() -> Self {
        [wolf(), deer(), hound()].into_iter().collect()
    }
}
