//! Named species and the catalog holding them.

use creature_core::SpeciesConfig;

/// Which capability set drives a species.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpeciesKind {
    /// Hunts anything outside its team.
    Predator,
    /// Never fights; courts partners of its own species.
    Grazer,
    /// Tameable fighter that follows its owner.
    Companion,
}

/// A fully resolved species definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Species {
    pub name: String,
    pub kind: SpeciesKind,
    pub config: SpeciesConfig,
}

impl Species {
    pub fn new(name: impl Into<String>, kind: SpeciesKind, config: SpeciesConfig) -> Self {
        Self {
            name: name.into(),
            kind,
            config,
        }
    }
}

/// Species indexed by name, in definition order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeciesCatalog {
    species: Vec<Species>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the species with the same name.
    pub fn insert(&mut self, species: Species) {
        match self.species.iter_mut().find(|s| s.name == species.name) {
            Some(existing) => *existing = species,
            None => self.species.push(species),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Overlays `other` on top of this catalog.
    pub fn merge(&mut self, other: SpeciesCatalog) {
        for species in other.species {
            self.insert(species);
        }
    }
}

impl FromIterator<Species> for SpeciesCatalog {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for species in iter {
            catalog.insert(species);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("predator".parse::<SpeciesKind>(), Ok(SpeciesKind::Predator));
        assert_eq!("Companion".parse::<SpeciesKind>(), Ok(SpeciesKind::Companion));
        assert!("dragon".parse::<SpeciesKind>().is_err());
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut catalog = SpeciesCatalog::new();
        catalog.insert(Species::new("wolf", SpeciesKind::Predator, SpeciesConfig::new()));
        catalog.insert(Species::new(
            "wolf",
            SpeciesKind::Predator,
            SpeciesConfig::new().with_speed(9.0),
        ));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("wolf").map(|s| s.config.speed), Some(9.0));
    }
}
