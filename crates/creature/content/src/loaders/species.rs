use std::path::Path;

use creature_core::SpeciesConfig;

use crate::catalog::{Species, SpeciesCatalog, SpeciesKind};
use crate::loaders::{LoadResult, read_file};

/// Raw species entry as written in a catalog file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpeciesSpec {
    pub name: String,
    /// Resolved against [`SpeciesKind`] by name.
    pub kind: String,
    #[serde(default)]
    pub config: SpeciesConfig,
}

impl SpeciesSpec {
    fn resolve(self) -> LoadResult<Species> {
        let kind: SpeciesKind = self.kind.parse().map_err(|_| {
            anyhow::anyhow!(
                "Failed to resolve kind '{}' for species '{}': unknown kind",
                self.kind,
                self.name
            )
        })?;
        validate(&self.name, &self.config)?;
        Ok(Species::new(self.name, kind, self.config))
    }
}

#[derive(serde::Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    species: Vec<SpeciesSpec>,
}

fn validate(name: &str, config: &SpeciesConfig) -> LoadResult<()> {
    if name.is_empty() {
        anyhow::bail!("Species name must not be empty");
    }
    if config.speed.is_nan() || config.speed <= 0.0 {
        anyhow::bail!("Species '{}' must have a positive speed", name);
    }
    if config.scan_interval.is_nan() || config.scan_interval <= 0.0 {
        anyhow::bail!("Species '{}' must have a positive scan interval", name);
    }
    Ok(())
}

fn resolve_all(specs: Vec<SpeciesSpec>) -> LoadResult<SpeciesCatalog> {
    let mut catalog = SpeciesCatalog::new();
    for spec in specs {
        if catalog.get(&spec.name).is_some() {
            anyhow::bail!("Species '{}' is defined twice", spec.name);
        }
        catalog.insert(spec.resolve()?);
    }
    Ok(catalog)
}

/// Loader for species catalogs.
pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Loads a catalog, picking the format from the file extension.
    pub fn load(path: &Path) -> LoadResult<SpeciesCatalog> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::load_toml(path),
            Some("ron") => Self::load_ron(path),
            _ => anyhow::bail!(
                "Unsupported species catalog {}: expected .toml or .ron",
                path.display()
            ),
        }
    }

    pub fn load_toml(path: &Path) -> LoadResult<SpeciesCatalog> {
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }

    pub fn load_ron(path: &Path) -> LoadResult<SpeciesCatalog> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<SpeciesCatalog> {
        let raw: TomlCatalog = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species TOML: {}", e))?;
        resolve_all(raw.species)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<SpeciesCatalog> {
        let raw: Vec<SpeciesSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species RON: {}", e))?;
        resolve_all(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML: &str = r#"
[[species]]
name = "wolf"
kind = "predator"

[species.config]
can_attack = true
rallies = true
speed = 4.0

[[species]]
name = "deer"
kind = "grazer"
"#;

    #[test]
    fn toml_catalog_fills_defaults() {
        let catalog = SpeciesLoader::from_toml_str(TOML).unwrap();
        let wolf = catalog.get("wolf").unwrap();
        assert_eq!(wolf.kind, SpeciesKind::Predator);
        assert!(wolf.config.can_attack && wolf.config.rallies);
        assert_eq!(wolf.config.speed, 4.0);
        assert_eq!(
            wolf.config.sense_radius,
            SpeciesConfig::DEFAULT_SENSE_RADIUS
        );
        assert_eq!(catalog.get("deer").unwrap().config, SpeciesConfig::new());
    }

    #[test]
    fn ron_catalog_from_file() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        writeln!(
            file,
            r#"[(name: "hound", kind: "companion", config: (can_attack: true, can_tame: true, faint_recovery: Some(5.0)))]"#
        )
        .unwrap();

        let catalog = SpeciesLoader::load(file.path()).unwrap();
        let hound = catalog.get("hound").unwrap();
        assert_eq!(hound.kind, SpeciesKind::Companion);
        assert!(hound.config.can_tame);
        assert_eq!(hound.config.faint_recovery, Some(5.0));
    }

    #[test]
    fn toml_file_round_trips_through_load() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML.as_bytes()).unwrap();
        assert_eq!(SpeciesLoader::load(file.path()).unwrap().len(), 2);
    }

    #[test]
    fn rejects_unknown_kind_and_duplicates() {
        let unknown = "[[species]]\nname = \"drake\"\nkind = \"dragon\"\n";
        let err = SpeciesLoader::from_toml_str(unknown).unwrap_err();
        assert!(err.to_string().contains("dragon"));

        let twice = format!("{TOML}\n[[species]]\nname = \"deer\"\nkind = \"grazer\"\n");
        assert!(SpeciesLoader::from_toml_str(&twice).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        let slow = "[[species]]\nname = \"rock\"\nkind = \"grazer\"\n[species.config]\nspeed = 0.0\n";
        assert!(SpeciesLoader::from_toml_str(slow).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        assert!(SpeciesLoader::load(file.path()).is_err());
    }
}
