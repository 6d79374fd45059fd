//! Species catalog loaders.
//!
//! Catalogs come in two formats:
//!
//! TOML, one `[[species]]` table per species:
//! ```toml
//! [[species]]
//! name = "wolf"
//! kind = "predator"
//!
//! [species.config]
//! can_attack = true
//! rallies = true
//! ```
//!
//! RON, a `Vec<SpeciesSpec>`:
//! ```ron
//! [(name: "wolf", kind: "predator", config: (can_attack: true, rallies: true))]
//! ```
//!
//! Missing config fields take their defaults.

mod species;

pub use species::{SpeciesLoader, SpeciesSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
