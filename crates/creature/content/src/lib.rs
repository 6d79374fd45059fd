//! Data-driven species definitions and loaders.
//!
//! A species is a [`SpeciesKind`] (which capability set the runtime plugs
//! into the creature's brain) plus a [`SpeciesConfig`] (its tuning). Species
//! are read from TOML or RON catalogs, or taken from the built-in presets.
//!
//! Content is consumed when creatures spawn and never appears in decision state.

pub mod catalog;
pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Species, SpeciesCatalog, SpeciesKind};
pub use creature_core::SpeciesConfig;

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, SpeciesLoader, SpeciesSpec};
