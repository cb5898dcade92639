//! Deterministic 2D tile world generation.
//!
//! [`generate_world`] turns a [`WorldGenConfig`] into elevation and moisture fields, a biome
//! grid, a rule-smoothed terrain grid and a region partition with per-region statistics.
//! Identical seed and parameters always give identical grids.

pub mod biome;
pub mod config;
mod error;
pub mod grid;
mod hashing;
pub mod metrics;
pub mod noise;
pub mod palette;
mod pipeline;
pub mod regions;
pub mod rules;
pub mod terrain;

pub use biome::{classify_biomes, Biome, BiomeCounts, UnknownLabel};
pub use config::{
    load_config_from_env, Dimensions, WorldGenConfig, WorldGenConfigError, WorldGenConfigHandle,
};
pub use error::WorldGenError;
pub use grid::{Grid, GridPos};
pub use hashing::FnvHasher;
pub use metrics::GenerationMetrics;
pub use noise::{generate_noise_field, NoiseParams, ScalarField};
pub use palette::Rgb;
pub use pipeline::{generate_world, GeneratedWorld};
pub use regions::{partition_regions, Region, RegionId, RegionMap, RegionSettings};
pub use rules::{apply_rule_pass, apply_rule_passes, RulePassOutcome, TerrainRule};
pub use terrain::{Terrain, TerrainMapper, TerrainSource};
