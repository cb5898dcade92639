//! Generation parameters, loaded from `worldgen_config.json` with an environment override.

use std::{
    collections::HashMap,
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use bevy_ecs::prelude::Resource;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    biome::Biome,
    error::WorldGenError,
    noise::NoiseParams,
    regions::{default_biome_weights, BiomeWeights, RegionSettings, DEFAULT_BIOME_WEIGHT},
    terrain::{default_terrain_table, Terrain, TerrainMapper, TerrainSource},
};

pub const BUILTIN_WORLDGEN_CONFIG: &str = include_str!("data/worldgen_config.json");

/// Environment variable naming a JSON file that replaces the builtin config.
pub const CONFIG_PATH_ENV: &str = "WORLDGEN_CONFIG_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub dimensions: Dimensions,
    /// Drawn from entropy when absent; the realised value is reported on the generated world.
    pub seed: Option<u64>,
    pub regions: u32,
    pub elevation: NoiseParams,
    pub moisture: NoiseParams,
    pub terrain_source: TerrainSource,
    pub rule_passes: u32,
    pub smoothing_passes: u32,
    pub seed_attempts_per_region: u32,
    pub biome_weights: HashMap<Biome, f32>,
    pub default_biome_weight: f32,
    pub terrain_table: HashMap<Biome, Terrain>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            seed: None,
            regions: 8,
            elevation: NoiseParams::ELEVATION,
            moisture: NoiseParams::MOISTURE,
            terrain_source: TerrainSource::Biome,
            rule_passes: 1,
            smoothing_passes: 2,
            seed_attempts_per_region: 100,
            biome_weights: default_biome_weights(),
            default_biome_weight: DEFAULT_BIOME_WEIGHT,
            terrain_table: default_terrain_table(),
        }
    }
}

impl WorldGenConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_WORLDGEN_CONFIG)
                .expect("builtin worldgen config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, WorldGenConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| WorldGenConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let config = WorldGenConfig::from_json_str(&contents)?;
        Ok(config)
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Dimensions { width, height };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_regions(mut self, regions: u32) -> Self {
        self.regions = regions;
        self
    }

    /// Rejects parameters that would make generation meaningless, before anything is allocated.
    pub fn validate(&self) -> Result<(), WorldGenError> {
        if self.dimensions.width == 0 {
            return Err(WorldGenError::invalid("width", "must be at least 1"));
        }
        if self.dimensions.height == 0 {
            return Err(WorldGenError::invalid("height", "must be at least 1"));
        }
        if self.regions == 0 {
            return Err(WorldGenError::invalid("regions", "must be at least 1"));
        }
        if self.seed_attempts_per_region == 0 {
            return Err(WorldGenError::invalid(
                "seed_attempts_per_region",
                "must be at least 1",
            ));
        }
        self.elevation.validate("elevation")?;
        self.moisture.validate("moisture")?;
        let bad_weight = Biome::ALL
            .into_iter()
            .filter_map(|biome| Some((biome.as_str(), *self.biome_weights.get(&biome)?)))
            .chain(std::iter::once(("default", self.default_biome_weight)))
            .find(|(_, weight)| !weight.is_finite() || *weight <= 0.0);
        if let Some((label, weight)) = bad_weight {
            return Err(WorldGenError::invalid(
                "biome_weights",
                format!("weight for `{label}` must be positive and finite, got {weight}"),
            ));
        }
        Ok(())
    }

    pub fn terrain_mapper(&self) -> TerrainMapper {
        TerrainMapper::from_table(&self.terrain_table)
    }

    pub fn region_settings(&self) -> RegionSettings {
        RegionSettings {
            regions: self.regions,
            smoothing_passes: self.smoothing_passes,
            attempts_per_region: self.seed_attempts_per_region,
            weights: BiomeWeights::from_table(&self.biome_weights, self.default_biome_weight),
        }
    }
}

#[derive(Debug, Error)]
pub enum WorldGenConfigError {
    #[error("failed to parse worldgen config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read worldgen config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Resource, Debug, Clone)]
pub struct WorldGenConfigHandle(Arc<WorldGenConfig>);

impl WorldGenConfigHandle {
    pub fn new(config: Arc<WorldGenConfig>) -> Self {
        Self(config)
    }

    pub fn get(&self) -> Arc<WorldGenConfig> {
        self.0.clone()
    }
}

/// Loads the file named by [`CONFIG_PATH_ENV`], falling back to the builtin config.
///
/// Returns the path actually used, or `None` for the builtin.
pub fn load_config_from_env() -> (Arc<WorldGenConfig>, Option<PathBuf>) {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        match WorldGenConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!(
                    target: "worldgen::config",
                    path = %path.display(),
                    "worldgen_config.loaded=file"
                );
                return (Arc::new(config), Some(path));
            }
            Err(err) => {
                tracing::warn!(
                    target: "worldgen::config",
                    path = %path.display(),
                    error = %err,
                    "worldgen_config.load_failed"
                );
            }
        }
    }

    tracing::info!(target: "worldgen::config", "worldgen_config.loaded=builtin");
    (WorldGenConfig::builtin(), None)
}
