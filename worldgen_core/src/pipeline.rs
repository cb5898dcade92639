use std::hash::Hasher;

use bevy_ecs::prelude::Resource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    biome::{classify_biomes, Biome},
    config::WorldGenConfig,
    error::WorldGenError,
    grid::Grid,
    hashing::FnvHasher,
    metrics::GenerationMetrics,
    noise::{generate_noise_field, ScalarField},
    regions::{partition_regions, RegionMap},
    rules::apply_rule_passes,
    terrain::{terrain_from_elevation, Terrain, TerrainSource},
};

/// Salt mixed into the world seed for region seed placement.
const REGION_RNG_SALT: u64 = 0x4b5f_d2c3;

/// Every layer produced by one generation run. All grids share the same dimensions.
#[derive(Resource, Debug, Clone)]
pub struct GeneratedWorld {
    pub seed: u64,
    pub elevation: ScalarField,
    pub moisture: ScalarField,
    pub biomes: Grid<Biome>,
    pub terrain: Grid<Terrain>,
    pub regions: RegionMap,
    pub metrics: GenerationMetrics,
}

impl GeneratedWorld {
    pub fn width(&self) -> u32 {
        self.terrain.width()
    }

    pub fn height(&self) -> u32 {
        self.terrain.height()
    }

    /// FNV-1a over the biome, terrain and region grids.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FnvHasher::new();
        hasher.write_u32(self.width());
        hasher.write_u32(self.height());
        for biome in self.biomes.values() {
            hasher.write_u8(*biome as u8);
        }
        for terrain in self.terrain.values() {
            hasher.write_u8(*terrain as u8);
        }
        for id in self.regions.assignments().values() {
            hasher.write_u32(*id);
        }
        hasher.finish()
    }
}

/// Runs the whole pipeline: noise, biomes, terrain, rule passes, regions.
pub fn generate_world(config: &WorldGenConfig) -> Result<GeneratedWorld, WorldGenError> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let width = config.dimensions.width;
    let height = config.dimensions.height;

    let elevation = generate_noise_field(width, height, &config.elevation);
    let moisture = generate_noise_field(width, height, &config.moisture);
    let biomes = classify_biomes(&elevation, &moisture)?;

    let base_terrain = match config.terrain_source {
        TerrainSource::Biome => config.terrain_mapper().translate(&biomes),
        TerrainSource::Elevation => terrain_from_elevation(&elevation),
    };
    let rules = apply_rule_passes(base_terrain, config.rule_passes);

    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ REGION_RNG_SALT);
    let settings = config.region_settings();
    let regions = partition_regions(&biomes, &settings, &mut rng)?;

    let metrics = GenerationMetrics::collect(
        &biomes,
        &rules.terrain,
        rules.rewrites,
        &regions,
        settings.regions,
    );

    let world = GeneratedWorld {
        seed,
        elevation,
        moisture,
        biomes,
        terrain: rules.terrain,
        regions,
        metrics,
    };
    tracing::info!(
        target: "worldgen::pipeline",
        seed,
        width,
        height,
        regions = world.regions.len(),
        rule_rewrites = world.metrics.total_rewrites(),
        fingerprint = world.fingerprint(),
        "worldgen.generated"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TerrainRule;

    fn small_config() -> WorldGenConfig {
        WorldGenConfig::default()
            .with_dimensions(24, 16)
            .with_seed(42)
            .with_regions(4)
    }

    #[test]
    fn layers_share_dimensions() {
        let world = generate_world(&small_config()).unwrap();
        assert_eq!((world.width(), world.height()), (24, 16));
        assert!(world.elevation.same_shape(&world.terrain));
        assert!(world.moisture.same_shape(&world.biomes));
        assert!(world.regions.assignments().same_shape(&world.terrain));
        assert_eq!(world.metrics.grid_size, (24, 16));
        assert_eq!(world.metrics.biome_counts.iter().sum::<u32>(), 24 * 16);
        assert_eq!(world.metrics.terrain_counts.iter().sum::<u32>(), 24 * 16);
    }

    #[test]
    fn same_seed_same_world() {
        let a = generate_world(&small_config()).unwrap();
        let b = generate_world(&small_config()).unwrap();
        assert_eq!(a.terrain, b.terrain);
        assert_eq!(a.biomes, b.biomes);
        assert_eq!(a.regions, b.regions);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn missing_seed_is_realised_and_replayable() {
        let mut config = small_config();
        config.seed = None;
        let first = generate_world(&config).unwrap();
        let replay = generate_world(&config.clone().with_seed(first.seed)).unwrap();
        assert_eq!(first.regions, replay.regions);
        assert_eq!(first.fingerprint(), replay.fingerprint());
    }

    #[test]
    fn zero_height_fails_fast() {
        let config = WorldGenConfig::default().with_dimensions(8, 0);
        let err = generate_world(&config).unwrap_err();
        assert!(matches!(err, WorldGenError::InvalidParameter { name: "height", .. }));
    }

    #[test]
    fn zero_rule_passes_keeps_mapped_terrain() {
        let mut config = small_config();
        config.rule_passes = 0;
        let world = generate_world(&config).unwrap();
        let mapped = config.terrain_mapper().translate(&world.biomes);
        assert_eq!(world.terrain, mapped);
        assert_eq!(world.metrics.total_rewrites(), 0);
    }

    #[test]
    fn elevation_source_uses_threshold_bands() {
        let mut config = small_config();
        config.terrain_source = TerrainSource::Elevation;
        config.rule_passes = 0;
        let world = generate_world(&config).unwrap();
        assert_eq!(world.terrain, terrain_from_elevation(&world.elevation));
    }

    #[test]
    fn rewrite_metrics_match_rule_pass() {
        let world = generate_world(&small_config()).unwrap();
        let mapped = small_config().terrain_mapper().translate(&world.biomes);
        let changed = mapped
            .values()
            .iter()
            .zip(world.terrain.values())
            .filter(|(a, b)| a != b)
            .count() as u32;
        let by_rule: u32 = TerrainRule::ORDER
            .iter()
            .map(|rule| world.metrics.rewrites_for(*rule))
            .sum();
        assert_eq!(by_rule, changed);
    }
}
