use serde::Serialize;

use crate::{
    biome::{count_biomes, Biome, BiomeCounts},
    grid::Grid,
    regions::RegionMap,
    rules::{RuleCounts, TerrainRule},
    terrain::{count_terrain, Terrain, TerrainCounts},
};

/// Summary statistics of one generation run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GenerationMetrics {
    pub grid_size: (u32, u32),
    pub biome_counts: BiomeCounts,
    pub terrain_counts: TerrainCounts,
    /// Rewrites per rule summed over every rule pass.
    pub rule_rewrites: RuleCounts,
    pub seeds_requested: u32,
    pub seeds_placed: u32,
    pub seed_attempts: u32,
    pub smoothing_changes: u32,
    pub empty_regions: u32,
}

impl GenerationMetrics {
    pub fn collect(
        biomes: &Grid<Biome>,
        terrain: &Grid<Terrain>,
        rule_rewrites: RuleCounts,
        regions: &RegionMap,
        seeds_requested: u32,
    ) -> Self {
        Self {
            grid_size: (terrain.width(), terrain.height()),
            biome_counts: count_biomes(biomes),
            terrain_counts: count_terrain(terrain),
            rule_rewrites,
            seeds_requested,
            seeds_placed: regions.seeds().len() as u32,
            seed_attempts: regions.seed_attempts(),
            smoothing_changes: regions.smoothing_changes(),
            empty_regions: regions.regions().iter().filter(|r| r.area == 0).count() as u32,
        }
    }

    pub fn biome_count(&self, biome: Biome) -> u32 {
        self.biome_counts[biome.index()]
    }

    pub fn terrain_count(&self, terrain: Terrain) -> u32 {
        self.terrain_counts[terrain.index()]
    }

    pub fn rewrites_for(&self, rule: TerrainRule) -> u32 {
        self.rule_rewrites[rule.index()]
    }

    pub fn total_rewrites(&self) -> u32 {
        self.rule_rewrites.iter().sum()
    }
}
