use std::{collections::HashMap, fmt, str::FromStr};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{
    biome::{Biome, UnknownLabel},
    grid::Grid,
    noise::ScalarField,
};

/// Tile type handed to renderers and game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Terrain {
    DeepWater = 0,
    ShallowWater = 1,
    Sand = 2,
    Grass = 3,
    Forest = 4,
    Mountain = 5,
}

/// Terrain used when a biome has no entry in the mapping table.
pub const FALLBACK_TERRAIN: Terrain = Terrain::Grass;

bitflags! {
    /// Set of terrain labels, used by neighbourhood predicates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TerrainMask: u8 {
        const DEEP_WATER = 1 << 0;
        const SHALLOW_WATER = 1 << 1;
        const SAND = 1 << 2;
        const GRASS = 1 << 3;
        const FOREST = 1 << 4;
        const MOUNTAIN = 1 << 5;
    }
}

impl Terrain {
    pub const COUNT: usize = 6;
    pub const ALL: [Terrain; Terrain::COUNT] = [
        Terrain::DeepWater,
        Terrain::ShallowWater,
        Terrain::Sand,
        Terrain::Grass,
        Terrain::Forest,
        Terrain::Mountain,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn mask(self) -> TerrainMask {
        TerrainMask::from_bits_truncate(1 << (self as u8))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Terrain::DeepWater => "deep_water",
            Terrain::ShallowWater => "shallow_water",
            Terrain::Sand => "sand",
            Terrain::Grass => "grass",
            Terrain::Forest => "forest",
            Terrain::Mountain => "mountain",
        }
    }

    /// Direct threshold mapping from a normalised elevation value.
    pub fn from_elevation(value: f64) -> Terrain {
        if value < 0.2 {
            Terrain::DeepWater
        } else if value < 0.3 {
            Terrain::ShallowWater
        } else if value < 0.4 {
            Terrain::Sand
        } else if value < 0.7 {
            Terrain::Grass
        } else if value < 0.85 {
            Terrain::Forest
        } else {
            Terrain::Mountain
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::ALL
            .into_iter()
            .find(|terrain| terrain.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

impl TerrainMask {
    #[inline]
    pub fn matches(self, terrain: Option<Terrain>) -> bool {
        terrain.is_some_and(|t| self.contains(t.mask()))
    }
}

/// Per-terrain tally indexed by [`Terrain::index`].
pub type TerrainCounts = [u32; Terrain::COUNT];

/// How the base terrain grid is derived before rule passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainSource {
    /// Lookup through the biome table.
    #[default]
    Biome,
    /// Threshold bands over elevation alone.
    Elevation,
}

pub fn default_terrain_table() -> HashMap<Biome, Terrain> {
    HashMap::from([
        (Biome::Ocean, Terrain::DeepWater),
        (Biome::Swamp, Terrain::ShallowWater),
        (Biome::Desert, Terrain::Sand),
        (Biome::Forest, Terrain::Forest),
        (Biome::Grassland, Terrain::Grass),
        (Biome::Steppe, Terrain::Grass),
        (Biome::Mountain, Terrain::Mountain),
        (Biome::Snow, Terrain::Mountain),
    ])
}

/// Biome to terrain lookup. Biomes missing from the table resolve to [`FALLBACK_TERRAIN`].
#[derive(Debug, Clone)]
pub struct TerrainMapper {
    table: [Option<Terrain>; Biome::COUNT],
}

impl Default for TerrainMapper {
    fn default() -> Self {
        Self::from_table(&default_terrain_table())
    }
}

impl TerrainMapper {
    pub fn from_table(table: &HashMap<Biome, Terrain>) -> Self {
        let mut slots = [None; Biome::COUNT];
        for (biome, terrain) in table {
            slots[biome.index()] = Some(*terrain);
        }
        Self { table: slots }
    }

    #[inline]
    pub fn terrain_for(&self, biome: Biome) -> Terrain {
        self.table[biome.index()].unwrap_or(FALLBACK_TERRAIN)
    }

    pub fn translate(&self, biomes: &Grid<Biome>) -> Grid<Terrain> {
        biomes.map(|&biome| self.terrain_for(biome))
    }
}

pub fn terrain_from_elevation(elevation: &ScalarField) -> Grid<Terrain> {
    elevation.map(|&value| Terrain::from_elevation(value))
}

pub fn count_terrain(terrain: &Grid<Terrain>) -> TerrainCounts {
    let mut counts = [0u32; Terrain::COUNT];
    for tile in terrain.values() {
        counts[tile.index()] += 1;
    }
    counts
}
