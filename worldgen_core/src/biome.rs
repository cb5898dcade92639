use std::{fmt, str::FromStr};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{error::WorldGenError, grid::Grid, noise::ScalarField};

/// Climate classification of a cell.
///
/// Declaration order is the stable enumeration order used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Biome {
    Ocean = 0,
    Desert = 1,
    Swamp = 2,
    Grassland = 3,
    Forest = 4,
    Steppe = 5,
    Mountain = 6,
    Snow = 7,
}

impl Biome {
    pub const COUNT: usize = 8;
    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::Ocean,
        Biome::Desert,
        Biome::Swamp,
        Biome::Grassland,
        Biome::Forest,
        Biome::Steppe,
        Biome::Mountain,
        Biome::Snow,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::Desert => "desert",
            Biome::Swamp => "swamp",
            Biome::Grassland => "grassland",
            Biome::Forest => "forest",
            Biome::Steppe => "steppe",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
        }
    }

    /// First matching band wins: ocean below 0.2, alpine above 0.8, upland above 0.5,
    /// lowland otherwise.
    pub fn classify(elevation: f64, moisture: f64) -> Biome {
        if elevation < 0.2 {
            return Biome::Ocean;
        }
        if elevation > 0.8 {
            return if moisture > 0.5 {
                Biome::Snow
            } else {
                Biome::Mountain
            };
        }
        if elevation > 0.5 {
            return if moisture > 0.7 {
                Biome::Forest
            } else if moisture > 0.4 {
                Biome::Grassland
            } else {
                Biome::Steppe
            };
        }
        if moisture > 0.7 {
            Biome::Swamp
        } else if moisture > 0.4 {
            Biome::Grassland
        } else {
            Biome::Desert
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label `{}`", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Biome {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::ALL
            .into_iter()
            .find(|biome| biome.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Per-biome tally indexed by [`Biome::index`].
pub type BiomeCounts = [u32; Biome::COUNT];

/// Classifies every cell of two equally sized fields.
///
/// Runs on the rayon pool; output order follows the grid index.
pub fn classify_biomes(
    elevation: &ScalarField,
    moisture: &ScalarField,
) -> Result<Grid<Biome>, WorldGenError> {
    elevation.ensure_same_shape(moisture)?;
    let cells: Vec<Biome> = elevation
        .values()
        .par_iter()
        .zip(moisture.values().par_iter())
        .map(|(&e, &m)| Biome::classify(e, m))
        .collect();
    let biomes = Grid::from_vec(elevation.width(), elevation.height(), cells)?;
    tracing::debug!(
        target: "worldgen::biome",
        width = biomes.width(),
        height = biomes.height(),
        "biome.classified"
    );
    Ok(biomes)
}

pub fn count_biomes(biomes: &Grid<Biome>) -> BiomeCounts {
    let mut counts = [0u32; Biome::COUNT];
    for biome in biomes.values() {
        counts[biome.index()] += 1;
    }
    counts
}
