//! Colour tables shared with renderers. Labels stay free of presentation data; colours are
//! looked up here.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::{biome::Biome, regions::RegionId, terrain::Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Drawn for labels a renderer does not recognise.
pub const ERROR_COLOR: Rgb = Rgb(255, 0, 255);

pub fn biome_color(biome: Biome) -> Rgb {
    match biome {
        Biome::Ocean => Rgb(0, 0, 139),
        Biome::Desert => Rgb(238, 214, 175),
        Biome::Swamp => Rgb(0, 100, 0),
        Biome::Grassland => Rgb(34, 139, 34),
        Biome::Forest => Rgb(0, 100, 0),
        Biome::Steppe => Rgb(152, 251, 152),
        Biome::Mountain => Rgb(139, 137, 137),
        Biome::Snow => Rgb(255, 250, 250),
    }
}

pub fn terrain_color(terrain: Terrain) -> Rgb {
    match terrain {
        Terrain::DeepWater => Rgb(0, 0, 128),
        Terrain::ShallowWater => Rgb(0, 128, 192),
        Terrain::Sand => Rgb(237, 201, 175),
        Terrain::Grass => Rgb(34, 139, 34),
        Terrain::Forest => Rgb(0, 100, 0),
        Terrain::Mountain => Rgb(169, 169, 169),
    }
}

/// Colour for a terrain name as stored by external tools; unknown names get [`ERROR_COLOR`].
pub fn terrain_color_by_name(name: &str) -> Rgb {
    name.parse::<Terrain>()
        .map(terrain_color)
        .unwrap_or(ERROR_COLOR)
}

/// Stable per-region fill colour with each channel in `[50, 200]`.
pub fn region_color(world_seed: u64, region: RegionId) -> Rgb {
    let mut rng = ChaCha8Rng::seed_from_u64(world_seed.wrapping_add(region as u64));
    Rgb(
        rng.gen_range(50..=200),
        rng.gen_range(50..=200),
        rng.gen_range(50..=200),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_palette_differs_from_biome_palette() {
        assert_eq!(biome_color(Biome::Ocean), Rgb(0, 0, 139));
        assert_eq!(terrain_color(Terrain::DeepWater), Rgb(0, 0, 128));
        assert_eq!(terrain_color(Terrain::Mountain), Rgb(169, 169, 169));
        assert_ne!(biome_color(Biome::Mountain), terrain_color(Terrain::Mountain));
    }

    #[test]
    fn unknown_terrain_name_is_magenta() {
        assert_eq!(terrain_color_by_name("sand"), Rgb(237, 201, 175));
        assert_eq!(terrain_color_by_name("dirt"), ERROR_COLOR);
        assert_eq!(terrain_color_by_name(""), ERROR_COLOR);
    }

    #[test]
    fn region_colors_are_stable_and_bounded() {
        for id in 0..16 {
            let a = region_color(1234, id);
            assert_eq!(a, region_color(1234, id));
            for channel in [a.0, a.1, a.2] {
                assert!((50..=200).contains(&channel));
            }
        }
    }
}
