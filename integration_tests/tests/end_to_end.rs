mod common;

use worldgen_core::{
    generate_world, palette, regions::min_separation, Biome, Terrain, WorldGenConfig,
};

#[test]
fn eight_by_eight_world_with_four_regions() {
    common::init_tracing();
    let config = WorldGenConfig::default()
        .with_dimensions(8, 8)
        .with_seed(42)
        .with_regions(4);
    let world = generate_world(&config).expect("valid config");

    assert_eq!(world.seed, 42);
    assert_eq!(world.terrain.len(), 64);
    assert!(world.terrain.values().iter().all(|t| Terrain::ALL.contains(t)));

    let assignments = world.regions.assignments();
    assert_eq!(assignments.len(), 64);
    assert!(assignments.values().iter().all(|&id| id < 4));

    assert_eq!(world.regions.len(), 4);
    assert_eq!(world.regions.regions().iter().map(|r| r.area).sum::<u32>(), 64);
    assert_eq!(world.metrics.seeds_placed, 4);
    assert_eq!(world.metrics.seeds_requested, 4);
}

#[test]
fn regions_cover_grid_and_match_members() {
    let config = WorldGenConfig::default()
        .with_dimensions(40, 28)
        .with_seed(1234)
        .with_regions(7);
    let world = generate_world(&config).expect("valid config");
    let map = &world.regions;

    for region in map.regions() {
        let expected: Vec<_> = map
            .assignments()
            .iter()
            .filter(|(_, &id)| id == region.id)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(region.tiles, expected);
        assert_eq!(region.area as usize, expected.len());
        assert!(region.centroid.x < 40 && region.centroid.y < 28);
        assert_eq!(region.biome_counts.iter().sum::<u32>(), region.area);
        if region.area == 0 {
            assert_eq!(region.centroid, region.seed);
            assert_eq!(region.dominant_biome, None);
        } else {
            let dominant = region.dominant_biome.expect("non-empty region has a dominant biome");
            let top = region.biome_counts.iter().max().copied().unwrap_or(0);
            assert_eq!(region.biome_counts[dominant.index()], top);
            let first_top = Biome::ALL
                .into_iter()
                .find(|b| region.biome_counts[b.index()] == top);
            assert_eq!(Some(dominant), first_top);
        }
    }
}

#[test]
fn accepted_seeds_keep_their_distance() {
    for seed in [3u64, 17, 256, 9001] {
        let config = WorldGenConfig::default()
            .with_dimensions(50, 30)
            .with_seed(seed)
            .with_regions(6);
        let world = generate_world(&config).expect("valid config");
        let separation = min_separation(50, 30, 6);
        assert_eq!(world.regions.min_separation(), separation);
        let seeds = world.regions.seeds();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert!(a.manhattan(*b) >= separation);
            }
        }
    }
}

#[test]
fn single_column_world_is_flat_and_valid() {
    let config = WorldGenConfig::default()
        .with_dimensions(1, 10)
        .with_seed(5)
        .with_regions(2);
    let world = generate_world(&config).expect("valid config");
    assert!(world.elevation.values().iter().all(|&v| v == 0.5));
    // elevation 0.5 and moisture 0.5 classify as lowland grassland
    assert!(world.biomes.values().iter().all(|&b| b == Biome::Grassland));
    assert_eq!(world.regions.regions().iter().map(|r| r.area).sum::<u32>(), 10);
}

#[test]
fn renderer_palettes_cover_every_label() {
    let world = generate_world(
        &WorldGenConfig::default()
            .with_dimensions(16, 16)
            .with_seed(8),
    )
    .expect("valid config");
    for terrain in world.terrain.values() {
        assert_ne!(palette::terrain_color(*terrain), palette::ERROR_COLOR);
        assert_eq!(
            palette::terrain_color_by_name(terrain.as_str()),
            palette::terrain_color(*terrain)
        );
    }
    for biome in world.biomes.values() {
        assert_ne!(palette::biome_color(*biome), palette::ERROR_COLOR);
    }
    let boundaries = world.regions.boundary_mask();
    assert_eq!(boundaries.len(), 256);
}
