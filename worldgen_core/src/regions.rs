use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::{
    biome::{Biome, BiomeCounts},
    error::WorldGenError,
    grid::{Grid, GridPos},
};

pub type RegionId = u32;

/// Weight for biomes absent from the weight table.
pub const DEFAULT_BIOME_WEIGHT: f32 = 0.5;

pub fn default_biome_weights() -> HashMap<Biome, f32> {
    HashMap::from([
        (Biome::Ocean, 0.1),
        (Biome::Swamp, 0.4),
        (Biome::Desert, 0.6),
        (Biome::Grassland, 1.0),
        (Biome::Forest, 1.2),
        (Biome::Mountain, 0.2),
        (Biome::Snow, 0.4),
    ])
}

/// Relative likelihood of a biome hosting a region seed.
#[derive(Debug, Clone)]
pub struct BiomeWeights {
    table: [Option<f32>; Biome::COUNT],
    fallback: f32,
}

impl Default for BiomeWeights {
    fn default() -> Self {
        Self::from_table(&default_biome_weights(), DEFAULT_BIOME_WEIGHT)
    }
}

impl BiomeWeights {
    pub fn from_table(table: &HashMap<Biome, f32>, fallback: f32) -> Self {
        let mut slots = [None; Biome::COUNT];
        for (biome, weight) in table {
            slots[biome.index()] = Some(*weight);
        }
        Self {
            table: slots,
            fallback,
        }
    }

    #[inline]
    pub fn weight_for(&self, biome: Biome) -> f64 {
        self.table[biome.index()].unwrap_or(self.fallback) as f64
    }
}

/// Per-run knobs for [`partition_regions`].
#[derive(Debug, Clone)]
pub struct RegionSettings {
    pub regions: u32,
    pub smoothing_passes: u32,
    pub attempts_per_region: u32,
    pub weights: BiomeWeights,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            regions: 8,
            smoothing_passes: 2,
            attempts_per_region: 100,
            weights: BiomeWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub seed: GridPos,
    pub area: u32,
    /// Member cells in row-major order.
    pub tiles: Vec<GridPos>,
    pub biome_counts: BiomeCounts,
    /// `None` only for regions left without cells after smoothing.
    pub dominant_biome: Option<Biome>,
    pub centroid: GridPos,
}

impl Region {
    fn empty(id: RegionId, seed: GridPos) -> Self {
        Self {
            id,
            seed,
            area: 0,
            tiles: Vec::new(),
            biome_counts: [0; Biome::COUNT],
            dominant_biome: None,
            centroid: seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedPlacement {
    pub seeds: Vec<GridPos>,
    pub min_separation: u32,
    pub attempts: u32,
}

/// `floor(sqrt(cells / (2 * regions)))`, measured in Manhattan distance.
pub fn min_separation(width: u32, height: u32, regions: u32) -> u32 {
    if regions == 0 {
        return 0;
    }
    let cells = width as f64 * height as f64;
    (cells / (regions as f64 * 2.0)).sqrt().floor() as u32
}

/// Draws up to `requested` seeds, each with probability proportional to its biome weight among
/// cells still at least `separation` away from every accepted seed.
///
/// Eligibility lives in a fixed mask over the grid so removal never reshapes the pool while it
/// is scanned. Stops after `requested * attempts_per_region` draws or when nothing is eligible.
pub fn select_seed_points<R: Rng>(
    biomes: &Grid<Biome>,
    requested: u32,
    separation: u32,
    weights: &BiomeWeights,
    attempts_per_region: u32,
    rng: &mut R,
) -> SeedPlacement {
    let cell_weights: Vec<f64> = biomes
        .values()
        .iter()
        .map(|&biome| weights.weight_for(biome).max(0.0))
        .collect();
    let mut eligible = vec![true; biomes.len()];
    let mut seeds: Vec<GridPos> = Vec::with_capacity(requested as usize);
    let max_attempts = requested.saturating_mul(attempts_per_region);
    let mut attempts = 0u32;

    while (seeds.len() as u32) < requested && attempts < max_attempts {
        let total_weight: f64 = eligible
            .iter()
            .zip(&cell_weights)
            .filter(|(open, _)| **open)
            .map(|(_, w)| *w)
            .sum();
        if total_weight <= 0.0 {
            break;
        }
        attempts += 1;
        let target = rng.gen_range(0.0..total_weight);
        let Some(chosen) = pick_weighted(&eligible, &cell_weights, target) else {
            break;
        };

        let pos = biomes.position_of(chosen);
        debug_assert!(seeds.iter().all(|s| s.manhattan(pos) >= separation));
        seeds.push(pos);
        eligible[chosen] = false;
        for (idx, open) in eligible.iter_mut().enumerate() {
            if *open && biomes.position_of(idx).manhattan(pos) < separation {
                *open = false;
            }
        }
    }

    SeedPlacement {
        seeds,
        min_separation: separation,
        attempts,
    }
}

fn pick_weighted(eligible: &[bool], weights: &[f64], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last = None;
    for (idx, (&open, &weight)) in eligible.iter().zip(weights).enumerate() {
        if !open || weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last = Some(idx);
        if target < cumulative {
            return Some(idx);
        }
    }
    // rounding can leave target just past the final cumulative sum
    last
}

/// Assigns each cell to its nearest seed by Manhattan distance; ties go to the lower seed index.
///
/// Returns the assignment and the per-region cell counts before smoothing. Member cells and
/// biome counts are only built by [`finalize_regions`] once smoothing is done.
pub fn assign_to_nearest(width: u32, height: u32, seeds: &[GridPos]) -> (Grid<RegionId>, Vec<u32>) {
    let mut areas = vec![0u32; seeds.len()];
    let grid = Grid::from_fn(width, height, |x, y| {
        let here = GridPos::new(x, y);
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (idx, seed) in seeds.iter().enumerate() {
            let dist = here.manhattan(*seed);
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        if let Some(area) = areas.get_mut(best) {
            *area += 1;
        }
        best as RegionId
    });
    (grid, areas)
}

/// Majority of the in-bounds neighbours in scan order; ties go to the id seen first.
fn majority_neighbor(snapshot: &Grid<RegionId>, x: u32, y: u32) -> Option<RegionId> {
    let mut tally: Vec<(RegionId, u8)> = Vec::with_capacity(8);
    for id in snapshot.moore_values(x, y).into_iter().flatten() {
        match tally.iter_mut().find(|(seen, _)| *seen == id) {
            Some((_, count)) => *count += 1,
            None => tally.push((id, 1)),
        }
    }
    let mut best: Option<(RegionId, u8)> = None;
    for (id, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}

/// Runs `passes` majority-vote passes, each reading a frozen copy and writing a new grid.
///
/// Returns the smoothed grid and how many cell updates changed an id across all passes.
pub fn smooth_assignments(assignments: Grid<RegionId>, passes: u32) -> (Grid<RegionId>, u32) {
    let mut current = assignments;
    let mut changed = 0u32;
    for _ in 0..passes {
        let next = Grid::from_fn(current.width(), current.height(), |x, y| {
            let own = current.get(x, y).copied().unwrap_or_default();
            majority_neighbor(&current, x, y).unwrap_or(own)
        });
        changed += next
            .values()
            .iter()
            .zip(current.values())
            .filter(|(a, b)| a != b)
            .count() as u32;
        current = next;
    }
    (current, changed)
}

/// Builds region records from a final assignment.
///
/// Dominant biome ties go to the earlier [`Biome::ALL`] entry. Regions with no cells keep their
/// seed as centroid and report area 0.
pub fn finalize_regions(
    assignments: &Grid<RegionId>,
    biomes: &Grid<Biome>,
    seeds: &[GridPos],
) -> Result<Vec<Region>, WorldGenError> {
    assignments.ensure_same_shape(biomes)?;
    let mut regions: Vec<Region> = seeds
        .iter()
        .enumerate()
        .map(|(id, &seed)| Region::empty(id as RegionId, seed))
        .collect();
    let mut sums = vec![(0u64, 0u64); seeds.len()];

    for ((pos, &id), &biome) in assignments.iter().zip(biomes.values()) {
        let Some(region) = regions.get_mut(id as usize) else {
            continue;
        };
        region.area += 1;
        region.tiles.push(pos);
        region.biome_counts[biome.index()] += 1;
        let sum = &mut sums[id as usize];
        sum.0 += pos.x as u64;
        sum.1 += pos.y as u64;
    }

    for (region, (sum_x, sum_y)) in regions.iter_mut().zip(sums) {
        if region.area == 0 {
            continue;
        }
        let area = region.area as u64;
        region.centroid = GridPos::new((sum_x / area) as u32, (sum_y / area) as u32);
        let mut dominant = Biome::ALL[0];
        for biome in Biome::ALL {
            if region.biome_counts[biome.index()] > region.biome_counts[dominant.index()] {
                dominant = biome;
            }
        }
        region.dominant_biome = Some(dominant);
    }
    Ok(regions)
}

/// Region partition of a world plus the data used to build it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMap {
    assignments: Grid<RegionId>,
    regions: Vec<Region>,
    placement: SeedPlacement,
    unsmoothed_areas: Vec<u32>,
    smoothing_changes: u32,
}

/// Seeds, assigns, smooths and summarises regions over `biomes`.
pub fn partition_regions<R: Rng>(
    biomes: &Grid<Biome>,
    settings: &RegionSettings,
    rng: &mut R,
) -> Result<RegionMap, WorldGenError> {
    if settings.regions == 0 {
        return Err(WorldGenError::invalid("regions", "must be at least 1"));
    }
    if biomes.is_empty() {
        return Err(WorldGenError::invalid("dimensions", "grid has no cells"));
    }

    let separation = min_separation(biomes.width(), biomes.height(), settings.regions);
    let placement = select_seed_points(
        biomes,
        settings.regions,
        separation,
        &settings.weights,
        settings.attempts_per_region,
        rng,
    );
    if placement.seeds.is_empty() {
        return Err(WorldGenError::invalid(
            "biome_weights",
            "no cell carries a positive seed weight",
        ));
    }
    tracing::debug!(
        target: "worldgen::regions",
        requested = settings.regions,
        placed = placement.seeds.len(),
        min_separation = placement.min_separation,
        attempts = placement.attempts,
        "regions.seeds.placed"
    );
    if (placement.seeds.len() as u32) < settings.regions {
        tracing::warn!(
            target: "worldgen::regions",
            requested = settings.regions,
            placed = placement.seeds.len(),
            "regions.seeds.shortfall"
        );
    }

    let (assigned, unsmoothed_areas) =
        assign_to_nearest(biomes.width(), biomes.height(), &placement.seeds);
    let (assignments, smoothing_changes) =
        smooth_assignments(assigned, settings.smoothing_passes);
    let regions = finalize_regions(&assignments, biomes, &placement.seeds)?;
    tracing::debug!(
        target: "worldgen::regions",
        passes = settings.smoothing_passes,
        changed = smoothing_changes,
        empty = regions.iter().filter(|r| r.area == 0).count(),
        "regions.smoothed"
    );

    Ok(RegionMap {
        assignments,
        regions,
        placement,
        unsmoothed_areas,
        smoothing_changes,
    })
}

impl RegionMap {
    pub fn assignments(&self) -> &Grid<RegionId> {
        &self.assignments
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id as usize)
    }

    pub fn region_at(&self, x: u32, y: u32) -> Option<&Region> {
        self.assignments.get(x, y).and_then(|&id| self.region(id))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn seeds(&self) -> &[GridPos] {
        &self.placement.seeds
    }

    pub fn min_separation(&self) -> u32 {
        self.placement.min_separation
    }

    pub fn seed_attempts(&self) -> u32 {
        self.placement.attempts
    }

    /// Cell counts straight after nearest-seed assignment, before smoothing.
    ///
    /// Only areas are kept from that step; tiles, biome counts and centroids on [`Region`]
    /// describe the smoothed assignment.
    pub fn unsmoothed_areas(&self) -> &[u32] {
        &self.unsmoothed_areas
    }

    pub fn smoothing_changes(&self) -> u32 {
        self.smoothing_changes
    }

    /// True when any in-bounds neighbour belongs to another region.
    pub fn is_boundary(&self, x: u32, y: u32) -> bool {
        let Some(&own) = self.assignments.get(x, y) else {
            return false;
        };
        self.assignments
            .moore_values(x, y)
            .into_iter()
            .flatten()
            .any(|id| id != own)
    }

    pub fn boundary_mask(&self) -> Grid<bool> {
        Grid::from_fn(self.assignments.width(), self.assignments.height(), |x, y| {
            self.is_boundary(x, y)
        })
    }
}
