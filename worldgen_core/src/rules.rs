//! Local cleanup of incoherent terrain adjacencies.
//!
//! One pass reads a frozen copy of the grid and writes a fresh grid, so a cell rewritten early
//! in the pass is never seen by its neighbours until the next pass.

use rayon::prelude::*;

use crate::{
    grid::Grid,
    terrain::{Terrain, TerrainMask},
};

/// Neighbourhood as seen by a rule; `None` is past the grid edge and matches nothing.
pub type Neighborhood = [Option<Terrain>; 8];

/// Rewrite rules in evaluation order. A cell stops at the first rule that changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainRule {
    /// Mountain touching deep water erodes to forest.
    CoastalMountain,
    /// Grass mostly enclosed by sand becomes sand.
    SandSwallowsGrass,
    /// Shallow water mostly enclosed by land dries out. Sand stands in for a pond tile.
    LandlockedShallows,
    /// Forest with no grass or forest nearby thins to grass.
    IsolatedForest,
}

impl TerrainRule {
    pub const COUNT: usize = 4;
    pub const ORDER: [TerrainRule; TerrainRule::COUNT] = [
        TerrainRule::CoastalMountain,
        TerrainRule::SandSwallowsGrass,
        TerrainRule::LandlockedShallows,
        TerrainRule::IsolatedForest,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainRule::CoastalMountain => "coastal_mountain",
            TerrainRule::SandSwallowsGrass => "sand_swallows_grass",
            TerrainRule::LandlockedShallows => "landlocked_shallows",
            TerrainRule::IsolatedForest => "isolated_forest",
        }
    }

    /// New terrain for `cell`, or `None` when the rule leaves it alone.
    pub fn rewrite(self, cell: Terrain, neighbors: &Neighborhood) -> Option<Terrain> {
        let count = |mask: TerrainMask| neighbors.iter().filter(|n| mask.matches(**n)).count();
        let rewritten = match (self, cell) {
            (TerrainRule::CoastalMountain, Terrain::Mountain)
                if count(TerrainMask::DEEP_WATER) > 0 =>
            {
                Terrain::Forest
            }
            (TerrainRule::SandSwallowsGrass, Terrain::Grass) if count(TerrainMask::SAND) >= 5 => {
                Terrain::Sand
            }
            (TerrainRule::LandlockedShallows, Terrain::ShallowWater)
                if count(TerrainMask::GRASS | TerrainMask::SAND) >= 6 =>
            {
                Terrain::Sand
            }
            (TerrainRule::IsolatedForest, Terrain::Forest)
                if count(TerrainMask::GRASS | TerrainMask::FOREST) == 0 =>
            {
                Terrain::Grass
            }
            _ => return None,
        };
        (rewritten != cell).then_some(rewritten)
    }
}

/// Rewrites per rule, indexed by [`TerrainRule::index`].
pub type RuleCounts = [u32; TerrainRule::COUNT];

#[derive(Debug, Clone, PartialEq)]
pub struct RulePassOutcome {
    pub terrain: Grid<Terrain>,
    pub rewrites: RuleCounts,
}

impl RulePassOutcome {
    pub fn total_rewrites(&self) -> u32 {
        self.rewrites.iter().sum()
    }
}

/// Evaluates the ordered rules for one cell against the snapshot.
pub fn evaluate_cell(cell: Terrain, neighbors: &Neighborhood) -> Option<(Terrain, TerrainRule)> {
    TerrainRule::ORDER
        .into_iter()
        .find_map(|rule| rule.rewrite(cell, neighbors).map(|terrain| (terrain, rule)))
}

/// Runs exactly one synchronous pass over `snapshot`.
pub fn apply_rule_pass(snapshot: &Grid<Terrain>) -> RulePassOutcome {
    let width = snapshot.width() as usize;
    let (cells, fired): (Vec<Terrain>, Vec<Option<TerrainRule>>) = snapshot
        .values()
        .par_iter()
        .enumerate()
        .map(|(idx, &cell)| {
            let x = (idx % width) as u32;
            let y = (idx / width) as u32;
            match evaluate_cell(cell, &snapshot.moore_values(x, y)) {
                Some((terrain, rule)) => (terrain, Some(rule)),
                None => (cell, None),
            }
        })
        .unzip();

    let mut rewrites = [0u32; TerrainRule::COUNT];
    for rule in fired.into_iter().flatten() {
        rewrites[rule.index()] += 1;
    }
    let terrain = snapshot.with_cells(cells);
    tracing::debug!(
        target: "worldgen::rules",
        coastal_mountain = rewrites[TerrainRule::CoastalMountain.index()],
        sand_swallows_grass = rewrites[TerrainRule::SandSwallowsGrass.index()],
        landlocked_shallows = rewrites[TerrainRule::LandlockedShallows.index()],
        isolated_forest = rewrites[TerrainRule::IsolatedForest.index()],
        "rules.pass.applied"
    );
    RulePassOutcome { terrain, rewrites }
}

/// Runs `passes` passes, swapping buffers between them, and sums the rewrite counts.
pub fn apply_rule_passes(terrain: Grid<Terrain>, passes: u32) -> RulePassOutcome {
    let mut current = terrain;
    let mut totals = [0u32; TerrainRule::COUNT];
    for _ in 0..passes {
        let outcome = apply_rule_pass(&current);
        for (total, count) in totals.iter_mut().zip(outcome.rewrites) {
            *total += count;
        }
        current = outcome.terrain;
    }
    RulePassOutcome {
        terrain: current,
        rewrites: totals,
    }
}

/// One character per tile, rows separated by newlines.
pub fn render_ascii(terrain: &Grid<Terrain>) -> String {
    let mut out = String::with_capacity(terrain.len() + terrain.height() as usize);
    for y in 0..terrain.height() {
        for x in 0..terrain.width() {
            let glyph = match terrain.get(x, y) {
                Some(Terrain::DeepWater) => '~',
                Some(Terrain::ShallowWater) => '-',
                Some(Terrain::Sand) => '.',
                Some(Terrain::Grass) => '"',
                Some(Terrain::Forest) => 'T',
                Some(Terrain::Mountain) => '^',
                None => '?',
            };
            out.push(glyph);
        }
        if y + 1 < terrain.height() {
            out.push('\n');
        }
    }
    out
}
