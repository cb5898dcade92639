use serde::{Deserialize, Serialize};

use crate::{error::WorldGenError, grid::Grid};

/// Normalised scalar field in `[0, 1]`.
pub type ScalarField = Grid<f64>;

/// Value every cell takes when the summed field is flat.
pub const FLAT_FIELD_VALUE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    pub scale: f64,
    pub octaves: u32,
}

impl NoiseParams {
    pub const ELEVATION: NoiseParams = NoiseParams {
        scale: 4.0,
        octaves: 4,
    };
    pub const MOISTURE: NoiseParams = NoiseParams {
        scale: 3.0,
        octaves: 3,
    };

    pub fn validate(&self, name: &'static str) -> Result<(), WorldGenError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WorldGenError::invalid(
                name,
                format!("scale must be a positive finite number, got {}", self.scale),
            ));
        }
        if self.octaves == 0 {
            return Err(WorldGenError::invalid(name, "octaves must be at least 1"));
        }
        Ok(())
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::ELEVATION
    }
}

/// Sums `octaves` layers of `sin(x f) cos(y f) / f` with `f = 2^k` over evenly spaced
/// coordinates in `[0, scale]`, then rescales to `[0, 1]`.
///
/// Pure function of its inputs; no random source is involved.
pub fn generate_noise_field(width: u32, height: u32, params: &NoiseParams) -> ScalarField {
    let xs = coordinate_ramp(width, params.scale);
    let ys = coordinate_ramp(height, params.scale);

    let mut values = vec![0.0f64; xs.len() * ys.len()];
    for octave in 0..params.octaves {
        let frequency = 2f64.powi(octave as i32);
        for (row, &y) in ys.iter().enumerate() {
            let cos_y = (y * frequency).cos();
            let base = row * xs.len();
            for (col, &x) in xs.iter().enumerate() {
                values[base + col] += (x * frequency).sin() * cos_y / frequency;
            }
        }
    }

    let field = normalise_field(values);
    let grid = Grid::from_fn(width, height, |x, y| field[(y as usize) * xs.len() + x as usize]);
    tracing::debug!(
        target: "worldgen::noise",
        width,
        height,
        scale = params.scale,
        octaves = params.octaves,
        "noise.field.generated"
    );
    grid
}

fn coordinate_ramp(count: u32, scale: f64) -> Vec<f64> {
    if count <= 1 {
        return vec![0.0; count as usize];
    }
    let step = scale / (count - 1) as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

fn normalise_field(values: Vec<f64>) -> Vec<f64> {
    let mut min_v = f64::MAX;
    let mut max_v = f64::MIN;
    for &v in &values {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    let range = max_v - min_v;
    if values.is_empty() || range <= 0.0 {
        return vec![FLAT_FIELD_VALUE; values.len()];
    }
    let mut normalised = values;
    for v in &mut normalised {
        *v = ((*v - min_v) / range).clamp(0.0, 1.0);
    }
    normalised
}
