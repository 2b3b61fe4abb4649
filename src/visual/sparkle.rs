//! Twinkling diamond glints on two jittered lattices.
//!
//! Each lattice cell gets one hash value that decides whether it carries a
//! glint and, if so, its jittered center, size, twinkle phase and strength.
//! River mode keeps glints on a band around a drifting guide curve; dappled
//! mode keeps them inside the light patches.

use super::math::{mix, smoothstep, Vec2};
use super::noise::hash;
use super::river::WAVE_SCALE;

const SPARKLE_SCALE: f64 = 25.0;
const LAYERS: usize = 2;
const LAYER_SEED: f64 = 23.7;
const DIAMOND_ROTATION: f64 = 0.785;
// Truncated 2π.
const TWINKLE_CYCLE: f64 = 6.28318;

const RIVER_BAND: f64 = 0.04;
const RIVER_MIN_CONCENTRATION: f64 = 0.3;
const RIVER_NEAR_THRESHOLD: f64 = 0.94;
const DAPPLED_THRESHOLD: f64 = 0.75;
const DAPPLED_MIN_PATCH: f64 = 0.3;

/// One lattice layer as seen from a single sample.
#[derive(Debug, Clone, Copy)]
pub struct LatticeCell {
    pub layer: usize,
    pub scale: f64,
    /// Sample position in this layer's lattice units.
    pub pos: Vec2,
    pub grid: Vec2,
    pub hash: f64,
}

impl LatticeCell {
    pub fn locate(uv: Vec2, t: f64, layer: usize) -> Self {
        let lf = layer as f64;
        let scale = 20.0 + lf * 15.0;
        let jitter = Vec2::new((t * 0.2 + lf).sin(), (t * 0.15 + lf).cos()) * 0.5;
        let pos = uv * SPARKLE_SCALE * (scale / SPARKLE_SCALE) + jitter;
        let grid = pos.floor();
        Self {
            layer,
            scale,
            pos,
            grid,
            hash: hash(grid + Vec2::splat(lf * LAYER_SEED)),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.grid + 0.5 + (self.hash - 0.5) * 0.3
    }

    /// Cell center mapped back out of lattice units, through wave space and
    /// the portrait stretch, into the frame the guide curve lives in.
    pub fn world_uv(&self) -> Vec2 {
        let world = (self.grid + 0.5) / (self.scale / SPARKLE_SCALE);
        let mut w = world.div_elem(WAVE_SCALE);
        w.y = (w.y + 0.5) / 2.0;
        w
    }

    /// Twinkle envelope in [0.4, 1].
    pub fn twinkle(&self, t: f64) -> f64 {
        let phase = self.hash * TWINKLE_CYCLE;
        let speed = 2.0 + self.hash * 1.5;
        let tw = (t * speed + phase).sin() * 0.5 + 0.5;
        0.4 + tw * 0.6
    }

    pub fn strength(&self) -> f64 {
        0.6 + self.hash * 0.4
    }
}

/// Diamond glint centered at `center`, `size` scaling both the offset and
/// the falloff radii.
pub fn diamond_sparkle(p: Vec2, center: Vec2, intensity: f64, size: f64) -> f64 {
    let d = (p - center) / size;

    let angle = d.y.atan2(d.x) + DIAMOND_ROTATION;
    let dist = d.length();
    let (s, c) = angle.sin_cos();
    let rotated_x = (c * d.x - s * d.y).abs();
    let rotated_y = (s * d.x + c * d.y).abs();
    let diamond = rotated_x.max(rotated_y);

    let core = (1.0 - smoothstep(0.0, 0.01 * size, dist)) * intensity;
    let shape = (1.0 - smoothstep(0.0, 0.08 * size, diamond)).powf(0.8);
    let glow = (1.0 - smoothstep(0.05 * size, 0.15 * size, dist)) * 0.15;

    (core + shape * 0.9 + glow) * intensity
}

/// Horizontal position of the river guide curve at height `y`.
pub fn guide_curve_x(y: f64, t: f64) -> f64 {
    0.5 + (y * 4.0 + t * 0.5).sin() * 0.15
        + (y * 7.0 + t * 0.3).sin() * 0.08
        + (y * 11.0 + t * 0.7).sin() * 0.05
}

/// How strongly a cell is pulled onto the guide curve, 1 on the curve and 0
/// beyond the band.
pub fn band_concentration(world_uv: Vec2, t: f64) -> f64 {
    let dist = (world_uv.x - guide_curve_x(world_uv.y, t)).abs();
    (1.0 - smoothstep(0.0, RIVER_BAND, dist)).sqrt()
}

/// Glints hugging the guide curve.
pub fn river_glimmer(uv: Vec2, t: f64) -> f64 {
    let mut glimmer = 0.0;
    for layer in 0..LAYERS {
        let cell = LatticeCell::locate(uv, t, layer);
        let concentration = band_concentration(cell.world_uv(), t);

        let base_threshold = 0.98 + layer as f64 * 0.005;
        let threshold = mix(base_threshold, RIVER_NEAR_THRESHOLD, concentration);
        if cell.hash <= threshold || concentration <= RIVER_MIN_CONCENTRATION {
            continue;
        }

        let size = 0.6 + cell.hash * 0.7;
        let star = diamond_sparkle(cell.pos, cell.center(), 1.0, size);
        let intensity = cell.strength() * cell.twinkle(t) * (0.9 + concentration * 0.3);
        glimmer += star * intensity;
    }
    glimmer
}

/// Glints inside dappled light patches, scaled by the local patch value.
pub fn dappled_glimmer(uv: Vec2, t: f64, patch: f64) -> f64 {
    if patch <= DAPPLED_MIN_PATCH {
        return 0.0;
    }
    let mut sparkles = 0.0;
    for layer in 0..LAYERS {
        let cell = LatticeCell::locate(uv, t, layer);
        if cell.hash <= DAPPLED_THRESHOLD {
            continue;
        }

        let size = 0.8 + cell.hash * 1.0;
        let star = diamond_sparkle(cell.pos, cell.center(), 1.0, size);
        let intensity = cell.strength() * cell.twinkle(t) * patch;
        sparkles += star * intensity;
    }
    sparkles
}
