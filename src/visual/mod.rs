pub mod dappled;
pub mod math;
pub mod noise;
pub mod river;
pub mod sparkle;
pub mod warp;

pub use math::Vec2;
pub use warp::{warp, QuadCoverage};

use crate::surface::{Mode, SurfaceState};
use rayon::prelude::*;

pub const DEFAULT_TIME_STEP: f64 = 0.016;

/// Stretch for the 2:1 portrait framing the fields were tuned for.
#[inline]
pub fn aspect_adjust(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, uv.y * 2.0 - 0.5)
}

/// Brightness in [0,1] for a surface sample `uv` (fragment coordinate over
/// resolution, y up) at time `t`.
pub fn shade(uv: Vec2, t: f64, mode: Mode) -> f64 {
    let uv = aspect_adjust(uv);
    let b = match mode {
        Mode::River => river::shade_river(uv, t),
        Mode::Dappled => dappled::shade_dappled(uv, t),
    };
    if b.is_nan() { 0.0 } else { b.clamp(0.0, 1.0) }
}

/// Logical animation time, advanced by a fixed step per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    t: f64,
    step: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl AnimationClock {
    pub fn new(step: f64) -> Self {
        Self::starting_at(0.0, step)
    }

    pub fn starting_at(t: f64, step: f64) -> Self {
        Self {
            t: t.max(0.0),
            step: step.max(0.0),
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.t += self.step;
        self.t
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Row-major brightness samples, top row first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrightnessGrid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl BrightnessGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: usize, row: usize) -> Option<f32> {
        if x >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + x).copied()
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.values.resize(width.saturating_mul(height), 0.0);
    }

    /// Grey RGBA: R = G = B = brightness, A = 255. `out` is resized to fit.
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.resize(self.values.len() * 4, 0);
        out.par_chunks_exact_mut(4)
            .zip(self.values.par_iter())
            .for_each(|(px, &b)| {
                let v = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
                px[0] = v;
                px[1] = v;
                px[2] = v;
                px[3] = 0xFF;
            });
    }

    /// 8-bit grey samples, one byte per pixel.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.values
            .iter()
            .map(|b| (b.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

/// Pixel-center sample for column `x` of row `row` (rows counted from the
/// top), in the bottom-up convention the fields use.
#[inline]
pub fn pixel_uv(x: usize, row: usize, width: usize, height: usize) -> Vec2 {
    let fx = x as f64 + 0.5;
    let fy = (height - row) as f64 - 0.5;
    Vec2::new(fx / width as f64, fy / height as f64)
}

/// Drives the clock and evaluates a full frame.
pub struct SurfaceEngine {
    clock: AnimationClock,
    grid: BrightnessGrid,
}

impl Default for SurfaceEngine {
    fn default() -> Self {
        Self::new(AnimationClock::default())
    }
}

impl SurfaceEngine {
    pub fn new(clock: AnimationClock) -> Self {
        Self {
            clock,
            grid: BrightnessGrid::default(),
        }
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn t(&self) -> f64 {
        self.clock.t()
    }

    /// Advance one tick and shade a `width` x `height` frame from `state`.
    /// Samples outside the warped quad stay black.
    pub fn render_frame(&mut self, width: usize, height: usize, state: &SurfaceState) -> &BrightnessGrid {
        let t = self.clock.tick();
        self.grid.resize(width, height);
        if width == 0 || height == 0 {
            return &self.grid;
        }

        let mode = state.mode;
        let coverage = QuadCoverage::new(&state.corners);

        self.grid
            .values
            .par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(row, line)| {
                for (x, px) in line.iter_mut().enumerate() {
                    let uv = pixel_uv(x, row, width, height);
                    let clip = uv * 2.0 - Vec2::splat(1.0);
                    *px = if coverage.contains(clip) {
                        shade(uv, t, mode) as f32
                    } else {
                        0.0
                    };
                }
            });

        &self.grid
    }
}
