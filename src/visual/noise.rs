use super::math::{fract, mix, Vec2};

const HASH_K: Vec2 = Vec2::new(127.1, 311.7);
const HASH_M: f64 = 43758.5453;
const FBM_OCTAVES: usize = 4;

/// Deterministic lattice hash in [0, 1).
#[inline]
pub fn hash(p: Vec2) -> f64 {
    fract(p.dot(HASH_K).sin() * HASH_M)
}

/// Value noise: hashes at the four surrounding lattice points, blended with
/// a cubic Hermite weight so the field is C1 across cell boundaries.
pub fn smooth_noise(p: Vec2) -> f64 {
    let i = p.floor();
    let f = p.fract();
    let f = Vec2::new(f.x * f.x * (3.0 - 2.0 * f.x), f.y * f.y * (3.0 - 2.0 * f.y));

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    mix(mix(a, b, f.x), mix(c, d, f.x), f.y)
}

/// Four octaves of `smooth_noise`; bounded by 0.5 + 0.25 + 0.125 + 0.0625.
pub fn fbm(p: Vec2) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..FBM_OCTAVES {
        value += amplitude * smooth_noise(p * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Upper bound of `fbm`.
pub const FBM_MAX: f64 = 0.9375;
