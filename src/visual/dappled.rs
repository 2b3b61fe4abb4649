use super::math::{smoothstep, Vec2};
use super::noise::fbm;
use super::sparkle;

const GROUND: f64 = 0.12;
const PATCH_SCALE: f64 = 6.0;

/// Light patches cast through a gently swaying canopy, in [0, 1].
pub fn light_patches(uv: Vec2, t: f64) -> f64 {
    let sway = Vec2::new((t * 0.3).sin() * 0.02, (t * 0.25).cos() * 0.015);
    let p = uv * PATCH_SCALE + sway * PATCH_SCALE;

    let large = smoothstep(0.4, 0.7, fbm(p * 0.8 + Vec2::new(t * 0.05, 0.0)));
    let medium = smoothstep(0.45, 0.75, fbm(p * 1.5 + Vec2::new(t * 0.08, t * 0.06)));
    let small = smoothstep(0.5, 0.8, fbm(p * 3.0 + Vec2::new(t * 0.1, t * 0.08)));

    let patches = large.max((medium * 0.8).max(small * 0.6));
    patches * (0.7 + 0.3 * (t * 0.4 + p.x * 2.0 + p.y * 1.5).sin())
}

/// Dark forest floor with a little texture.
pub fn ground(uv: Vec2) -> f64 {
    GROUND + fbm(uv * 8.0) * 0.08
}

/// Full dappled brightness (unclamped) for an aspect-adjusted `uv`.
pub fn shade_dappled(uv: Vec2, t: f64) -> f64 {
    let patch = light_patches(uv, t);
    ground(uv) + patch * 0.7 + sparkle::dappled_glimmer(uv, t, patch) * 0.8
}
