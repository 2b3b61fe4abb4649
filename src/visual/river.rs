use super::math::{reflect, smoothstep, Vec2};
use super::noise::fbm;
use super::sparkle;

/// Frequency stretch from surface uv into wave space.
pub const WAVE_SCALE: Vec2 = Vec2::new(1.5, 3.0);
pub const NORMAL_EPS: f64 = 0.01;

const BASE: f64 = 0.08;
const VIEW_DIR: Vec2 = Vec2::new(0.0, 1.0);
const LIGHT_SPEED: f64 = 0.08;
const SPECULAR_POWER: f64 = 32.0;

/// Water surface height: broad swells, finer ripples and a drifting noise
/// term, all travelling along y.
pub fn wave_height(uv: Vec2, t: f64) -> f64 {
    let wave1 = (uv.y * 5.0 - t * 0.8).sin() * 0.5;
    let wave2 = (uv.y * 7.0 + uv.x * 1.5 - t * 0.6).sin() * 0.3;
    let wave3 = (uv.y * 4.0 - uv.x * 1.0 - t * 1.0).sin() * 0.4;

    let ripple1 = (uv.y * 12.0 - t * 1.2).sin() * 0.15;
    let ripple2 = (uv.y * 15.0 + uv.x * 2.0 - t * 1.5).sin() * 0.12;
    let ripple3 = (uv.y * 18.0 - uv.x * 1.8 - t * 1.8).sin() * 0.1;

    let medium = (uv.y * 22.0 + uv.x * 3.0 - t * 2.0).sin() * 0.08;

    let noise_wave = fbm(uv * 2.5 + Vec2::new(t * 0.2, 0.0)) * 0.2;

    wave1 + wave2 + wave3 + ripple1 + ripple2 + ripple3 + medium + noise_wave
}

/// Surface normal from central differences of `wave_height`.
pub fn wave_normal(uv: Vec2, t: f64, eps: f64) -> Vec2 {
    let h_l = wave_height(uv - Vec2::new(eps, 0.0), t);
    let h_r = wave_height(uv + Vec2::new(eps, 0.0), t);
    let h_d = wave_height(uv - Vec2::new(0.0, eps), t);
    let h_u = wave_height(uv + Vec2::new(0.0, eps), t);

    let dx = (h_r - h_l) / (2.0 * eps);
    let dy = (h_u - h_d) / (2.0 * eps);

    Vec2::new(-dx, -dy).normalize()
}

/// Per-frame lighting state. Only the light azimuth depends on time.
#[derive(Debug, Clone, Copy)]
pub struct LightingModel {
    pub light_dir: Vec2,
}

/// Individual lighting terms, kept apart so callers can inspect them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTerms {
    pub catch: f64,
    pub crest: f64,
    pub specular: f64,
    pub shadow: f64,
}

impl LightTerms {
    pub fn brightness(&self) -> f64 {
        BASE + self.catch * self.crest * 0.7 + self.specular * 0.5 - self.shadow
    }
}

impl LightingModel {
    pub fn at(t: f64) -> Self {
        let light_x = (t * LIGHT_SPEED).sin() * 0.9;
        Self {
            light_dir: Vec2::new(light_x, 0.3).normalize(),
        }
    }

    pub fn terms(&self, normal: Vec2, height: f64) -> LightTerms {
        let catch = normal.dot(self.light_dir).max(0.0).sqrt();
        let crest = smoothstep(0.3, 0.7, height);
        let reflected = reflect(-self.light_dir, normal);
        let specular = VIEW_DIR.dot(reflected).max(0.0).powf(SPECULAR_POWER);
        let shadow = smoothstep(-0.5, 0.5, height) * 0.1;
        LightTerms {
            catch,
            crest,
            specular,
            shadow,
        }
    }
}

/// Water shading without sparkles for an aspect-adjusted `uv`.
pub fn water(uv: Vec2, t: f64) -> f64 {
    let wave_uv = uv.mul_elem(WAVE_SCALE);
    let height = wave_height(wave_uv, t);
    let normal = wave_normal(wave_uv, t, NORMAL_EPS);
    let terms = LightingModel::at(t).terms(normal, height);
    terms.brightness() + fbm(wave_uv * 5.0) * 0.05
}

/// Full river brightness (unclamped) for an aspect-adjusted `uv`.
pub fn shade_river(uv: Vec2, t: f64) -> f64 {
    water(uv, t) + sparkle::river_glimmer(uv, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_unit_length() {
        for i in 0..20 {
            let uv = Vec2::new(i as f64 * 0.05, 0.3 + i as f64 * 0.02);
            let n = wave_normal(uv, 1.7, NORMAL_EPS);
            assert!((n.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn light_points_up_at_start() {
        let l = LightingModel::at(0.0).light_dir;
        assert!(l.x.abs() < 1e-12);
        assert!((l.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn crest_and_shadow_saturate() {
        let model = LightingModel::at(0.0);
        let high = model.terms(Vec2::new(0.0, 1.0), 2.0);
        assert_eq!(high.crest, 1.0);
        assert!((high.shadow - 0.1).abs() < 1e-12);
        let low = model.terms(Vec2::new(0.0, 1.0), -2.0);
        assert_eq!(low.crest, 0.0);
        assert_eq!(low.shadow, 0.0);
    }

    #[test]
    fn head_on_light_gives_full_specular() {
        // Light straight down the view axis reflects back along +y.
        let model = LightingModel::at(0.0);
        let terms = model.terms(Vec2::new(0.0, 1.0), 0.0);
        assert!((terms.catch - 1.0).abs() < 1e-12);
        assert!((terms.specular - 1.0).abs() < 1e-12);
    }

    #[test]
    fn height_matches_hand_sum_at_origin() {
        let h = wave_height(Vec2::ZERO, 0.0);
        let expect = fbm(Vec2::ZERO) * 0.2;
        assert!((h - expect).abs() < 1e-12);
    }
}
