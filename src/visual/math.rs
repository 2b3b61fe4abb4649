use std::ops::{Add, Div, Mul, Neg, Sub};

/// Two-component vector used by the shading math. Mirrors the handful of
/// shader-language operations the fields need and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. A zero vector stays zero instead of
    /// turning into NaNs.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > 0.0 { self / len } else { Self::ZERO }
    }

    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    #[inline]
    pub fn fract(self) -> Self {
        Self::new(fract(self.x), fract(self.y))
    }

    #[inline]
    pub fn mul_elem(self, o: Self) -> Self {
        Self::new(self.x * o.x, self.y * o.y)
    }

    #[inline]
    pub fn div_elem(self, o: Self) -> Self {
        Self::new(self.x / o.x, self.y / o.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y)
    }
}

impl Add<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// `x - floor(x)`, always in [0, 1).
#[inline]
pub fn fract(x: f64) -> f64 {
    let f = x - x.floor();
    if f >= 1.0 { 0.0 } else { f }
}

#[inline]
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn mix_vec(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    Vec2::new(mix(a.x, b.x, t), mix(a.y, b.y, t))
}

/// Hermite step between two edges, clamped outside them.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Reflect incident `i` about the unit normal `n`.
#[inline]
pub fn reflect(i: Vec2, n: Vec2) -> Vec2 {
    i - n * (2.0 * n.dot(i))
}
