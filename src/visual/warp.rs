use super::math::{mix_vec, Vec2};
use crate::surface::CornerSet;

/// Corner position (top-down, 0..1) to clip space (bottom-up, -1..1).
#[inline]
pub fn corner_to_clip(c: Vec2) -> Vec2 {
    Vec2::new(c.x * 2.0 - 1.0, (1.0 - c.y) * 2.0 - 1.0)
}

/// Bilinear placement of a reference position in [-1,1]² onto the quad
/// spanned by `corners`. Identity corners map every point to itself.
pub fn warp(ref_pos: Vec2, corners: &CornerSet) -> Vec2 {
    let uv = (ref_pos + 1.0) * 0.5;

    let tl = corner_to_clip(corners.top_left());
    let tr = corner_to_clip(corners.top_right());
    let br = corner_to_clip(corners.bottom_right());
    let bl = corner_to_clip(corners.bottom_left());

    let top = mix_vec(tl, tr, uv.x);
    let bottom = mix_vec(bl, br, uv.x);
    mix_vec(bottom, top, uv.y)
}

/// Which clip-space points the warped quad covers. The quad is emitted as
/// two triangles over the reference vertices BL, BR, TL and TL, BR, TR, so
/// coverage is the union of those two warped triangles.
#[derive(Debug, Clone, Copy)]
pub struct QuadCoverage {
    tris: [[Vec2; 3]; 2],
}

impl QuadCoverage {
    pub fn new(corners: &CornerSet) -> Self {
        let bl = warp(Vec2::new(-1.0, -1.0), corners);
        let br = warp(Vec2::new(1.0, -1.0), corners);
        let tl = warp(Vec2::new(-1.0, 1.0), corners);
        let tr = warp(Vec2::new(1.0, 1.0), corners);
        Self {
            tris: [[bl, br, tl], [tl, br, tr]],
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.tris.iter().any(|t| in_triangle(p, t[0], t[1], t[2]))
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

// Winding-agnostic, edges inclusive. Degenerate triangles cover nothing.
fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let area = edge(a, b, c);
    if area == 0.0 {
        return false;
    }
    let w0 = edge(b, c, p);
    let w1 = edge(c, a, p);
    let w2 = edge(a, b, p);
    if area > 0.0 {
        w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
    } else {
        w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CornerId;

    #[test]
    fn identity_corners_are_identity_map() {
        let corners = CornerSet::identity();
        for i in 0..=10 {
            for j in 0..=10 {
                let p = Vec2::new(i as f64 / 5.0 - 1.0, j as f64 / 5.0 - 1.0);
                let q = warp(p, &corners);
                assert!((p - q).length() < 1e-12, "{p:?} -> {q:?}");
            }
        }
    }

    #[test]
    fn reference_corners_land_on_their_handles() {
        let mut corners = CornerSet::identity();
        corners.set(CornerId::TopLeft, 0.2, 0.1);
        corners.set(CornerId::BottomRight, 0.7, 0.9);
        let tl = warp(Vec2::new(-1.0, 1.0), &corners);
        assert!((tl - Vec2::new(-0.6, 0.8)).length() < 1e-12);
        let br = warp(Vec2::new(1.0, -1.0), &corners);
        assert!((br - Vec2::new(0.4, -0.8)).length() < 1e-12);
    }

    #[test]
    fn coverage_of_shrunk_quad() {
        let mut corners = CornerSet::identity();
        corners.set(CornerId::TopLeft, 0.25, 0.25);
        corners.set(CornerId::TopRight, 0.75, 0.25);
        corners.set(CornerId::BottomRight, 0.75, 0.75);
        corners.set(CornerId::BottomLeft, 0.25, 0.75);
        let cov = QuadCoverage::new(&corners);
        assert!(cov.contains(Vec2::ZERO));
        assert!(!cov.contains(Vec2::new(0.9, 0.9)));
        assert!(!cov.contains(Vec2::new(-0.9, 0.0)));
    }

    #[test]
    fn collapsed_quad_covers_nothing() {
        let mut corners = CornerSet::identity();
        for id in CornerId::all() {
            corners.set(id, 0.5, 0.5);
        }
        let cov = QuadCoverage::new(&corners);
        assert!(!cov.contains(Vec2::ZERO));
    }
}
