use crate::visual::Vec2;
use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    River,
    #[value(alias = "dapple", alias = "canopy")]
    Dappled,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Self::River => Self::Dappled,
            Self::Dappled => Self::River,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::River => "River",
            Self::Dappled => "Dappled Light",
        }
    }
}

/// Corner order matches the on-screen handles: TL, TR, BR, BL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerId {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl CornerId {
    pub const fn all() -> [Self; 4] {
        [
            Self::TopLeft,
            Self::TopRight,
            Self::BottomRight,
            Self::BottomLeft,
        ]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "TL",
            Self::TopRight => "TR",
            Self::BottomRight => "BR",
            Self::BottomLeft => "BL",
        }
    }

    /// Position of this corner in the undistorted quad.
    pub fn home(self) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::new(0.0, 0.0),
            Self::TopRight => Vec2::new(1.0, 0.0),
            Self::BottomRight => Vec2::new(1.0, 1.0),
            Self::BottomLeft => Vec2::new(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    CornerIndex(usize),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CornerIndex(i) => write!(f, "corner index {i} out of range (expected 0..=3)"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Four corner positions in normalized surface coordinates, y measured
/// top-down. Every write is clamped to [0,1]²; crossing corners is allowed
/// and produces a folded quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet {
    points: [Vec2; 4],
}

impl Default for CornerSet {
    fn default() -> Self {
        Self::identity()
    }
}

impl CornerSet {
    pub fn identity() -> Self {
        Self {
            points: CornerId::all().map(CornerId::home),
        }
    }

    pub fn get(&self, id: CornerId) -> Vec2 {
        self.points[id.index()]
    }

    pub fn set(&mut self, id: CornerId, x: f64, y: f64) {
        self.points[id.index()] = Vec2::new(clamp_unit(x), clamp_unit(y));
    }

    pub fn set_index(&mut self, index: usize, x: f64, y: f64) -> Result<(), SurfaceError> {
        let id = CornerId::from_index(index).ok_or(SurfaceError::CornerIndex(index))?;
        self.set(id, x, y);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::identity();
    }

    pub fn top_left(&self) -> Vec2 {
        self.get(CornerId::TopLeft)
    }

    pub fn top_right(&self) -> Vec2 {
        self.get(CornerId::TopRight)
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.get(CornerId::BottomRight)
    }

    pub fn bottom_left(&self) -> Vec2 {
        self.get(CornerId::BottomLeft)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CornerId, Vec2)> + '_ {
        CornerId::all().into_iter().map(|id| (id, self.get(id)))
    }
}

fn clamp_unit(v: f64) -> f64 {
    // NaN would survive f64::clamp; park it at the origin edge instead.
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Everything the renderer reads from the outside world for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceState {
    pub corners: CornerSet,
    pub mode: Mode,
}

impl SurfaceState {
    pub fn new(mode: Mode) -> Self {
        Self {
            corners: CornerSet::identity(),
            mode,
        }
    }

    pub fn set_corner(&mut self, id: CornerId, x: f64, y: f64) {
        self.corners.set(id, x, y);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggle();
        self.mode
    }
}

/// Input handlers write into the surface only through these hooks.
pub trait SurfaceEvents {
    fn on_corner_drag(&mut self, corner: CornerId, x: f64, y: f64);
    fn on_mode_toggle(&mut self);
    fn on_corners_reset(&mut self) {}
}

impl SurfaceEvents for SurfaceState {
    fn on_corner_drag(&mut self, corner: CornerId, x: f64, y: f64) {
        self.set_corner(corner, x, y);
        log::debug!("corner {} -> ({:.3}, {:.3})", corner.label(), x, y);
    }

    fn on_mode_toggle(&mut self) {
        let mode = self.toggle_mode();
        log::debug!("mode -> {}", mode.label());
    }

    fn on_corners_reset(&mut self) {
        self.corners.reset();
        log::debug!("corners reset");
    }
}
