use crate::surface::{CornerId, CornerSet, Mode, SurfaceState};
use crate::visual::{AnimationClock, DEFAULT_TIME_STEP};
use clap::{Args, Parser, ValueEnum};
use std::fmt;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "light-movements",
    version,
    about = "Procedural river and dappled-light visual on a corner-warped surface"
)]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Mode::River)]
    pub mode: Mode,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[command(flatten)]
    pub timing: TimingArgs,

    #[command(flatten)]
    pub corners: CornerArgs,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub show_handles: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub hud: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

impl Config {
    pub fn initial_surface(&self) -> SurfaceState {
        SurfaceState {
            corners: self.corners.corner_set(),
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
}

/// Logical clock settings shared by the interactive app and the exporter.
#[derive(Args, Debug, Clone, Copy)]
pub struct TimingArgs {
    /// Logical time added per rendered frame.
    #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
    pub time_step: f64,

    #[arg(long, default_value_t = 0.0)]
    pub start_time: f64,
}

impl TimingArgs {
    pub fn clock(&self) -> AnimationClock {
        AnimationClock::starting_at(self.start_time, self.time_step)
    }
}

/// Initial corner positions as `x,y` in [0,1] (y down). Out-of-range
/// values are clamped.
#[derive(Args, Debug, Clone, Copy)]
pub struct CornerArgs {
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub corner_tl: Option<(f64, f64)>,

    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub corner_tr: Option<(f64, f64)>,

    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub corner_br: Option<(f64, f64)>,

    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub corner_bl: Option<(f64, f64)>,
}

impl CornerArgs {
    pub fn corner_set(&self) -> CornerSet {
        let mut set = CornerSet::identity();
        let given = [
            (CornerId::TopLeft, self.corner_tl),
            (CornerId::TopRight, self.corner_tr),
            (CornerId::BottomRight, self.corner_br),
            (CornerId::BottomLeft, self.corner_bl),
        ];
        for (id, point) in given {
            if let Some((x, y)) = point {
                set.set(id, x, y);
            }
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointParseError {
    MissingComma,
    Number { axis: char, raw: String },
}

impl fmt::Display for PointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma => write!(f, "expected <x>,<y>"),
            Self::Number { axis, raw } => write!(f, "invalid {axis} coordinate `{raw}`"),
        }
    }
}

impl std::error::Error for PointParseError {}

pub fn parse_point(raw: &str) -> Result<(f64, f64), PointParseError> {
    let (x_raw, y_raw) = raw.split_once(',').ok_or(PointParseError::MissingComma)?;
    let parse = |axis: char, s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PointParseError::Number {
                axis,
                raw: s.trim().to_string(),
            })
    };
    Ok((parse('x', x_raw)?, parse('y', y_raw)?))
}
