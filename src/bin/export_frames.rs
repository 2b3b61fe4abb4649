use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use light_movements::config::{CornerArgs, TimingArgs};
use light_movements::surface::{Mode, SurfaceState};
use light_movements::visual::{BrightnessGrid, SurfaceEngine};

const DEFAULT_OUTPUT: &str = "frames";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "export_frames",
    version,
    about = "Headless export of the visual as a numbered PGM sequence"
)]
pub(crate) struct Cli {
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT)]
    pub(crate) out: PathBuf,

    #[arg(long, default_value_t = 400)]
    pub(crate) width: usize,

    #[arg(long, default_value_t = 800)]
    pub(crate) height: usize,

    #[arg(long, default_value_t = 120)]
    pub(crate) frames: usize,

    #[arg(long, value_enum, default_value_t = Mode::River)]
    pub(crate) mode: Mode,

    #[command(flatten)]
    pub(crate) timing: TimingArgs,

    #[command(flatten)]
    pub(crate) corners: CornerArgs,
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    if args.width == 0 {
        bail!("--width must be >= 1");
    }
    if args.height == 0 {
        bail!("--height must be >= 1");
    }
    if args.frames == 0 {
        bail!("--frames must be >= 1");
    }
    if !(args.timing.time_step > 0.0) {
        bail!("--time-step must be > 0");
    }
    if !(args.timing.start_time >= 0.0) {
        bail!("--start-time must be >= 0");
    }
    Ok(())
}

pub(crate) fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:05}.pgm"))
}

/// Binary PGM (P5, maxval 255).
pub(crate) fn write_pgm(out: &mut dyn Write, grid: &BrightnessGrid) -> Result<()> {
    write!(out, "P5\n{} {}\n255\n", grid.width(), grid.height())?;
    out.write_all(&grid.to_gray8())?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    run(args)
}

fn run(args: Cli) -> Result<()> {
    validate_args(&args)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("create output directory {}", args.out.display()))?;

    let state = SurfaceState {
        corners: args.corners.corner_set(),
        mode: args.mode,
    };
    let mut engine = SurfaceEngine::new(args.timing.clock());
    log::info!(
        "exporting {} frames of {}x{} ({}) to {}",
        args.frames,
        args.width,
        args.height,
        args.mode.label(),
        args.out.display()
    );

    for index in 0..args.frames {
        let grid = engine.render_frame(args.width, args.height, &state);
        let path = frame_path(&args.out, index);
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(file);
        write_pgm(&mut w, grid).with_context(|| format!("write {}", path.display()))?;
        w.flush()?;
        log::debug!("frame {index} t={:.3}", engine.t());
    }

    println!(
        "exported {} frames ({}x{}, t={:.3}) -> {}",
        args.frames,
        args.width,
        args.height,
        engine.t(),
        args.out.display()
    );
    Ok(())
}
