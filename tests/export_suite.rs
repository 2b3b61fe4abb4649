#[allow(dead_code)]
#[path = "../src/bin/export_frames.rs"]
mod export_frames;

use clap::Parser;
use light_movements::surface::{Mode, SurfaceState};
use light_movements::visual::SurfaceEngine;
use std::path::{Path, PathBuf};

#[test]
fn parse_args_defaults_are_stable() {
    let args = export_frames::Cli::try_parse_from(["export_frames"]).expect("parse should succeed");

    assert_eq!(args.out, PathBuf::from("frames"));
    assert_eq!(args.width, 400);
    assert_eq!(args.height, 800);
    assert_eq!(args.frames, 120);
    assert_eq!(args.mode, Mode::River);
    assert!((args.timing.time_step - 0.016).abs() < 1e-12);
    assert!(export_frames::validate_args(&args).is_ok());
}

#[test]
fn parse_args_overrides_work() {
    let args = export_frames::Cli::try_parse_from([
        "export_frames",
        "--out",
        "clips/run1",
        "--width",
        "64",
        "--height",
        "128",
        "--frames",
        "10",
        "--mode",
        "dappled",
        "--start-time",
        "12.5",
        "--corner-bl",
        "0.1,0.9",
    ])
    .expect("parse should succeed");

    assert_eq!(args.out, PathBuf::from("clips/run1"));
    assert_eq!(args.width, 64);
    assert_eq!(args.height, 128);
    assert_eq!(args.frames, 10);
    assert_eq!(args.mode, Mode::Dappled);
    assert_eq!(args.timing.clock().t(), 12.5);
    assert_eq!(args.corners.corner_set().bottom_left().x, 0.1);
}

#[test]
fn validate_rejects_degenerate_requests() {
    for argv in [
        vec!["export_frames", "--width", "0"],
        vec!["export_frames", "--height", "0"],
        vec!["export_frames", "--frames", "0"],
        vec!["export_frames", "--time-step", "0"],
    ] {
        let args = export_frames::Cli::try_parse_from(argv.clone()).expect("parse should succeed");
        assert!(export_frames::validate_args(&args).is_err(), "{argv:?} should be rejected");
    }
}

#[test]
fn frame_paths_are_zero_padded() {
    assert_eq!(
        export_frames::frame_path(Path::new("out"), 7),
        PathBuf::from("out/frame_00007.pgm")
    );
}

#[test]
fn pgm_has_header_and_one_byte_per_pixel() {
    let mut engine = SurfaceEngine::default();
    let grid = engine.render_frame(5, 3, &SurfaceState::default());
    let mut buf = Vec::new();
    export_frames::write_pgm(&mut buf, grid).expect("write should succeed");
    let header = b"P5\n5 3\n255\n";
    assert!(buf.starts_with(header));
    assert_eq!(buf.len(), header.len() + 15);
}
