use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use light_movements::config::{parse_point, Config, PointParseError, RendererMode};
use light_movements::input::{map_key, Action, CornerControl, Viewport};
use light_movements::surface::{CornerId, CornerSet, Mode, SurfaceError, SurfaceEvents, SurfaceState};
use light_movements::visual::{pixel_uv, shade, SurfaceEngine, Vec2};

#[test]
fn corner_writes_are_clamped() {
    let mut corners = CornerSet::identity();
    corners.set(CornerId::BottomLeft, -0.5, 1.5);
    assert_eq!(corners.bottom_left(), Vec2::new(0.0, 1.0));
}

#[test]
fn raw_index_setter_follows_tl_tr_br_bl_order() {
    let mut corners = CornerSet::identity();
    corners.set_index(0, 0.1, 0.1).expect("index 0");
    corners.set_index(1, 0.9, 0.1).expect("index 1");
    corners.set_index(2, 2.0, 0.9).expect("index 2");
    corners.set_index(3, 0.1, -1.0).expect("index 3");
    assert_eq!(corners.top_left(), Vec2::new(0.1, 0.1));
    assert_eq!(corners.top_right(), Vec2::new(0.9, 0.1));
    assert_eq!(corners.bottom_right(), Vec2::new(1.0, 0.9));
    assert_eq!(corners.bottom_left(), Vec2::new(0.1, 0.0));

    let err = corners.set_index(7, 0.5, 0.5).expect_err("index 7 should fail");
    assert_eq!(err, SurfaceError::CornerIndex(7));
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn crossing_corners_is_allowed() {
    let mut state = SurfaceState::default();
    state.on_corner_drag(CornerId::TopLeft, 1.0, 1.0);
    state.on_corner_drag(CornerId::BottomRight, 0.0, 0.0);
    assert_eq!(state.corners.top_left(), Vec2::new(1.0, 1.0));
    assert_eq!(state.corners.bottom_right(), Vec2::ZERO);
    state.on_corners_reset();
    assert_eq!(state.corners, CornerSet::identity());
}

#[test]
fn mode_labels() {
    assert_eq!(Mode::River.label(), "River");
    assert_eq!(Mode::Dappled.label(), "Dappled Light");
    assert_eq!(Mode::River.toggle(), Mode::Dappled);
}

#[test]
fn set_mode_picks_the_field_for_the_next_frame() {
    let mut engine = SurfaceEngine::default();
    let mut state = SurfaceState::default();
    let (w, h) = (6, 12);
    for mode in [Mode::Dappled, Mode::River, Mode::Dappled] {
        state.set_mode(mode);
        assert_eq!(state.mode, mode);
        let grid = engine.render_frame(w, h, &state).clone();
        let t = engine.t();
        for row in 0..h {
            for x in 0..w {
                let expect = shade(pixel_uv(x, row, w, h), t, mode) as f32;
                assert_eq!(grid.get(x, row), Some(expect), "{mode:?} at ({x}, {row})");
            }
        }
    }
}

#[test]
fn parse_point_accepts_and_rejects() {
    assert_eq!(parse_point("0.25, 0.75"), Ok((0.25, 0.75)));
    assert_eq!(parse_point("0.25"), Err(PointParseError::MissingComma));
    assert!(matches!(
        parse_point("a,0.5"),
        Err(PointParseError::Number { axis: 'x', .. })
    ));
    assert!(matches!(
        parse_point("0.5,nan"),
        Err(PointParseError::Number { axis: 'y', .. })
    ));
}

#[test]
fn config_defaults_are_stable() {
    let cfg = Config::try_parse_from(["light-movements"]).expect("parse should succeed");
    assert_eq!(cfg.mode, Mode::River);
    assert_eq!(cfg.renderer, RendererMode::HalfBlock);
    assert_eq!(cfg.fps, 60);
    assert!((cfg.timing.time_step - 0.016).abs() < 1e-12);
    assert_eq!(cfg.timing.start_time, 0.0);
    assert!(cfg.show_handles);
    assert_eq!(cfg.initial_surface(), SurfaceState::default());
}

#[test]
fn config_overrides_and_clamps_corners() {
    let cfg = Config::try_parse_from([
        "light-movements",
        "--mode",
        "dappled",
        "--renderer",
        "ascii",
        "--corner-tl",
        "-0.5,1.5",
        "--corner-br",
        "0.8,0.9",
        "--time-step",
        "0.032",
        "--show-handles",
        "false",
    ])
    .expect("parse should succeed");

    let surface = cfg.initial_surface();
    assert_eq!(surface.mode, Mode::Dappled);
    assert_eq!(cfg.renderer, RendererMode::Ascii);
    assert_eq!(surface.corners.top_left(), Vec2::new(0.0, 1.0));
    assert_eq!(surface.corners.bottom_right(), Vec2::new(0.8, 0.9));
    assert_eq!(surface.corners.top_right(), Vec2::new(1.0, 0.0));
    assert!(!cfg.show_handles);
    assert!((cfg.timing.clock().step() - 0.032).abs() < 1e-12);
}

#[test]
fn config_rejects_malformed_corner() {
    assert!(Config::try_parse_from(["light-movements", "--corner-tr", "0.5"]).is_err());
}

#[test]
fn space_and_m_toggle_mode() {
    assert_eq!(map_key(KeyCode::Char(' '), KeyModifiers::NONE), Action::ToggleMode);
    assert_eq!(map_key(KeyCode::Char('m'), KeyModifiers::NONE), Action::ToggleMode);
    assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
    assert_eq!(
        map_key(KeyCode::Right, KeyModifiers::SHIFT),
        Action::Nudge { dx: 0.05, dy: 0.0 }
    );
}

#[test]
fn drag_outside_viewport_does_not_grab() {
    let view = Viewport { cols: 20, rows: 10 };
    let mut state = SurfaceState::default();
    let mut ctl = CornerControl::default();
    let corners = state.corners;
    let press = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 19,
        row: 12,
        modifiers: KeyModifiers::NONE,
    };
    ctl.on_mouse(press, view, &corners, &mut state);
    assert_eq!(ctl.dragging(), None);
}

#[test]
fn viewport_round_trips_cell_centers() {
    let view = Viewport { cols: 80, rows: 30 };
    for (c, r) in [(0u16, 0u16), (79, 29), (40, 15)] {
        assert_eq!(view.to_cell(view.to_surface(c, r)), (c, r));
    }
    assert_eq!(view.to_cell(Vec2::new(1.0, 1.0)), (79, 29));
}
