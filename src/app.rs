use crate::config::{Config, RendererMode};
use crate::input::{map_key, Action, CornerControl, Viewport};
use crate::render::{AsciiRenderer, Frame, HalfBlockRenderer, Marker, Renderer};
use crate::surface::{CornerId, SurfaceEvents, SurfaceState};
use crate::terminal::TerminalGuard;
use crate::visual::SurfaceEngine;
use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use std::io::BufWriter;
use std::time::{Duration, Instant};

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut renderer: Box<dyn Renderer> = match cfg.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
    };
    let (px_w_mul, px_h_mul) = renderer.cell_pixels();

    let mut surface = cfg.initial_surface();
    let mut control = CornerControl::default();
    let mut engine = SurfaceEngine::new(cfg.timing.clock());

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.1 < 2 || last_size.0 < 4 {
        log::warn!("terminal too small: {}x{}", last_size.0, last_size.1);
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    log::info!(
        "starting: mode={} renderer={} fps={} step={}",
        surface.mode.label(),
        renderer.name(),
        cfg.fps,
        engine.clock().step()
    );

    let mut show_hud = cfg.hud;
    let mut show_help = false;
    let mut show_handles = cfg.show_handles;
    let mut fps = FpsCounter::new();
    let mut rgba: Vec<u8> = Vec::new();

    loop {
        let now = Instant::now();
        let mut view = viewport_for(last_size, show_hud);

        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    match map_key(k.code, k.modifiers) {
                        Action::Quit => {
                            log::info!("quit at t={:.3}", engine.t());
                            return Ok(());
                        }
                        Action::ToggleMode => surface.on_mode_toggle(),
                        Action::ToggleHud => {
                            show_hud = !show_hud;
                            view = viewport_for(last_size, show_hud);
                        }
                        Action::ToggleHelp => show_help = !show_help,
                        Action::ToggleHandles => show_handles = !show_handles,
                        Action::ResetCorners => surface.on_corners_reset(),
                        Action::SelectCorner(id) => control.select(id),
                        Action::Nudge { dx, dy } => {
                            let corners = surface.corners;
                            control.nudge(&corners, dx, dy, &mut surface);
                        }
                        Action::None => {}
                    }
                }
                Event::Mouse(m) => {
                    let corners = surface.corners;
                    control.on_mouse(m, view, &corners, &mut surface);
                }
                Event::Resize(c, r) => {
                    last_size = (c, r);
                    view = viewport_for(last_size, show_hud);
                    log::debug!("resize {}x{}", c, r);
                }
                _ => {}
            }
        }

        // Size check once per frame (resize events can be missed in some terminals).
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
            view = viewport_for(last_size, show_hud);
        }

        let (term_cols, term_rows) = last_size;
        let hud_rows = term_rows.saturating_sub(view.rows);
        let w = (view.cols as usize).saturating_mul(px_w_mul);
        let h = (view.rows as usize).saturating_mul(px_h_mul);

        // One copy per frame: the whole frame sees the same corners and mode.
        let snapshot: SurfaceState = surface;
        let grid = engine.render_frame(w, h, &snapshot);
        grid.write_rgba(&mut rgba);

        let hud = if show_hud {
            build_hud(&snapshot, control.selected(), engine.t(), fps.fps())
        } else {
            String::new()
        };
        let markers = if show_handles {
            handle_markers(&snapshot, view, &control)
        } else {
            Vec::new()
        };

        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows: view.rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: &rgba,
            hud: &hud,
            hud_rows,
            markers: &markers,
            overlay: show_help.then(help_popup_text),
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        fps.tick();

        // Frame pacing. Animation time is logical; this only paces output.
        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

fn viewport_for(size: (u16, u16), show_hud: bool) -> Viewport {
    let (cols, rows) = size;
    Viewport {
        cols,
        rows: rows.saturating_sub(hud_rows_for_size(size, show_hud)).max(1),
    }
}

fn hud_rows_for_size(size: (u16, u16), show_hud: bool) -> u16 {
    if !show_hud {
        return 0;
    }
    let rows = size.1;
    if rows <= 1 {
        return 0;
    }
    (rows - 1).min(2)
}

pub fn build_hud(state: &SurfaceState, selected: CornerId, t: f64, fps: f32) -> String {
    let p = state.corners.get(selected);
    format!(
        "Mode: {} (Press SPACE or click to toggle)\n\
         t {:>8.3} | {:>5.1} fps | corner {} ({:.2}, {:.2}) | ? help",
        state.mode.label(),
        t,
        fps,
        selected.label(),
        p.x,
        p.y
    )
}

pub fn handle_markers(state: &SurfaceState, view: Viewport, control: &CornerControl) -> Vec<Marker> {
    let active = control.dragging().unwrap_or(control.selected());
    state
        .corners
        .iter()
        .map(|(id, p)| {
            let (c, r) = view.to_cell(p);
            Marker {
                col: c + 1,
                row: r + 1,
                active: id == active,
            }
        })
        .collect()
}

fn help_popup_text() -> &'static str {
    "Light Movements Hotkeys\n\
space / m / click  toggle river / dappled light\n\
drag a handle  move that corner\n\
1/2/3/4  select corner TL/TR/BR/BL\n\
arrows  nudge selected corner (shift: faster)\n\
r  reset corners\n\
c  show/hide corner handles\n\
i  toggle HUD\n\
? / h  toggle this help\n\
q / esc  quit"
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = (self.frames as f32) / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_names_the_mode() {
        let hud = build_hud(&SurfaceState::default(), CornerId::TopLeft, 0.016, 60.0);
        assert!(hud.starts_with("Mode: River (Press SPACE or click to toggle)"));
        assert!(hud.contains("corner TL"));
    }

    #[test]
    fn viewport_reserves_hud_rows() {
        assert_eq!(viewport_for((80, 24), true), Viewport { cols: 80, rows: 22 });
        assert_eq!(viewport_for((80, 24), false), Viewport { cols: 80, rows: 24 });
        assert_eq!(viewport_for((80, 2), true), Viewport { cols: 80, rows: 1 });
    }

    #[test]
    fn markers_sit_on_corners() {
        let view = Viewport { cols: 40, rows: 20 };
        let markers = handle_markers(&SurfaceState::default(), view, &CornerControl::default());
        assert_eq!(markers.len(), 4);
        assert_eq!((markers[0].col, markers[0].row), (1, 1));
        assert!(markers[0].active);
        assert_eq!((markers[2].col, markers[2].row), (40, 20));
    }
}
