use crate::surface::{CornerId, CornerSet, SurfaceEvents};
use crate::visual::Vec2;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

const NUDGE: f64 = 0.01;
const NUDGE_FAST: f64 = 0.05;
/// Grab radius around a handle, in terminal cells.
const GRAB_CELLS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    ToggleMode,
    ToggleHud,
    ToggleHelp,
    ToggleHandles,
    ResetCorners,
    SelectCorner(CornerId),
    Nudge { dx: f64, dy: f64 },
}

pub fn map_key(code: KeyCode, mods: KeyModifiers) -> Action {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return Action::Quit;
    }
    let step = if mods.contains(KeyModifiers::SHIFT) {
        NUDGE_FAST
    } else {
        NUDGE
    };

    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('m') | KeyCode::Char('M') => Action::ToggleMode,
        KeyCode::Char('i') | KeyCode::Char('I') => Action::ToggleHud,
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => Action::ToggleHelp,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::ToggleHandles,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::ResetCorners,
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = ch as usize - '1' as usize;
            CornerId::from_index(idx).map_or(Action::None, Action::SelectCorner)
        }
        KeyCode::Left => Action::Nudge { dx: -step, dy: 0.0 },
        KeyCode::Right => Action::Nudge { dx: step, dy: 0.0 },
        KeyCode::Up => Action::Nudge { dx: 0.0, dy: -step },
        KeyCode::Down => Action::Nudge { dx: 0.0, dy: step },
        _ => Action::None,
    }
}

/// Terminal cell grid covering the visual area (HUD rows excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Normalized surface position of a cell center, y top-down.
    pub fn to_surface(&self, col: u16, row: u16) -> Vec2 {
        let cols = self.cols.max(1) as f64;
        let rows = self.rows.max(1) as f64;
        Vec2::new((col as f64 + 0.5) / cols, (row as f64 + 0.5) / rows)
    }

    /// Cell under a normalized surface position, clamped to the grid.
    pub fn to_cell(&self, p: Vec2) -> (u16, u16) {
        let cols = self.cols.max(1);
        let rows = self.rows.max(1);
        let c = (p.x * cols as f64).floor().clamp(0.0, (cols - 1) as f64) as u16;
        let r = (p.y * rows as f64).floor().clamp(0.0, (rows - 1) as f64) as u16;
        (c, r)
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col < self.cols && row < self.rows
    }

    fn cell_distance(&self, p: Vec2, col: u16, row: u16) -> f64 {
        let (hc, hr) = self.to_cell(p);
        let dc = hc as f64 - col as f64;
        let dr = hr as f64 - row as f64;
        (dc * dc + dr * dr).sqrt()
    }
}

/// Corner handle interaction: selection for keyboard nudges, press-drag for
/// the mouse, and click-to-toggle away from the handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerControl {
    selected: CornerId,
    dragging: Option<CornerId>,
    pending_click: bool,
}

impl Default for CornerControl {
    fn default() -> Self {
        Self {
            selected: CornerId::TopLeft,
            dragging: None,
            pending_click: false,
        }
    }
}

impl CornerControl {
    pub fn selected(&self) -> CornerId {
        self.selected
    }

    pub fn dragging(&self) -> Option<CornerId> {
        self.dragging
    }

    pub fn select(&mut self, id: CornerId) {
        self.selected = id;
    }

    pub fn nudge(&self, corners: &CornerSet, dx: f64, dy: f64, events: &mut dyn SurfaceEvents) {
        let p = corners.get(self.selected);
        events.on_corner_drag(self.selected, p.x + dx, p.y + dy);
    }

    /// Nearest handle within the grab radius of a cell.
    pub fn hit_test(corners: &CornerSet, view: Viewport, col: u16, row: u16) -> Option<CornerId> {
        corners
            .iter()
            .map(|(id, p)| (id, view.cell_distance(p, col, row)))
            .filter(|(_, d)| *d <= GRAB_CELLS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Returns true when the event changed the surface.
    pub fn on_mouse(
        &mut self,
        ev: MouseEvent,
        view: Viewport,
        corners: &CornerSet,
        events: &mut dyn SurfaceEvents,
    ) -> bool {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !view.contains(ev.column, ev.row) {
                    return false;
                }
                match Self::hit_test(corners, view, ev.column, ev.row) {
                    Some(id) => {
                        self.dragging = Some(id);
                        self.selected = id;
                        self.pending_click = false;
                    }
                    None => self.pending_click = true,
                }
                false
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.pending_click = false;
                let Some(id) = self.dragging else {
                    return false;
                };
                let p = view.to_surface(ev.column, ev.row);
                events.on_corner_drag(id, p.x, p.y);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_click = self.pending_click && self.dragging.is_none();
                self.dragging = None;
                self.pending_click = false;
                if was_click {
                    events.on_mode_toggle();
                }
                was_click
            }
            _ => false,
        }
    }
}
