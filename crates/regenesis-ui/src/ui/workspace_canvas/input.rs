//! Input handling for the workspace canvas

use super::*;
use gtk4::gdk::Key;
use regenesis_designer::{EditMode, Point, PointerOutcome};

use crate::helpers::copy_to_clipboard;

/// Clipboard text for a world position.
pub(crate) fn format_coordinates(world: Point, unit_abbreviation: &str) -> String {
    format!(
        "X {:.2} {u}  Y {:.2} {u}",
        world.x,
        world.y,
        u = unit_abbreviation
    )
}

impl WorkspaceCanvas {
    pub(super) fn handle_press(&self, x: f64, y: f64) {
        self.widget.grab_focus();
        self.drag_origin.set((x, y));
        self.workspace.borrow_mut().pointer_pressed(x, y);
    }

    pub(super) fn handle_drag_update(&self, offset_x: f64, offset_y: f64) {
        let (ox, oy) = self.drag_origin.get();
        let (x, y) = (ox + offset_x, oy + offset_y);
        self.mouse_pos.set(Some((x, y)));
        if self.workspace.borrow_mut().pointer_moved(x, y) {
            self.widget.queue_draw();
        }
    }

    pub(super) fn handle_drag_end(&self, offset_x: f64, offset_y: f64) {
        let (ox, oy) = self.drag_origin.get();
        let outcome = self
            .workspace
            .borrow_mut()
            .pointer_released(ox + offset_x, oy + offset_y);

        match outcome {
            PointerOutcome::Nothing | PointerOutcome::Panned => {}
            PointerOutcome::VertexMoved { .. } => self.notify_modified(),
            PointerOutcome::PointAdded { count } => {
                tracing::debug!("Boundary point {} placed", count);
            }
            PointerOutcome::DrawingClosed { .. } => {
                self.console.info("Boundary closed");
                self.notify_modified();
            }
            PointerOutcome::RegionSelected(id) => self.notify_selected(id),
        }
        self.widget.queue_draw();
    }

    pub(super) fn handle_double_click(&self, x: f64, y: f64) {
        let inserted = self.workspace.borrow_mut().double_click(x, y);
        if let Some(index) = inserted {
            tracing::debug!("Inserted vertex {}", index);
            self.notify_modified();
            self.widget.queue_draw();
        }
    }

    pub(super) fn handle_right_click(&self, x: f64, y: f64) {
        let result = self.workspace.borrow_mut().secondary_click(x, y);
        match result {
            Ok(Some(_)) => {
                if self.workspace.borrow().mode() == EditMode::EditPolygon {
                    self.notify_modified();
                }
                self.widget.queue_draw();
            }
            Ok(None) => {}
            Err(e) => self.console.warning(format!("Cannot delete vertex: {}", e)),
        }
    }

    pub(super) fn handle_scroll(&self, dy: f64) {
        if dy == 0.0 {
            return;
        }
        let (x, y) = self.mouse_pos.get().unwrap_or_else(|| {
            (
                self.widget.width() as f64 / 2.0,
                self.widget.height() as f64 / 2.0,
            )
        });
        self.workspace.borrow_mut().scroll_zoom(x, y, dy < 0.0);
        self.widget.queue_draw();
    }

    /// Returns `true` when the key was consumed.
    pub(super) fn handle_key(&self, keyval: Key, ctrl: bool) -> bool {
        match keyval {
            Key::c | Key::C if ctrl => {
                self.copy_cursor_coordinates();
                true
            }
            Key::Escape => {
                let mut state = self.workspace.borrow_mut();
                if state.is_redrawing() {
                    state.cancel_drawing();
                    drop(state);
                    self.console.info("Boundary redraw cancelled");
                } else {
                    state.cancel_gesture();
                }
                self.widget.queue_draw();
                true
            }
            Key::Return | Key::KP_Enter => {
                if !self.workspace.borrow().is_redrawing() {
                    return false;
                }
                self.finish_drawing();
                true
            }
            Key::plus | Key::equal | Key::KP_Add => {
                self.workspace.borrow_mut().viewport_mut().zoom_in();
                self.widget.queue_draw();
                true
            }
            Key::minus | Key::KP_Subtract => {
                self.workspace.borrow_mut().viewport_mut().zoom_out();
                self.widget.queue_draw();
                true
            }
            Key::Home => {
                self.auto_zoom();
                true
            }
            _ => false,
        }
    }

    pub fn auto_zoom(&self) {
        self.workspace.borrow_mut().auto_zoom();
        self.widget.queue_draw();
    }

    pub fn begin_redraw(&self) {
        let result = self.workspace.borrow_mut().begin_redraw();
        match result {
            Ok(()) => self
                .console
                .info("Click to place boundary points; click the first point or press Enter to close"),
            Err(e) => self.console.warning(format!("Cannot redraw boundary: {}", e)),
        }
        self.widget.queue_draw();
    }

    fn finish_drawing(&self) {
        let result = self.workspace.borrow_mut().finish_drawing();
        match result {
            Ok(()) => {
                self.console.info("Boundary closed");
                self.notify_modified();
            }
            Err(e) => self.console.warning(format!("Cannot close boundary: {}", e)),
        }
        self.widget.queue_draw();
    }

    fn copy_cursor_coordinates(&self) {
        let Some((x, y)) = self.mouse_pos.get() else {
            return;
        };
        let text = {
            let state = self.workspace.borrow();
            let unit = state
                .active_project_properties()
                .map(|p| p.unit)
                .unwrap_or_default();
            format_coordinates(state.viewport().screen_to_world(x, y), unit.abbreviation())
        };
        if copy_to_clipboard(&text) {
            self.console.info(format!("Copied {}", text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        assert_eq!(
            format_coordinates(Point::new(12.5, -3.0), "ft"),
            "X 12.50 ft  Y -3.00 ft"
        );
    }
}
