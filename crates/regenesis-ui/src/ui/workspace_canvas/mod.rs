//! Workspace canvas - drawing area and pointer handling for region editing
//!
//! This module contains the WorkspaceCanvas struct which handles:
//! - Rendering the project area, region boundaries, rulers and readouts
//! - Forwarding press / drag / release, double and right clicks to the
//!   workspace controller
//! - Scroll zoom and keyboard shortcuts

mod input;
mod rendering;

use gtk4::gdk::ModifierType;
use gtk4::prelude::*;
use gtk4::{
    DrawingArea, EventControllerKey, EventControllerMotion, EventControllerScroll,
    EventControllerScrollFlags, GestureClick, GestureDrag,
};
use regenesis_designer::{NodeId, WorkspaceState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::console_panel::ConsolePanel;

type SelectedCallback = Box<dyn Fn(NodeId)>;
type ModifiedCallback = Box<dyn Fn()>;

pub struct WorkspaceCanvas {
    pub widget: DrawingArea,
    pub(crate) workspace: Rc<RefCell<WorkspaceState>>,
    pub(crate) console: Rc<ConsolePanel>,
    /// Last pointer position in canvas pixels; `None` while outside.
    pub(crate) mouse_pos: Cell<Option<(f64, f64)>>,
    /// Where the current button-1 drag started.
    pub(crate) drag_origin: Cell<(f64, f64)>,
    on_selected: RefCell<Option<SelectedCallback>>,
    on_modified: RefCell<Option<ModifiedCallback>>,
}

impl WorkspaceCanvas {
    pub fn new(workspace: Rc<RefCell<WorkspaceState>>, console: Rc<ConsolePanel>) -> Rc<Self> {
        let widget = DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .focusable(true)
            .css_classes(vec!["workspace-canvas"])
            .build();

        let canvas = Rc::new(Self {
            widget: widget.clone(),
            workspace,
            console,
            mouse_pos: Cell::new(None),
            drag_origin: Cell::new((0.0, 0.0)),
            on_selected: RefCell::new(None),
            on_modified: RefCell::new(None),
        });

        let canvas_draw = canvas.clone();
        widget.set_draw_func(move |drawing_area, cr, width, height| {
            // Keep the viewport in step with the widget size.
            if let Ok(mut state) = canvas_draw.workspace.try_borrow_mut() {
                state.set_canvas_size(width as f64, height as f64);
            }

            let state = canvas_draw.workspace.borrow();
            let style_context = drawing_area.style_context();
            Self::draw(
                cr,
                &state,
                width as f64,
                height as f64,
                canvas_draw.mouse_pos.get(),
                &style_context,
            );
        });

        let canvas_resize = canvas.clone();
        widget.connect_resize(move |_, width, height| {
            canvas_resize
                .workspace
                .borrow_mut()
                .canvas_resized(width as f64, height as f64);
        });

        // Mouse motion tracking
        let motion_ctrl = EventControllerMotion::new();
        let canvas_motion = canvas.clone();
        motion_ctrl.connect_motion(move |_, x, y| {
            canvas_motion.mouse_pos.set(Some((x, y)));
            canvas_motion.widget.queue_draw();
        });
        let canvas_leave = canvas.clone();
        motion_ctrl.connect_leave(move |_| {
            canvas_leave.mouse_pos.set(None);
            canvas_leave.widget.queue_draw();
        });
        widget.add_controller(motion_ctrl);

        // Wheel zooms around the cursor
        let scroll_ctrl = EventControllerScroll::new(EventControllerScrollFlags::VERTICAL);
        let canvas_scroll = canvas.clone();
        scroll_ctrl.connect_scroll(move |_, _dx, dy| {
            canvas_scroll.handle_scroll(dy);
            glib::Propagation::Stop
        });
        widget.add_controller(scroll_ctrl);

        // Press / drag / release on the primary button
        let drag_gesture = GestureDrag::new();
        drag_gesture.set_button(1);
        let canvas_drag = canvas.clone();
        drag_gesture.connect_drag_begin(move |_, x, y| {
            canvas_drag.handle_press(x, y);
        });
        let canvas_drag_update = canvas.clone();
        drag_gesture.connect_drag_update(move |_, offset_x, offset_y| {
            canvas_drag_update.handle_drag_update(offset_x, offset_y);
        });
        let canvas_drag_end = canvas.clone();
        drag_gesture.connect_drag_end(move |_, offset_x, offset_y| {
            canvas_drag_end.handle_drag_end(offset_x, offset_y);
        });
        widget.add_controller(drag_gesture);

        // Double click inserts a vertex
        let click_gesture = GestureClick::new();
        click_gesture.set_button(1);
        let canvas_click = canvas.clone();
        click_gesture.connect_pressed(move |_, n_press, x, y| {
            if n_press == 2 {
                canvas_click.handle_double_click(x, y);
            }
        });
        widget.add_controller(click_gesture);

        // Right click deletes a vertex / the last drawn point
        let right_click_gesture = GestureClick::new();
        right_click_gesture.set_button(3);
        let canvas_right_click = canvas.clone();
        right_click_gesture.connect_released(move |_, _n_press, x, y| {
            canvas_right_click.handle_right_click(x, y);
        });
        widget.add_controller(right_click_gesture);

        let key_controller = EventControllerKey::new();
        let canvas_key = canvas.clone();
        key_controller.connect_key_pressed(move |_, keyval, _keycode, modifier| {
            let ctrl = modifier.contains(ModifierType::CONTROL_MASK);
            if canvas_key.handle_key(keyval, ctrl) {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        widget.add_controller(key_controller);

        canvas
    }

    /// Called when a click on the canvas selects a region.
    pub fn connect_region_selected<F: Fn(NodeId) + 'static>(&self, f: F) {
        *self.on_selected.borrow_mut() = Some(Box::new(f));
    }

    /// Called when a canvas edit changes the project.
    pub fn connect_modified<F: Fn() + 'static>(&self, f: F) {
        *self.on_modified.borrow_mut() = Some(Box::new(f));
    }

    pub(crate) fn notify_selected(&self, id: NodeId) {
        if let Some(callback) = self.on_selected.borrow().as_ref() {
            callback(id);
        }
    }

    pub(crate) fn notify_modified(&self) {
        if let Some(callback) = self.on_modified.borrow().as_ref() {
            callback();
        }
    }

    pub fn queue_draw(&self) {
        self.widget.queue_draw();
    }
}
