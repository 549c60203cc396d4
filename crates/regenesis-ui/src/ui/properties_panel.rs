//! Properties panel: editable attributes of the selected tree node.

use gtk4::prelude::*;
use gtk4::{Align, Box, DropDown, Entry, EventControllerFocus, Grid, Label, Orientation};
use regenesis_designer::{NodeId, Property, PropertyValue, WorkspaceState};
use std::cell::RefCell;
use std::rc::Rc;

use super::console_panel::ConsolePanel;
use super::file_dialog::{parent_window, show_error_dialog};

type ChangeCallback = std::boxed::Box<dyn Fn(NodeId, &str)>;

pub struct PropertiesPanel {
    pub widget: Box,
    title: Label,
    grid: Grid,
    workspace: Rc<RefCell<WorkspaceState>>,
    console: Rc<ConsolePanel>,
    on_changed: RefCell<Option<ChangeCallback>>,
}

impl PropertiesPanel {
    pub fn new(workspace: Rc<RefCell<WorkspaceState>>, console: Rc<ConsolePanel>) -> Rc<Self> {
        let widget = Box::new(Orientation::Vertical, 6);
        widget.set_margin_top(6);
        widget.set_margin_start(6);
        widget.set_margin_end(6);
        widget.set_margin_bottom(6);

        let title = Label::new(Some("Properties"));
        title.add_css_class("heading");
        title.set_xalign(0.0);
        widget.append(&title);

        let grid = Grid::new();
        grid.set_row_spacing(6);
        grid.set_column_spacing(8);
        widget.append(&grid);

        let panel = Rc::new(Self {
            widget,
            title,
            grid,
            workspace,
            console,
            on_changed: RefCell::new(None),
        });
        panel.refresh();
        panel
    }

    /// Called after an edit was applied, with the node and property key.
    pub fn connect_changed<F: Fn(NodeId, &str) + 'static>(&self, f: F) {
        *self.on_changed.borrow_mut() = Some(std::boxed::Box::new(f));
    }

    /// Rebuilds the rows for the workspace's selected node.
    pub fn refresh(self: &Rc<Self>) {
        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }

        let (id, heading, rows) = {
            let workspace = self.workspace.borrow();
            match workspace.selected().and_then(|id| workspace.tree().get(id)) {
                Some(node) => (
                    Some(node.id),
                    format!("Properties: {}", node.name),
                    node.properties(),
                ),
                None => (None, "Properties".to_string(), Vec::new()),
            }
        };
        self.title.set_text(&heading);

        let Some(id) = id else {
            let hint = Label::new(Some("Select a project or region"));
            hint.add_css_class("dim-label");
            hint.set_xalign(0.0);
            self.grid.attach(&hint, 0, 0, 2, 1);
            return;
        };

        for (row, property) in rows.into_iter().enumerate() {
            let row = row as i32;
            let label = Label::new(Some(&property.label));
            label.set_xalign(0.0);
            label.set_halign(Align::Start);
            self.grid.attach(&label, 0, row, 1, 1);

            let editor = self.build_editor(id, property);
            editor.set_hexpand(true);
            self.grid.attach(&editor, 1, row, 1, 1);
        }
    }

    fn build_editor(self: &Rc<Self>, id: NodeId, property: Property) -> gtk4::Widget {
        let key = property.key;
        match property.value {
            PropertyValue::Choice { selected, options } => {
                let labels: Vec<&str> = options.iter().map(String::as_str).collect();
                let dropdown = DropDown::from_strings(&labels);
                if let Some(index) = options.iter().position(|o| *o == selected) {
                    dropdown.set_selected(index as u32);
                }

                let panel = self.clone();
                dropdown.connect_selected_notify(move |dd| {
                    if let Some(value) = options.get(dd.selected() as usize) {
                        if *value != selected {
                            panel.apply(id, &key, value);
                        }
                    }
                });
                dropdown.upcast()
            }
            value => {
                let entry = Entry::new();
                entry.set_text(&value.display_text());
                if matches!(value, PropertyValue::Number(_)) {
                    entry.set_input_purpose(gtk4::InputPurpose::Number);
                }

                // Last text handed to `apply`, so leaving the field after
                // pressing Enter does not submit the same value twice.
                let committed = Rc::new(RefCell::new(value.display_text()));
                let commit = {
                    let panel = self.clone();
                    move |text: &str| {
                        if *committed.borrow() == text {
                            return;
                        }
                        *committed.borrow_mut() = text.to_string();
                        panel.apply(id, &key, text);
                    }
                };
                let commit = Rc::new(commit);

                let commit_activate = commit.clone();
                entry.connect_activate(move |e| commit_activate(e.text().as_str()));

                let focus = EventControllerFocus::new();
                let entry_focus = entry.clone();
                focus.connect_leave(move |_| commit(entry_focus.text().as_str()));
                entry.add_controller(focus);
                entry.upcast()
            }
        }
    }

    /// Applies one edit. The panel is rebuilt from an idle callback because
    /// this runs inside the editor widget's own signal handler.
    fn apply(self: &Rc<Self>, id: NodeId, key: &str, raw: &str) {
        let result = self.workspace.borrow_mut().set_property(id, key, raw);
        match result {
            Ok(()) => {
                tracing::debug!("Set {} = {:?} on {}", key, raw, id);
                if let Some(callback) = self.on_changed.borrow().as_ref() {
                    callback(id, key);
                }
            }
            Err(e) => {
                self.console.error(format!("Invalid {}: {}", key, e));
                show_error_dialog(
                    "Invalid value",
                    &e.to_string(),
                    parent_window(&self.widget).as_ref(),
                );
            }
        }

        let panel = self.clone();
        glib::idle_add_local_once(move || panel.refresh());
    }
}
