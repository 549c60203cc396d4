//! Project tree panel: an indented list of projects and their regions.

use gtk4::prelude::*;
use gtk4::{Box, Label, ListBox, ListBoxRow, Orientation, ScrolledWindow, SelectionMode};
use regenesis_designer::{NodeId, WorkspaceState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Indentation per tree level, in pixels.
const INDENT_PX: i32 = 18;

type SelectionCallback = std::boxed::Box<dyn Fn(Option<NodeId>)>;

pub struct ProjectTreePanel {
    pub widget: Box,
    list: ListBox,
    workspace: Rc<RefCell<WorkspaceState>>,
    /// Node shown by each row, by row index.
    rows: RefCell<Vec<NodeId>>,
    /// Set while the list is rebuilt so programmatic selection is not
    /// reported back.
    updating: Cell<bool>,
    on_selected: RefCell<Option<SelectionCallback>>,
}

impl ProjectTreePanel {
    pub fn new(workspace: Rc<RefCell<WorkspaceState>>) -> Rc<Self> {
        let widget = Box::new(Orientation::Vertical, 4);
        widget.set_margin_top(6);
        widget.set_margin_start(6);
        widget.set_margin_end(6);

        let title = Label::new(Some("Project"));
        title.add_css_class("heading");
        title.set_xalign(0.0);
        widget.append(&title);

        let list = ListBox::new();
        list.set_selection_mode(SelectionMode::Single);
        list.add_css_class("navigation-sidebar");

        let scroll = ScrolledWindow::new();
        scroll.set_vexpand(true);
        scroll.set_min_content_height(160);
        scroll.set_child(Some(&list));
        widget.append(&scroll);

        let panel = Rc::new(Self {
            widget,
            list: list.clone(),
            workspace,
            rows: RefCell::new(Vec::new()),
            updating: Cell::new(false),
            on_selected: RefCell::new(None),
        });

        let panel_select = panel.clone();
        list.connect_row_selected(move |_, row| {
            if panel_select.updating.get() {
                return;
            }
            let id = row.and_then(|r| {
                let index = usize::try_from(r.index()).ok()?;
                panel_select.rows.borrow().get(index).copied()
            });
            panel_select.workspace.borrow_mut().select_node(id);
            if let Some(callback) = panel_select.on_selected.borrow().as_ref() {
                callback(id);
            }
        });

        panel.refresh();
        panel
    }

    /// Called after the user picks a row; the workspace selection has
    /// already been updated.
    pub fn connect_selected<F: Fn(Option<NodeId>) + 'static>(&self, f: F) {
        *self.on_selected.borrow_mut() = Some(std::boxed::Box::new(f));
    }

    /// Rebuilds the rows from the workspace tree and re-selects the
    /// workspace's selected node.
    pub fn refresh(&self) {
        self.updating.set(true);

        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }

        let workspace = self.workspace.borrow();
        let mut rows = Vec::new();
        let mut selected_row = None;
        for (depth, node) in workspace.tree().walk() {
            let row = ListBoxRow::new();
            let line = Box::new(Orientation::Horizontal, 6);
            line.set_margin_start(6 + INDENT_PX * depth as i32);
            line.set_margin_top(2);
            line.set_margin_bottom(2);

            let name = Label::new(Some(&node.name));
            name.set_xalign(0.0);
            name.set_hexpand(true);
            if node.is_project() {
                name.add_css_class("heading");
            }
            line.append(&name);

            let kind = Label::new(Some(node.kind.type_name()));
            kind.add_css_class("dim-label");
            kind.add_css_class("caption");
            line.append(&kind);

            row.set_child(Some(&line));
            self.list.append(&row);

            if workspace.selected() == Some(node.id) {
                selected_row = Some(row.clone());
            }
            rows.push(node.id);
        }
        drop(workspace);

        *self.rows.borrow_mut() = rows;
        self.list.select_row(selected_row.as_ref());
        self.updating.set(false);
    }

    /// Highlights `id` without notifying the selection callback.
    pub fn show_selection(&self, id: Option<NodeId>) {
        let index = id.and_then(|id| self.rows.borrow().iter().position(|n| *n == id));
        self.updating.set(true);
        let row = index.and_then(|i| self.list.row_at_index(i32::try_from(i).ok()?));
        self.list.select_row(row.as_ref());
        self.updating.set(false);
    }
}
