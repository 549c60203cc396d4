//! Console panel: the message log at the bottom of the main window.

use gtk4::prelude::*;
use gtk4::{Box, Button, DropDown, Label, Orientation, ScrolledWindow, TextView, WrapMode};
use regenesis_core::{ConsoleLevel, ConsoleLog};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

/// Entries of the level filter drop-down, in display order.
const FILTER_LEVELS: [(&str, ConsoleLevel); 3] = [
    ("All", ConsoleLevel::Info),
    ("Warnings", ConsoleLevel::Warning),
    ("Errors", ConsoleLevel::Error),
];

pub struct ConsolePanel {
    pub widget: Box,
    text_view: TextView,
    filter: DropDown,
    log: RefCell<ConsoleLog>,
}

impl ConsolePanel {
    pub fn new() -> Rc<Self> {
        let widget = Box::new(Orientation::Vertical, 4);
        widget.set_margin_start(6);
        widget.set_margin_end(6);
        widget.set_margin_bottom(6);

        let header = Box::new(Orientation::Horizontal, 6);
        let title = Label::new(Some("Console"));
        title.add_css_class("heading");
        title.set_hexpand(true);
        title.set_xalign(0.0);
        header.append(&title);

        let labels: Vec<&str> = FILTER_LEVELS.iter().map(|(label, _)| *label).collect();
        let filter = DropDown::from_strings(&labels);
        filter.set_tooltip_text(Some("Minimum level"));
        header.append(&filter);

        let clear_btn = Button::from_icon_name("edit-clear-all-symbolic");
        clear_btn.set_tooltip_text(Some("Clear Console"));
        header.append(&clear_btn);
        widget.append(&header);

        let scroll = ScrolledWindow::new();
        scroll.set_hexpand(true);
        scroll.set_vexpand(true);
        scroll.set_min_content_height(120);
        scroll.add_css_class("view");
        scroll.add_css_class("console-view");

        let text_view = TextView::new();
        text_view.set_editable(false);
        text_view.set_monospace(true);
        text_view.set_wrap_mode(WrapMode::WordChar);
        text_view.set_cursor_visible(false);
        scroll.set_child(Some(&text_view));
        widget.append(&scroll);

        let panel = Rc::new(Self {
            widget,
            text_view,
            filter: filter.clone(),
            log: RefCell::new(ConsoleLog::new()),
        });

        let panel_filter = panel.clone();
        filter.connect_selected_notify(move |_| panel_filter.refresh());

        let panel_clear = panel.clone();
        clear_btn.connect_clicked(move |_| {
            panel_clear.log.borrow_mut().clear();
            panel_clear.refresh();
        });

        panel
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(ConsoleLevel::Info, text.into());
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(ConsoleLevel::Warning, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(ConsoleLevel::Error, text.into());
    }

    fn push(&self, level: ConsoleLevel, text: String) {
        let line = {
            let mut log = self.log.borrow_mut();
            let msg = log.push(level, text);
            (level >= self.min_level()).then(|| msg.formatted())
        };
        if let Some(line) = line {
            self.append_line(&line);
        }
    }

    fn min_level(&self) -> ConsoleLevel {
        FILTER_LEVELS
            .get(self.filter.selected() as usize)
            .map(|(_, level)| *level)
            .unwrap_or(ConsoleLevel::Info)
    }

    /// Re-renders the whole log with the current filter.
    pub fn refresh(&self) {
        let buffer = self.text_view.buffer();
        buffer.set_text("");
        let lines: Vec<String> = self
            .log
            .borrow()
            .filtered(self.min_level())
            .into_iter()
            .map(|m| m.formatted())
            .collect();
        for line in lines {
            self.append_line(&line);
        }
    }

    fn append_line(&self, line: &str) {
        let buffer = self.text_view.buffer();
        // GTK strings must not contain NUL bytes.
        let line: Cow<'_, str> = if line.contains('\0') {
            Cow::Owned(line.replace('\0', ""))
        } else {
            Cow::Borrowed(line)
        };

        let mut iter = buffer.end_iter();
        buffer.insert(&mut iter, &format!("{}\n", line));

        let mark = buffer.create_mark(None, &buffer.end_iter(), false);
        self.text_view.scroll_to_mark(&mark, 0.0, true, 0.0, 1.0);
        buffer.delete_mark(&mark);
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}
