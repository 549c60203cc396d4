//! Plant database window: filtered plant list, selection summary and
//! JSON import/export.

use gtk4::prelude::*;
use gtk4::{
    Align, Box, Button, DropDown, Entry, Label, ListBox, ListBoxRow, Orientation, ScrolledWindow,
    SelectionMode, SpinButton, Window,
};
use regenesis_plants::{Plant, PlantDatabase};
use std::cell::RefCell;
use std::rc::Rc;

use super::console_panel::ConsolePanel;
use super::file_dialog::{pick_json_file, save_json_file};

const ANY_COLOR: &str = "Any colour";

/// Plants passing the height bounds and, when given, the colour.
pub(crate) fn visible_plants(
    db: &PlantDatabase,
    min_height: Option<u32>,
    max_height: Option<u32>,
    color: Option<&str>,
) -> Vec<Plant> {
    db.filter_by_height(min_height, max_height)
        .into_iter()
        .filter(|p| color.is_none_or(|c| p.color.eq_ignore_ascii_case(c)))
        .cloned()
        .collect()
}

/// `"yellow: 2, pink: 1"`, or a hint when nothing is selected.
pub(crate) fn distribution_summary(db: &PlantDatabase) -> String {
    let distribution = db.color_distribution();
    if distribution.is_empty() {
        return "No plants selected".to_string();
    }
    distribution
        .iter()
        .map(|(color, count)| format!("{}: {}", color, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A spin value of zero leaves that side of the height filter open.
fn spin_bound(spin: &SpinButton) -> Option<u32> {
    let value = spin.value_as_int();
    (value > 0).then_some(value as u32)
}

pub struct PlantsDialog {
    window: Window,
    db: Rc<RefCell<PlantDatabase>>,
    console: Rc<ConsolePanel>,
    list: ListBox,
    min_height: SpinButton,
    max_height: SpinButton,
    color: DropDown,
    /// Colour choices behind `color`, index 0 being "any".
    color_options: RefCell<Vec<String>>,
    /// Plants shown by each row, by row index.
    shown: RefCell<Vec<Plant>>,
    summary: Label,
}

impl PlantsDialog {
    pub fn new(
        db: Rc<RefCell<PlantDatabase>>,
        console: Rc<ConsolePanel>,
        parent: Option<&gtk4::Window>,
    ) -> Rc<Self> {
        let window = Window::builder()
            .title("Plant Database")
            .default_width(520)
            .default_height(560)
            .modal(false)
            .build();
        if let Some(parent) = parent {
            window.set_transient_for(Some(parent));
        }

        let content = Box::new(Orientation::Vertical, 8);
        content.set_margin_top(12);
        content.set_margin_bottom(12);
        content.set_margin_start(12);
        content.set_margin_end(12);

        // Filters
        let filters = Box::new(Orientation::Horizontal, 6);
        filters.append(&Label::new(Some("Height")));
        let min_height = SpinButton::with_range(0.0, 20.0, 1.0);
        min_height.set_tooltip_text(Some("Minimum height in feet (0 = any)"));
        filters.append(&min_height);
        filters.append(&Label::new(Some("to")));
        let max_height = SpinButton::with_range(0.0, 20.0, 1.0);
        max_height.set_tooltip_text(Some("Maximum height in feet (0 = any)"));
        filters.append(&max_height);
        filters.append(&Label::new(Some("ft")));
        let color = DropDown::from_strings(&[ANY_COLOR]);
        color.set_hexpand(true);
        color.set_halign(Align::End);
        filters.append(&color);
        content.append(&filters);

        let list = ListBox::new();
        list.set_selection_mode(SelectionMode::Multiple);
        list.add_css_class("boxed-list");
        let scroll = ScrolledWindow::new();
        scroll.set_vexpand(true);
        scroll.set_child(Some(&list));
        content.append(&scroll);

        // Selection
        let selection_box = Box::new(Orientation::Horizontal, 6);
        let add_selected = Button::with_label("Add to Selection");
        let clear_selected = Button::with_label("Clear Selection");
        selection_box.append(&add_selected);
        selection_box.append(&clear_selected);
        content.append(&selection_box);
        let summary = Label::new(None);
        summary.set_xalign(0.0);
        summary.add_css_class("dim-label");
        content.append(&summary);

        // New plant
        let add_box = Box::new(Orientation::Horizontal, 6);
        let name_entry = Entry::builder()
            .placeholder_text("Name")
            .hexpand(true)
            .build();
        let height_spin = SpinButton::with_range(1.0, 20.0, 1.0);
        let color_entry = Entry::builder()
            .placeholder_text("Colour")
            .width_chars(10)
            .build();
        let add_plant = Button::from_icon_name("list-add-symbolic");
        add_plant.set_tooltip_text(Some("Add Plant"));
        add_box.append(&name_entry);
        add_box.append(&height_spin);
        add_box.append(&color_entry);
        add_box.append(&add_plant);
        content.append(&add_box);

        // Import / export
        let file_box = Box::new(Orientation::Horizontal, 6);
        file_box.set_halign(Align::End);
        let import_btn = Button::with_label("Import…");
        let export_btn = Button::with_label("Export…");
        file_box.append(&import_btn);
        file_box.append(&export_btn);
        content.append(&file_box);

        window.set_child(Some(&content));

        let dialog = Rc::new(Self {
            window,
            db,
            console,
            list,
            min_height: min_height.clone(),
            max_height: max_height.clone(),
            color: color.clone(),
            color_options: RefCell::new(Vec::new()),
            shown: RefCell::new(Vec::new()),
            summary,
        });

        for spin in [&min_height, &max_height] {
            let dialog_filter = dialog.clone();
            spin.connect_value_changed(move |_| dialog_filter.refresh_list());
        }
        let dialog_color = dialog.clone();
        color.connect_selected_notify(move |_| dialog_color.refresh_list());

        let dialog_add = dialog.clone();
        add_selected.connect_clicked(move |_| dialog_add.add_selected_rows());

        let dialog_clear = dialog.clone();
        clear_selected.connect_clicked(move |_| {
            dialog_clear.db.borrow_mut().clear_selection();
            dialog_clear.refresh_summary();
        });

        let dialog_new = dialog.clone();
        add_plant.connect_clicked(move |_| {
            let name = name_entry.text();
            let height = height_spin.value_as_int().max(0) as u32;
            let colour = color_entry.text();
            let result = dialog_new
                .db
                .borrow_mut()
                .add_plant(name.as_str(), height, colour.as_str())
                .map(|p| p.to_string());
            match result {
                Ok(added) => {
                    dialog_new.console.info(format!("Added {}", added));
                    name_entry.set_text("");
                    color_entry.set_text("");
                    dialog_new.refresh();
                }
                Err(e) => dialog_new.console.warning(e.to_string()),
            }
        });

        let dialog_import = dialog.clone();
        import_btn.connect_clicked(move |_| dialog_import.import());

        let dialog_export = dialog.clone();
        export_btn.connect_clicked(move |_| dialog_export.export());

        dialog.refresh();
        dialog
    }

    pub fn present(&self) {
        self.window.present();
    }

    /// Rebuilds the colour choices, the list and the summary.
    fn refresh(&self) {
        let colors = self.db.borrow().colors();
        let previous = self.selected_color();

        let mut labels: Vec<&str> = vec![ANY_COLOR];
        labels.extend(colors.iter().map(String::as_str));
        let model = gtk4::StringList::new(&labels);
        let selected = previous
            .and_then(|c| colors.iter().position(|o| *o == c))
            .map(|i| i + 1)
            .unwrap_or(0);
        *self.color_options.borrow_mut() = colors;

        self.color.set_model(Some(&model));
        self.color.set_selected(selected as u32);

        self.refresh_list();
        self.refresh_summary();
    }

    fn selected_color(&self) -> Option<String> {
        let index = self.color.selected() as usize;
        index
            .checked_sub(1)
            .and_then(|i| self.color_options.borrow().get(i).cloned())
    }

    fn refresh_list(&self) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }

        let color = self.selected_color();
        let plants = visible_plants(
            &self.db.borrow(),
            spin_bound(&self.min_height),
            spin_bound(&self.max_height),
            color.as_deref(),
        );

        for plant in &plants {
            let row = ListBoxRow::new();
            let label = Label::new(Some(&plant.to_string()));
            label.set_xalign(0.0);
            label.set_margin_top(4);
            label.set_margin_bottom(4);
            label.set_margin_start(8);
            row.set_child(Some(&label));
            self.list.append(&row);
        }
        *self.shown.borrow_mut() = plants;
    }

    fn refresh_summary(&self) {
        self.summary.set_text(&distribution_summary(&self.db.borrow()));
    }

    fn add_selected_rows(&self) {
        let picked: Vec<Plant> = {
            let shown = self.shown.borrow();
            self.list
                .selected_rows()
                .iter()
                .filter_map(|row| usize::try_from(row.index()).ok())
                .filter_map(|i| shown.get(i).cloned())
                .collect()
        };
        if picked.is_empty() {
            return;
        }
        let mut db = self.db.borrow_mut();
        for plant in picked {
            db.add_to_selection(plant);
        }
        drop(db);
        self.list.unselect_all();
        self.refresh_summary();
    }

    fn import(&self) {
        let Some(path) = pick_json_file("Import Plants") else {
            return;
        };
        match PlantDatabase::load_from_file(&path) {
            Ok(loaded) => {
                let count = loaded.len();
                *self.db.borrow_mut() = loaded;
                self.console
                    .info(format!("Imported {} plants from {}", count, path.display()));
                self.refresh();
            }
            Err(e) => self.console.error(format!("Import failed: {}", e)),
        }
    }

    fn export(&self) {
        let Some(path) = save_json_file("Export Plants", "plants.json") else {
            return;
        };
        match self.db.borrow().save_to_file(&path) {
            Ok(()) => self
                .console
                .info(format!("Exported plants to {}", path.display())),
            Err(e) => self.console.error(format!("Export failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_plants_combines_filters() {
        let db = PlantDatabase::starter_catalog();
        let tall_purple = visible_plants(&db, Some(4), None, Some("Purple"));
        assert_eq!(tall_purple.len(), 1);
        assert_eq!(tall_purple[0].name, "New England Aster");

        assert_eq!(visible_plants(&db, None, None, None).len(), db.len());
    }

    #[test]
    fn test_distribution_summary() {
        let mut db = PlantDatabase::starter_catalog();
        assert_eq!(distribution_summary(&db), "No plants selected");

        let picks: Vec<Plant> = db.filter_by_color("yellow").into_iter().cloned().collect();
        for plant in picks {
            db.add_to_selection(plant);
        }
        let pink = db.find("Joe Pye Weed").cloned().unwrap();
        db.add_to_selection(pink);
        assert_eq!(distribution_summary(&db), "pink: 1, yellow: 2");
    }
}
