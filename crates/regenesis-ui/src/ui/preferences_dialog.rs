//! Preferences window: theme, default location and development mode.

use gtk4::prelude::*;
use gtk4::{Align, Entry, StringList, Switch};
use libadwaita::prelude::*;
use libadwaita::{
    ActionRow, ColorScheme, ComboRow, PreferencesGroup, PreferencesPage, PreferencesWindow,
    StyleManager,
};
use regenesis_settings::{is_dark_theme, PreferencesManager, THEMES};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::error;

use super::console_panel::ConsolePanel;

/// Dark themes force the dark colour scheme; light ones follow the system.
pub fn apply_theme(theme: &str) {
    let scheme = if is_dark_theme(theme) {
        ColorScheme::ForceDark
    } else {
        ColorScheme::Default
    };
    StyleManager::default().set_color_scheme(scheme);
}

/// Parses a latitude/longitude field. Empty text clears the value.
pub(crate) fn parse_coordinate(text: &str, limit: f64) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| format!("'{}' is not a number", text))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(format!("must be between -{} and {}", limit, limit));
    }
    Ok(Some(value))
}

pub struct PreferencesDialog {
    window: PreferencesWindow,
    preferences: Rc<RefCell<PreferencesManager>>,
    console: Rc<ConsolePanel>,
}

impl PreferencesDialog {
    pub fn new(
        preferences: Rc<RefCell<PreferencesManager>>,
        console: Rc<ConsolePanel>,
        parent: Option<&gtk4::Window>,
    ) -> Rc<Self> {
        let window = PreferencesWindow::builder()
            .title("Preferences")
            .modal(true)
            .default_width(560)
            .default_height(420)
            .build();
        if let Some(parent) = parent {
            window.set_transient_for(Some(parent));
        }

        let dialog = Rc::new(Self {
            window,
            preferences,
            console,
        });
        dialog.setup_page();
        dialog
    }

    pub fn present(&self) {
        self.window.present();
    }

    fn setup_page(self: &Rc<Self>) {
        let page = PreferencesPage::builder()
            .title("General")
            .icon_name("preferences-system-symbolic")
            .build();

        let appearance = PreferencesGroup::builder().title("Appearance").build();
        appearance.add(&self.theme_row());
        page.add(&appearance);

        let location = PreferencesGroup::builder()
            .title("Location")
            .description("Default coordinates for new projects")
            .build();
        let (latitude, longitude) = self.location_rows();
        location.add(&latitude);
        location.add(&longitude);
        page.add(&location);

        let advanced = PreferencesGroup::builder().title("Advanced").build();
        advanced.add(&self.development_row());
        page.add(&advanced);

        self.window.add(&page);
    }

    fn theme_row(self: &Rc<Self>) -> ComboRow {
        let model = StringList::new(THEMES);
        let current = self.preferences.borrow().theme();
        let row = ComboRow::builder()
            .title("Theme")
            .model(&model)
            .selected(THEMES.iter().position(|t| *t == current).unwrap_or(0) as u32)
            .build();

        let dialog = self.clone();
        row.connect_selected_notify(move |r| {
            let Some(theme) = THEMES.get(r.selected() as usize) else {
                return;
            };
            if let Err(e) = dialog.preferences.borrow_mut().set_theme(theme) {
                error!("Failed to save theme: {}", e);
                dialog.console.error(format!("Could not save theme: {}", e));
                return;
            }
            apply_theme(theme);
            dialog.console.info(format!("Theme set to {}", theme));
        });
        row
    }

    fn location_rows(self: &Rc<Self>) -> (ActionRow, ActionRow) {
        let (latitude, longitude) = match self.preferences.borrow().location() {
            Some((lat, lon)) => (lat.to_string(), lon.to_string()),
            None => (String::new(), String::new()),
        };

        let lat_row = ActionRow::builder()
            .title("Latitude")
            .subtitle("Degrees, -90 to 90")
            .build();
        let lat_entry = Entry::builder()
            .text(latitude)
            .valign(Align::Center)
            .width_chars(14)
            .build();
        lat_row.add_suffix(&lat_entry);

        let lon_row = ActionRow::builder()
            .title("Longitude")
            .subtitle("Degrees, -180 to 180")
            .build();
        let lon_entry = Entry::builder()
            .text(longitude)
            .valign(Align::Center)
            .width_chars(14)
            .build();
        lon_row.add_suffix(&lon_entry);

        for entry in [&lat_entry, &lon_entry] {
            let dialog = self.clone();
            let lat_entry = lat_entry.clone();
            let lon_entry = lon_entry.clone();
            entry.connect_activate(move |_| dialog.save_location(&lat_entry, &lon_entry));
        }

        (lat_row, lon_row)
    }

    fn save_location(&self, lat_entry: &Entry, lon_entry: &Entry) {
        let latitude = parse_coordinate(&lat_entry.text(), 90.0);
        let longitude = parse_coordinate(&lon_entry.text(), 180.0);
        mark_invalid(lat_entry, latitude.is_err());
        mark_invalid(lon_entry, longitude.is_err());

        match (latitude, longitude) {
            (Ok(lat), Ok(lon)) => {
                if let Err(e) = self.preferences.borrow_mut().set_location(lat, lon) {
                    error!("Failed to save location: {}", e);
                    self.console.error(format!("Could not save location: {}", e));
                }
            }
            (Err(e), _) => self.console.warning(format!("Latitude {}", e)),
            (_, Err(e)) => self.console.warning(format!("Longitude {}", e)),
        }
    }

    fn development_row(self: &Rc<Self>) -> ActionRow {
        let row = ActionRow::builder()
            .title("Development Mode")
            .subtitle("Load the sample project on start-up")
            .build();
        let switch = Switch::builder()
            .active(self.preferences.borrow().is_development_mode())
            .valign(Align::Center)
            .build();

        let dialog = self.clone();
        switch.connect_state_set(move |_, state| {
            if let Err(e) = dialog.preferences.borrow_mut().set_development_mode(state) {
                error!("Failed to save development mode: {}", e);
            }
            glib::Propagation::Proceed
        });

        row.add_suffix(&switch);
        row.set_activatable_widget(Some(&switch));
        row
    }
}

fn mark_invalid(entry: &Entry, invalid: bool) {
    if invalid {
        entry.add_css_class("error");
    } else {
        entry.remove_css_class("error");
    }
}
