use gtk4::prelude::*;
use gtk4::{
    AboutDialog, ApplicationWindow, Box, CssProvider, HeaderBar, License, Orientation, Paned,
    PopoverMenuBar, StyleContext,
};
use libadwaita::Application as AdwApplication;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use regenesis_designer::{sample_project, NodeId, WorkspaceState};
use regenesis_plants::PlantDatabase;
use regenesis_settings::PreferencesManager;

use crate::ui::file_dialog::{parent_window, pick_project_file, save_project_file, show_error_dialog};
use crate::ui::plants_dialog::PlantsDialog;
use crate::ui::preferences_dialog::{apply_theme, PreferencesDialog};
use crate::ui::{ConsolePanel, ProjectTreePanel, PropertiesPanel, WorkspaceCanvas};

pub const APP_ID: &str = "io.github.regenesis.ReGenesis";

/// Runs the application until the main window closes.
pub fn main() -> anyhow::Result<()> {
    let app = AdwApplication::builder().application_id(APP_ID).build();

    app.connect_startup(|_| {
        load_css();
    });

    app.connect_activate(|app| {
        let window = MainWindow::new(app);
        window.present();
    });

    let status = app.run();
    if status != glib::ExitCode::SUCCESS {
        anyhow::bail!("Application exited with status {:?}", status);
    }
    Ok(())
}

fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_data(include_str!("ui/style.css"));

    match gtk4::gdk::Display::default() {
        Some(display) => StyleContext::add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => tracing::error!("No display available for application styles"),
    }
}

fn open_preferences() -> PreferencesManager {
    match PreferencesManager::new() {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::error!("Falling back to local preferences: {}", e);
            PreferencesManager::with_path(
                Path::new(regenesis_settings::preferences::PREFERENCES_DIR)
                    .join(regenesis_settings::preferences::PREFERENCES_FILE),
            )
        }
    }
}

/// The application window and the panels it wires together.
struct MainWindow {
    window: ApplicationWindow,
    workspace: Rc<RefCell<WorkspaceState>>,
    preferences: Rc<RefCell<PreferencesManager>>,
    plants: Rc<RefCell<PlantDatabase>>,
    console: Rc<ConsolePanel>,
    tree: Rc<ProjectTreePanel>,
    properties: Rc<PropertiesPanel>,
    canvas: Rc<WorkspaceCanvas>,
}

impl MainWindow {
    fn new(app: &AdwApplication) -> Rc<Self> {
        // Initialize backend state
        let preferences = Rc::new(RefCell::new(open_preferences()));
        apply_theme(&preferences.borrow().theme());

        let workspace = Rc::new(RefCell::new(WorkspaceState::new()));
        let plants = Rc::new(RefCell::new(PlantDatabase::starter_catalog()));

        let console = ConsolePanel::new();
        let tree = ProjectTreePanel::new(workspace.clone());
        let properties = PropertiesPanel::new(workspace.clone(), console.clone());
        let canvas = WorkspaceCanvas::new(workspace.clone(), console.clone());

        // Build UI
        let window = ApplicationWindow::builder()
            .application(app)
            .title("ReGenesis")
            .default_width(1280)
            .default_height(860)
            .build();

        let header = HeaderBar::new();
        window.set_titlebar(Some(&header));

        let main_box = Box::new(Orientation::Vertical, 0);
        let menu_bar = PopoverMenuBar::from_model(Some(&build_menu_model()));
        main_box.append(&menu_bar);

        let sidebar = Paned::new(Orientation::Vertical);
        sidebar.set_start_child(Some(&tree.widget));
        sidebar.set_end_child(Some(&properties.widget));
        sidebar.set_position(300);

        let content = Paned::new(Orientation::Horizontal);
        content.set_start_child(Some(&sidebar));
        content.set_end_child(Some(&canvas.widget));
        content.set_position(320);
        content.set_shrink_start_child(false);

        let vertical = Paned::new(Orientation::Vertical);
        vertical.set_vexpand(true);
        vertical.set_start_child(Some(&content));
        vertical.set_end_child(Some(&console.widget));
        vertical.set_position(640);
        main_box.append(&vertical);

        window.set_child(Some(&main_box));

        let main_window = Rc::new(Self {
            window,
            workspace,
            preferences,
            plants,
            console,
            tree,
            properties,
            canvas,
        });

        main_window.connect_panels();
        main_window.setup_actions(app);
        main_window.load_startup_project();
        main_window
    }

    fn present(&self) {
        self.window.present();
    }

    fn connect_panels(self: &Rc<Self>) {
        let win = self.clone();
        self.tree.connect_selected(move |_| {
            win.properties.refresh();
            win.canvas.queue_draw();
        });

        let win = self.clone();
        self.properties.connect_changed(move |_, key| {
            if key == "name" {
                win.tree.refresh();
            }
            win.canvas.queue_draw();
            win.update_title();
        });

        let win = self.clone();
        self.canvas.connect_region_selected(move |id| {
            win.tree.show_selection(Some(id));
            win.properties.refresh();
        });

        let win = self.clone();
        self.canvas.connect_modified(move || win.update_title());
    }

    fn setup_actions(self: &Rc<Self>, app: &AdwApplication) {
        let actions: [(&str, fn(&Rc<Self>)); 13] = [
            ("new_project", Self::new_project),
            ("open", Self::open),
            ("save", Self::save),
            ("save_as", Self::save_as),
            ("quit", Self::quit),
            ("add_region", Self::add_region),
            ("delete_node", Self::delete_node),
            ("redraw_boundary", Self::redraw_boundary),
            ("auto_zoom", Self::auto_zoom),
            ("plants", Self::show_plants),
            ("preferences", Self::show_preferences),
            ("about", Self::show_about),
            ("zoom_reset", Self::zoom_reset),
        ];

        for (name, handler) in actions {
            let action = gio::SimpleAction::new(name, None);
            let win = self.clone();
            action.connect_activate(move |_, _| handler(&win));
            app.add_action(&action);
        }

        app.set_accels_for_action("app.new_project", &["<Control>n"]);
        app.set_accels_for_action("app.open", &["<Control>o"]);
        app.set_accels_for_action("app.save", &["<Control>s"]);
        app.set_accels_for_action("app.save_as", &["<Control><Shift>s"]);
        app.set_accels_for_action("app.quit", &["<Control>q"]);
        app.set_accels_for_action("app.add_region", &["<Control>r"]);
        app.set_accels_for_action("app.delete_node", &["Delete"]);
        app.set_accels_for_action("app.auto_zoom", &["<Control>0"]);
        app.set_accels_for_action("app.plants", &["<Control>p"]);
        app.set_accels_for_action("app.preferences", &["<Control>comma"]);
    }

    /// In development mode the sample project is loaded and selected.
    fn load_startup_project(&self) {
        if !self.preferences.borrow().is_development_mode() {
            self.console.info("Ready");
            self.refresh_all();
            return;
        }

        let project = self.workspace.borrow_mut().load_tree(sample_project());
        self.workspace.borrow_mut().select_node(project);
        self.console.info("Development mode: loaded sample project");
        self.refresh_all();
    }

    fn refresh_all(&self) {
        self.tree.refresh();
        self.properties.refresh();
        self.canvas.queue_draw();
        self.update_title();
    }

    fn update_title(&self) {
        let name = self.workspace.borrow().display_name();
        self.window.set_title(Some(&format!("ReGenesis - {}", name)));
    }

    fn report_error(&self, title: &str, error: &dyn std::fmt::Display) {
        self.console.error(format!("{}: {}", title, error));
        show_error_dialog(
            title,
            &error.to_string(),
            parent_window(&self.window).as_ref(),
        );
    }

    fn new_project(self: &Rc<Self>) {
        let id = self.workspace.borrow_mut().new_project("New Project");

        // Seed the location from the preferences when one is stored.
        if let Some((lat, lon)) = self.preferences.borrow().location() {
            let mut workspace = self.workspace.borrow_mut();
            for (key, value) in [("latitude", lat), ("longitude", lon)] {
                if let Err(e) = workspace.set_property(id, key, &value.to_string()) {
                    tracing::warn!("Ignoring stored {}: {}", key, e);
                }
            }
        }

        self.workspace.borrow_mut().select_node(Some(id));
        self.console.info("Created new project");
        self.refresh_all();
    }

    fn open(self: &Rc<Self>) {
        let Some(path) = pick_project_file() else {
            return;
        };
        let result = self.workspace.borrow_mut().load_from_file(&path);
        match result {
            Ok(()) => self.console.info(format!("Opened {}", path.display())),
            Err(e) => self.report_error("Could not open project", &e),
        }
        self.refresh_all();
    }

    fn save(self: &Rc<Self>) {
        let current = self.workspace.borrow().current_file_path().cloned();
        match current {
            Some(path) => self.save_to(&path),
            None => self.save_as(),
        }
    }

    fn save_as(self: &Rc<Self>) {
        let (current, default_name) = {
            let workspace = self.workspace.borrow();
            let name = workspace
                .active_project()
                .and_then(|id| workspace.tree().get(id))
                .map(|node| node.name.clone())
                .unwrap_or_else(|| "Untitled".to_string());
            (workspace.current_file_path().cloned(), name)
        };
        if let Some(path) = save_project_file(current.as_deref(), &default_name) {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &Path) {
        if self.workspace.borrow().tree().is_empty() {
            self.console.warning("Nothing to save");
            return;
        }
        let result = self.workspace.borrow_mut().save_to_file(path);
        match result {
            Ok(()) => self.console.info(format!("Saved {}", path.display())),
            Err(e) => self.report_error("Could not save project", &e),
        }
        self.update_title();
    }

    fn quit(self: &Rc<Self>) {
        if self.workspace.borrow().is_modified() {
            tracing::warn!("Quitting with unsaved changes");
        }
        self.window.close();
    }

    fn add_region(self: &Rc<Self>) {
        let parent = {
            let workspace = self.workspace.borrow();
            workspace.selected().or(workspace.active_project())
        };
        let Some(parent) = parent else {
            self.console.warning("Create or select a project first");
            return;
        };

        let result = self.workspace.borrow_mut().add_region(parent, "New Region");
        match result {
            Ok(id) => {
                self.workspace.borrow_mut().select_node(Some(id));
                self.console.info("Added region");
            }
            Err(e) => self.report_error("Could not add region", &e),
        }
        self.refresh_all();
    }

    fn delete_node(self: &Rc<Self>) {
        let Some(id) = self.workspace.borrow().selected() else {
            return;
        };
        let name = self.node_name(id);
        let result = self.workspace.borrow_mut().remove_node(id);
        match result {
            Ok(removed) => self
                .console
                .info(format!("Deleted {} ({} nodes)", name, removed.len())),
            Err(e) => self.report_error("Could not delete", &e),
        }
        self.refresh_all();
    }

    fn node_name(&self, id: NodeId) -> String {
        self.workspace
            .borrow()
            .tree()
            .get(id)
            .map(|n| n.name.clone())
            .unwrap_or_default()
    }

    fn redraw_boundary(self: &Rc<Self>) {
        self.canvas.begin_redraw();
    }

    fn auto_zoom(self: &Rc<Self>) {
        self.canvas.auto_zoom();
    }

    fn zoom_reset(self: &Rc<Self>) {
        self.workspace.borrow_mut().viewport_mut().reset();
        self.canvas.queue_draw();
    }

    fn show_plants(self: &Rc<Self>) {
        let dialog = PlantsDialog::new(
            self.plants.clone(),
            self.console.clone(),
            Some(self.window.upcast_ref()),
        );
        dialog.present();
    }

    fn show_preferences(self: &Rc<Self>) {
        let dialog = PreferencesDialog::new(
            self.preferences.clone(),
            self.console.clone(),
            Some(self.window.upcast_ref()),
        );
        dialog.present();
    }

    fn show_about(self: &Rc<Self>) {
        let about = AboutDialog::builder()
            .program_name("ReGenesis")
            .version(env!("CARGO_PKG_VERSION"))
            .comments("Native-plant garden layout designer")
            .license_type(License::MitX11)
            .transient_for(&self.window)
            .modal(true)
            .build();
        about.present();
    }
}

fn build_menu_model() -> gio::Menu {
    let menu_bar_model = gio::Menu::new();

    // File Menu
    let file_menu = gio::Menu::new();
    file_menu.append(Some("New Project"), Some("app.new_project"));
    file_menu.append(Some("Open..."), Some("app.open"));
    file_menu.append(Some("Save"), Some("app.save"));
    file_menu.append(Some("Save As..."), Some("app.save_as"));
    let quit_section = gio::Menu::new();
    quit_section.append(Some("Quit"), Some("app.quit"));
    file_menu.append_section(None, &quit_section);
    menu_bar_model.append_submenu(Some("File"), &file_menu);

    // Edit Menu
    let edit_menu = gio::Menu::new();
    edit_menu.append(Some("Preferences"), Some("app.preferences"));
    menu_bar_model.append_submenu(Some("Edit"), &edit_menu);

    // Project Menu
    let project_menu = gio::Menu::new();
    project_menu.append(Some("Add Region"), Some("app.add_region"));
    project_menu.append(Some("Delete Node"), Some("app.delete_node"));
    project_menu.append(Some("Redraw Boundary"), Some("app.redraw_boundary"));
    let view_section = gio::Menu::new();
    view_section.append(Some("Auto Zoom"), Some("app.auto_zoom"));
    view_section.append(Some("Reset Zoom"), Some("app.zoom_reset"));
    project_menu.append_section(None, &view_section);
    menu_bar_model.append_submenu(Some("Project"), &project_menu);

    // Tools Menu
    let tools_menu = gio::Menu::new();
    tools_menu.append(Some("Plant Database"), Some("app.plants"));
    menu_bar_model.append_submenu(Some("Tools"), &tools_menu);

    // Help Menu
    let help_menu = gio::Menu::new();
    help_menu.append(Some("About"), Some("app.about"));
    menu_bar_model.append_submenu(Some("Help"), &help_menu);

    menu_bar_model
}
