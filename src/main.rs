// On Windows, hide the console window for GUI applications
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

use regenesis::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("ReGenesis {} (built {})", regenesis::VERSION, regenesis::BUILD_DATE);

    regenesis_ui::gtk_app::main()
}
