/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => {
                // Clipboard managers on X11 need the owner alive briefly.
                std::thread::sleep(std::time::Duration::from_millis(100));
                true
            }
            Err(e) => {
                tracing::warn!("Clipboard write failed: {}", e);
                false
            }
        },
        Err(e) => {
            tracing::warn!("Clipboard unavailable: {}", e);
            false
        }
    }
}
