//! Selectable colour themes.

/// Theme used when none is stored.
pub const DEFAULT_THEME: &str = "flatly";

/// Supported theme names, light themes first.
pub const THEMES: &[&str] = &[
    "flatly", "litera", "cosmo", "journal", "minty", "darkly", "cyborg", "superhero", "solar",
    "vapor",
];

const DARK_THEMES: &[&str] = &["darkly", "cyborg", "superhero", "solar", "vapor"];

/// Whether `name` is one of the dark themes (case-insensitive).
pub fn is_dark_theme(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    DARK_THEMES.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_themes() {
        assert!(is_dark_theme("darkly"));
        assert!(is_dark_theme("Cyborg"));
        assert!(!is_dark_theme(DEFAULT_THEME));
        assert!(!is_dark_theme("unknown"));
    }

    #[test]
    fn test_every_dark_theme_is_listed() {
        assert!(DARK_THEMES.iter().all(|t| THEMES.contains(t)));
        assert_eq!(THEMES[0], DEFAULT_THEME);
    }
}
