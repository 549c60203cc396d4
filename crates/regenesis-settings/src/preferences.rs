//! Preferences manager
//!
//! Preferences are a small JSON object merged over built-in defaults:
//!
//! ```json
//! {
//!   "location": { "latitude": null, "longitude": null },
//!   "theme": "flatly",
//!   "development_mode": false
//! }
//! ```
//!
//! Values are addressed with dotted keys (`"location.latitude"`); every `set`
//! writes the file immediately.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::{PreferencesError, PreferencesResult};
use crate::theme::DEFAULT_THEME;

/// Directory under the home directory holding ReGenesis data.
pub const PREFERENCES_DIR: &str = ".regenesis";

/// Preferences file name.
pub const PREFERENCES_FILE: &str = "preferences.json";

fn default_preferences() -> Value {
    json!({
        "location": {
            "latitude": null,
            "longitude": null
        },
        "theme": DEFAULT_THEME,
        "development_mode": false
    })
}

/// Overlays `loaded` on the defaults. Unknown top-level keys are dropped;
/// nested objects are merged one level deep.
fn merge_with_defaults(loaded: Map<String, Value>) -> Value {
    let mut result = default_preferences();
    let Some(target) = result.as_object_mut() else {
        return result;
    };

    for (key, value) in loaded {
        let Some(slot) = target.get_mut(&key) else {
            tracing::debug!("Ignoring unknown preference '{}'", key);
            continue;
        };
        match (slot, value) {
            (Value::Object(existing), Value::Object(incoming)) => existing.extend(incoming),
            (slot, value) => *slot = value,
        }
    }
    result
}

/// Reads, caches and writes user preferences.
#[derive(Debug, Clone)]
pub struct PreferencesManager {
    path: PathBuf,
    values: Value,
}

impl PreferencesManager {
    /// Opens `~/.regenesis/preferences.json`.
    pub fn new() -> PreferencesResult<Self> {
        let home = dirs::home_dir().ok_or(PreferencesError::HomeDirectory)?;
        Ok(Self::with_path(home.join(PREFERENCES_DIR).join(PREFERENCES_FILE)))
    }

    /// Opens preferences stored at `path`.
    ///
    /// A missing file is created with the defaults. An unreadable or malformed
    /// file is logged and the defaults are used instead.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        Self { path, values }
    }

    fn load(path: &Path) -> Value {
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                tracing::error!(
                    "Error creating preferences directory {}: {}",
                    dir.display(),
                    e
                );
            }
        }

        if !path.exists() {
            let defaults = default_preferences();
            if let Err(e) = write_json(path, &defaults) {
                tracing::error!("Error saving preferences: {}", e);
            }
            return defaults;
        }

        let parsed = fs::read_to_string(path)
            .map_err(PreferencesError::from)
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(Into::into));

        match parsed {
            Ok(Value::Object(map)) => merge_with_defaults(map),
            Ok(_) => {
                tracing::error!(
                    "Error loading preferences: {} does not hold a JSON object",
                    path.display()
                );
                default_preferences()
            }
            Err(e) => {
                tracing::error!("Error loading preferences: {}", e);
                default_preferences()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole preferences document.
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Looks up a dotted key. Missing and `null` values both yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut current = &self.values;
        for part in key.split('.') {
            current = current.as_object()?.get(part)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Typed lookup falling back to `default` when the value is missing,
    /// `null` or of another type.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    /// Sets a dotted key, creating intermediate objects, and saves.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> PreferencesResult<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(PreferencesError::invalid_key(key, "empty key segment"));
        }
        let Some((last, parents)) = parts.split_last() else {
            return Err(PreferencesError::invalid_key(key, "empty key"));
        };

        let mut current = self
            .values
            .as_object_mut()
            .ok_or_else(|| PreferencesError::invalid_key(key, "preferences are not an object"))?;
        for part in parents {
            current = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or_else(|| {
                    PreferencesError::invalid_key(key, format!("'{}' is not an object", part))
                })?;
        }
        current.insert(last.to_string(), value.into());

        self.save()
    }

    /// Writes the current preferences to disk.
    pub fn save(&self) -> PreferencesResult<()> {
        write_json(&self.path, &self.values)?;
        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    /// Saved location, only when both coordinates are set.
    pub fn location(&self) -> Option<(f64, f64)> {
        let latitude = self.get("location.latitude")?.as_f64()?;
        let longitude = self.get("location.longitude")?.as_f64()?;
        Some((latitude, longitude))
    }

    pub fn set_location(
        &mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> PreferencesResult<()> {
        self.set("location.latitude", latitude)?;
        self.set("location.longitude", longitude)
    }

    pub fn theme(&self) -> String {
        self.get_or("theme", DEFAULT_THEME.to_string())
    }

    pub fn set_theme(&mut self, theme: &str) -> PreferencesResult<()> {
        self.set("theme", theme)
    }

    pub fn is_development_mode(&self) -> bool {
        self.get_or("development_mode", false)
    }

    pub fn set_development_mode(&mut self, enabled: bool) -> PreferencesResult<()> {
        self.set("development_mode", enabled)
    }
}

fn write_json(path: &Path, value: &Value) -> PreferencesResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_defaults_and_drops_unknown_keys() {
        let loaded = json!({
            "location": { "latitude": 40.0 },
            "theme": "darkly",
            "window": { "width": 1024 }
        });
        let Value::Object(map) = loaded else {
            unreachable!()
        };
        let merged = merge_with_defaults(map);

        assert_eq!(merged["location"]["latitude"], json!(40.0));
        assert_eq!(merged["location"]["longitude"], Value::Null);
        assert_eq!(merged["theme"], "darkly");
        assert_eq!(merged["development_mode"], false);
        assert!(merged.get("window").is_none());
    }

    #[test]
    fn test_merge_replaces_object_with_scalar() {
        let Value::Object(map) = json!({ "location": "Boston" }) else {
            unreachable!()
        };
        let merged = merge_with_defaults(map);
        assert_eq!(merged["location"], "Boston");
    }
}
