use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use screenstack_core::{NavigatorOptions, PushGuard, TransitionTimings};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Simple name of the first screen shown (e.g. `MainScreen`).
    #[serde(default = "default_initial_view")]
    pub initial_view: String,
    /// Directory searched for layout files before the built-in layouts. When
    /// empty, a `layouts/` folder next to the executable is used.
    #[serde(default)]
    pub layouts_dir: String,
    #[serde(default = "default_true")]
    pub show_breadcrumbs: bool,
    /// When false every transition completes on the next frame.
    #[serde(default = "default_true")]
    pub animations: bool,
    #[serde(default)]
    pub push_guard: PushGuard,
    #[serde(default = "default_initial_fade_in_ms")]
    pub initial_fade_in_ms: u64,
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    #[serde(default = "default_fade_in_ms")]
    pub fade_in_ms: u64,
}

fn default_window_width() -> f32 {
    800.0
}
fn default_window_height() -> f32 {
    600.0
}
fn default_initial_view() -> String {
    "MainScreen".to_string()
}
fn default_true() -> bool {
    true
}
fn default_initial_fade_in_ms() -> u64 {
    TransitionTimings::DEFAULT_INITIAL_FADE_IN.as_millis() as u64
}
fn default_fade_out_ms() -> u64 {
    TransitionTimings::DEFAULT_FADE_OUT.as_millis() as u64
}
fn default_fade_in_ms() -> u64 {
    TransitionTimings::DEFAULT_FADE_IN.as_millis() as u64
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            initial_view: default_initial_view(),
            layouts_dir: String::new(),
            show_breadcrumbs: true,
            animations: true,
            push_guard: PushGuard::default(),
            initial_fade_in_ms: default_initial_fade_in_ms(),
            fade_out_ms: default_fade_out_ms(),
            fade_in_ms: default_fade_in_ms(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            return Self::load_from(&path).unwrap_or_default();
        }
        debug!("No preferences file at {}", path.display());
        let prefs = Self::default();
        prefs.save();
        prefs
    }

    /// Read a preferences file; errors are logged and reported as `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    Some(prefs)
                }
                Err(e) => {
                    error!("Failed to parse preferences: {e}");
                    None
                }
            },
            Err(e) => {
                error!("Failed to read preferences file: {e}");
                None
            }
        }
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences to {}", path.display());
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    pub fn transition_timings(&self) -> TransitionTimings {
        if !self.animations {
            return TransitionTimings::instant();
        }
        TransitionTimings {
            initial_fade_in: Duration::from_millis(self.initial_fade_in_ms),
            fade_out: Duration::from_millis(self.fade_out_ms),
            fade_in: Duration::from_millis(self.fade_in_ms),
        }
    }

    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            push_guard: self.push_guard,
            timings: self.transition_timings(),
        }
    }

    pub fn layouts_directory(&self) -> PathBuf {
        if self.layouts_dir.trim().is_empty() {
            crate::app_dir::layouts_directory()
        } else {
            PathBuf::from(&self.layouts_dir)
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let prefs: AppPreferences =
            serde_json::from_str(r#"{ "initial_view": "SettingsScreen", "push_guard": "bottom" }"#)
                .unwrap();
        assert_eq!(prefs.initial_view, "SettingsScreen");
        assert_eq!(prefs.push_guard, PushGuard::Bottom);
        assert_eq!(prefs.fade_out_ms, 100);
        assert!(prefs.animations);
        assert_eq!(prefs.window_width, 800.0);
    }

    #[test]
    fn timings_follow_preferences() {
        let prefs = AppPreferences {
            fade_in_ms: 500,
            ..AppPreferences::default()
        };
        let timings = prefs.transition_timings();
        assert_eq!(timings.fade_in, Duration::from_millis(500));
        assert_eq!(timings.initial_fade_in, Duration::from_millis(250));

        let still = AppPreferences {
            animations: false,
            ..prefs
        };
        assert_eq!(still.navigator_options().timings, TransitionTimings::instant());
    }

    #[test]
    fn explicit_layouts_dir_is_used() {
        let prefs = AppPreferences {
            layouts_dir: "/opt/screens".into(),
            ..AppPreferences::default()
        };
        assert_eq!(prefs.layouts_directory(), PathBuf::from("/opt/screens"));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = AppPreferences {
            initial_view: "AboutScreen".into(),
            animations: false,
            ..AppPreferences::default()
        };
        prefs.save_to(&path);
        assert_eq!(AppPreferences::load_from(&path), Some(prefs));
    }

    #[test]
    fn unparseable_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ window_width: ").unwrap();
        assert_eq!(AppPreferences::load_from(&path), None);
    }
}
