//! Directory where the executable lives. Used for preferences and layout files
//! so that data is stored next to the app when run as a standalone exe.

use std::path::PathBuf;

use screenstack_layout::LayoutLoader;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Default directory searched for user-provided layout files.
pub fn layouts_directory() -> PathBuf {
    exe_directory().join(LayoutLoader::DEFAULT_FOLDER)
}
