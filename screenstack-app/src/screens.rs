//! Built-in screens: their controllers, embedded layouts, and the loader that
//! knows about them.

use std::path::PathBuf;

use screenstack_core::{ControlledScreen, ScreenError, ScreenParent, ViewTypeId};
use screenstack_layout::LayoutLoader;
use tracing::debug;

const MAIN_LAYOUT: &str = include_str!("../layouts/MainScreen.json");
const SETTINGS_LAYOUT: &str = include_str!("../layouts/SettingsScreen.json");
const ABOUT_LAYOUT: &str = include_str!("../layouts/AboutScreen.json");

/// Request `T`'s view from the container owning this screen.
fn show<T: 'static>(parent: Option<&ScreenParent>) -> Result<(), ScreenError> {
    parent
        .ok_or(ScreenError::Detached)?
        .show(ViewTypeId::of::<T>())
}

/// Landing screen.
#[derive(Default)]
pub(crate) struct MainScreen {
    parent: Option<ScreenParent>,
}

impl ControlledScreen for MainScreen {
    fn set_screen_parent(&mut self, parent: ScreenParent) {
        self.parent = Some(parent);
    }

    fn screen_parent(&self) -> Option<&ScreenParent> {
        self.parent.as_ref()
    }

    fn initialize(&mut self) {
        debug!("MainScreen ready");
    }

    fn invoke(&mut self, handler: &str) -> Result<(), ScreenError> {
        match handler {
            "showSettings" => show::<SettingsScreen>(self.screen_parent()),
            "showAbout" => show::<AboutScreen>(self.screen_parent()),
            "back" => self.back(),
            _ => Err(ScreenError::UnknownHandler {
                handler: handler.to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub(crate) struct SettingsScreen {
    parent: Option<ScreenParent>,
}

impl ControlledScreen for SettingsScreen {
    fn set_screen_parent(&mut self, parent: ScreenParent) {
        self.parent = Some(parent);
    }

    fn screen_parent(&self) -> Option<&ScreenParent> {
        self.parent.as_ref()
    }

    fn invoke(&mut self, handler: &str) -> Result<(), ScreenError> {
        match handler {
            "showAbout" => show::<AboutScreen>(self.screen_parent()),
            "showHome" => show::<MainScreen>(self.screen_parent()),
            "back" => self.back(),
            _ => Err(ScreenError::UnknownHandler {
                handler: handler.to_string(),
            }),
        }
    }
}

/// Only knows how to go back, so the default handlers suffice.
#[derive(Default)]
pub(crate) struct AboutScreen {
    parent: Option<ScreenParent>,
}

impl ControlledScreen for AboutScreen {
    fn set_screen_parent(&mut self, parent: ScreenParent) {
        self.parent = Some(parent);
    }

    fn screen_parent(&self) -> Option<&ScreenParent> {
        self.parent.as_ref()
    }
}

/// Map a configured screen name to its view id.
///
/// Names of built-in screens resolve to their controller types; any other
/// name is used as-is so a layout file in the layouts directory can provide it.
pub(crate) fn view_id_for(name: &str) -> ViewTypeId {
    match name {
        "MainScreen" => ViewTypeId::of::<MainScreen>(),
        "SettingsScreen" => ViewTypeId::of::<SettingsScreen>(),
        "AboutScreen" => ViewTypeId::of::<AboutScreen>(),
        other => ViewTypeId::from(other.to_string()),
    }
}

/// Loader with the built-in layouts and controllers registered, searching
/// `directory` first when given.
pub(crate) fn builtin_loader(directory: Option<PathBuf>) -> LayoutLoader {
    let mut loader = LayoutLoader::new()
        .with_embedded("MainScreen", MAIN_LAYOUT)
        .with_embedded("SettingsScreen", SETTINGS_LAYOUT)
        .with_embedded("AboutScreen", ABOUT_LAYOUT)
        .with_controller("MainScreen", || Box::new(MainScreen::default()))
        .with_controller("SettingsScreen", || Box::new(SettingsScreen::default()))
        .with_controller("AboutScreen", || Box::new(AboutScreen::default()));
    if let Some(dir) = directory {
        loader = loader.with_directory(dir);
    }
    loader
}
