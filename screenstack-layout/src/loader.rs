use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use screenstack_core::{ControlledScreen, LoadError, LoadedView, ViewLoader, ViewTypeId};
use tracing::{debug, info};

use crate::error::LayoutError;
use crate::widget::Layout;

/// Builds a fresh controller for a layout.
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn ControlledScreen>>;

/// Resolves layout descriptions by naming convention and pairs them with
/// controllers.
///
/// A view `app::screens::MainScreen` is looked up as `MainScreen.json`, first
/// in the layout directory (if one is set and the file exists), then among the
/// embedded layouts. The layout's `controller` field selects the factory that
/// creates its controller.
pub struct LayoutLoader {
    directory: Option<PathBuf>,
    extension: String,
    embedded: HashMap<String, String>,
    factories: HashMap<String, ControllerFactory>,
}

impl LayoutLoader {
    pub const DEFAULT_FOLDER: &'static str = "layouts";
    pub const DEFAULT_EXTENSION: &'static str = "json";

    pub fn new() -> Self {
        Self {
            directory: None,
            extension: Self::DEFAULT_EXTENSION.to_string(),
            embedded: HashMap::new(),
            factories: HashMap::new(),
        }
    }

    /// Directory searched before the embedded layouts.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Register a built-in layout under a view's simple name.
    pub fn with_embedded(mut self, name: impl Into<String>, json: impl Into<String>) -> Self {
        self.embedded.insert(name.into(), json.into());
        self
    }

    pub fn with_controller<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ControlledScreen> + 'static,
    {
        self.register_controller(name, factory);
        self
    }

    pub fn register_controller<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn ControlledScreen> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// File a view's layout is expected in, when a directory is configured.
    pub fn resource_path(&self, id: &ViewTypeId) -> Option<PathBuf> {
        let dir = self.directory.as_ref()?;
        Some(dir.join(format!("{}.{}", id.simple_name(), self.extension)))
    }

    /// Read, parse, and validate the layout for `id`.
    pub fn read_layout(&self, id: &ViewTypeId) -> Result<Layout, LayoutError> {
        let json = self.read_source(id)?;
        Layout::parse(&json)
    }

    fn read_source(&self, id: &ViewTypeId) -> Result<String, LayoutError> {
        let name = id.simple_name();
        let path = self.resource_path(id);

        if let Some(path) = path.as_ref().filter(|p| p.is_file()) {
            debug!("Reading layout {}", path.display());
            return fs::read_to_string(path).map_err(|source| LayoutError::Io {
                path: path.clone(),
                source,
            });
        }

        if let Some(json) = self.embedded.get(name) {
            debug!("Using embedded layout for {name}");
            return Ok(json.clone());
        }

        let searched = match path {
            Some(p) => format!("{} and embedded layouts", p.display()),
            None => "embedded layouts".to_string(),
        };
        Err(LayoutError::NotFound {
            name: name.to_string(),
            searched,
        })
    }

    fn controller_for(&self, layout: &Layout) -> Result<Box<dyn ControlledScreen>, LayoutError> {
        let factory = self
            .factories
            .get(&layout.controller)
            .ok_or_else(|| LayoutError::UnknownController(layout.controller.clone()))?;
        Ok(factory())
    }
}

impl Default for LayoutLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLoader for LayoutLoader {
    type Root = Layout;

    fn load(&mut self, id: &ViewTypeId) -> Result<LoadedView<Layout>, LoadError> {
        let layout = self.read_layout(id).map_err(|e| e.into_load_error(id))?;
        let controller = self
            .controller_for(&layout)
            .map_err(|e| e.into_load_error(id))?;
        info!(
            "Loaded layout {} with controller {}",
            id.simple_name(),
            layout.controller
        );
        Ok(LoadedView::new(layout, controller))
    }
}
