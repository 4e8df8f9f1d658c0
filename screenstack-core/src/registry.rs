use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::screen::{ControlledScreen, ScreenParent};
use crate::view_id::ViewTypeId;

/// A loaded view: its visual root and the controller driving it.
pub struct LoadedView<R> {
    pub root: R,
    pub controller: Box<dyn ControlledScreen>,
}

impl<R> LoadedView<R> {
    pub fn new(root: R, controller: Box<dyn ControlledScreen>) -> Self {
        Self { root, controller }
    }
}

/// Produces views on demand.
///
/// Implementations resolve the view's layout description, build its visual
/// root, and instantiate its controller. The container takes care of wiring
/// the controller to itself.
pub trait ViewLoader {
    /// Visual root type handed to the host for drawing.
    type Root;

    fn load(&mut self, id: &ViewTypeId) -> Result<LoadedView<Self::Root>, LoadError>;
}

/// Every view loaded so far, keyed by id. Entries are never evicted.
pub struct ViewRegistry<R> {
    views: HashMap<ViewTypeId, LoadedView<R>>,
}

impl<R> ViewRegistry<R> {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Load `id` through `loader` unless it is already registered.
    ///
    /// A freshly loaded controller receives `parent` and is initialized before
    /// it is stored. Returns `true` when a load took place. On failure the
    /// registry is left unchanged.
    pub fn ensure_loaded<L>(
        &mut self,
        id: &ViewTypeId,
        loader: &mut L,
        parent: ScreenParent,
    ) -> Result<bool, LoadError>
    where
        L: ViewLoader<Root = R> + ?Sized,
    {
        if self.views.contains_key(id) {
            debug!("View {id} already loaded");
            return Ok(false);
        }

        let mut view = loader.load(id)?;
        view.controller.set_screen_parent(parent);
        view.controller.initialize();
        self.views.insert(id.clone(), view);
        info!("Loaded view {id} ({} total)", self.views.len());
        Ok(true)
    }

    pub fn get(&self, id: &ViewTypeId) -> Option<&LoadedView<R>> {
        self.views.get(id)
    }

    pub fn get_mut(&mut self, id: &ViewTypeId) -> Option<&mut LoadedView<R>> {
        self.views.get_mut(id)
    }

    pub fn contains(&self, id: &ViewTypeId) -> bool {
        self.views.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ViewTypeId> {
        self.views.keys()
    }
}

impl<R> Default for ViewRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::screen::RequestQueue;

    struct Probe {
        parent: Option<ScreenParent>,
        initialized: Rc<Cell<u32>>,
    }

    impl ControlledScreen for Probe {
        fn set_screen_parent(&mut self, parent: ScreenParent) {
            self.parent = Some(parent);
        }

        fn screen_parent(&self) -> Option<&ScreenParent> {
            self.parent.as_ref()
        }

        fn initialize(&mut self) {
            self.initialized.set(self.initialized.get() + 1);
        }
    }

    #[derive(Default)]
    struct CountingLoader {
        loads: u32,
        initialized: Rc<Cell<u32>>,
    }

    impl ViewLoader for CountingLoader {
        type Root = u32;

        fn load(&mut self, id: &ViewTypeId) -> Result<LoadedView<u32>, LoadError> {
            if id.as_str() == "missing" {
                return Err(LoadError::NotFound {
                    view: id.clone(),
                    location: "nowhere".into(),
                });
            }
            self.loads += 1;
            Ok(LoadedView::new(
                self.loads,
                Box::new(Probe {
                    parent: None,
                    initialized: self.initialized.clone(),
                }),
            ))
        }
    }

    fn parent(queue: &Rc<RequestQueue>) -> ScreenParent {
        ScreenParent::new(queue)
    }

    #[test]
    fn loads_each_view_once() {
        let queue = Rc::new(RequestQueue::default());
        let mut loader = CountingLoader::default();
        let mut registry = ViewRegistry::new();
        let home = ViewTypeId::new("home");

        assert!(registry.ensure_loaded(&home, &mut loader, parent(&queue)).unwrap());
        assert!(!registry.ensure_loaded(&home, &mut loader, parent(&queue)).unwrap());

        assert_eq!(loader.loads, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&home).map(|v| v.root), Some(1));
        assert_eq!(loader.initialized.get(), 1);
    }

    #[test]
    fn controller_is_wired_to_parent() {
        let queue = Rc::new(RequestQueue::default());
        let mut loader = CountingLoader::default();
        let mut registry = ViewRegistry::new();
        let home = ViewTypeId::new("home");
        registry
            .ensure_loaded(&home, &mut loader, parent(&queue))
            .unwrap();

        let view = registry.get(&home).unwrap();
        view.controller.back().unwrap();
        assert_eq!(queue.borrow().len(), 1);
    }

    #[test]
    fn failed_load_leaves_registry_unchanged() {
        let queue = Rc::new(RequestQueue::default());
        let mut loader = CountingLoader::default();
        let mut registry: ViewRegistry<u32> = ViewRegistry::new();
        let missing = ViewTypeId::new("missing");

        let err = registry
            .ensure_loaded(&missing, &mut loader, parent(&queue))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(registry.is_empty());
        assert!(!registry.contains(&missing));
    }
}
