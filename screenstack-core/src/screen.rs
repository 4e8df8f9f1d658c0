use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::ScreenError;
use crate::view_id::ViewTypeId;

/// A navigation call made by a screen, applied later by the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    Show(ViewTypeId),
    Back,
}

pub(crate) type RequestQueue = RefCell<VecDeque<NavigationRequest>>;

/// Non-owning handle from a screen back to the container that owns it.
///
/// Screens never call into the container directly: requests are queued and
/// applied by [`ScreensController::process_requests`](crate::ScreensController::process_requests),
/// so a screen can navigate from inside its own event handlers.
#[derive(Debug, Clone)]
pub struct ScreenParent {
    queue: Weak<RequestQueue>,
}

impl ScreenParent {
    pub(crate) fn new(queue: &Rc<RequestQueue>) -> Self {
        Self {
            queue: Rc::downgrade(queue),
        }
    }

    pub fn show(&self, id: ViewTypeId) -> Result<(), ScreenError> {
        self.request(NavigationRequest::Show(id))
    }

    pub fn back(&self) -> Result<(), ScreenError> {
        self.request(NavigationRequest::Back)
    }

    /// Whether the owning container is still alive.
    pub fn is_attached(&self) -> bool {
        self.queue.strong_count() > 0
    }

    fn request(&self, request: NavigationRequest) -> Result<(), ScreenError> {
        let queue = self.queue.upgrade().ok_or(ScreenError::Detached)?;
        debug!("Queued {request:?}");
        queue.borrow_mut().push_back(request);
        Ok(())
    }
}

/// Contract every navigable view's controller implements.
///
/// The container injects its [`ScreenParent`] when the view is first loaded and
/// then calls [`initialize`](Self::initialize) once.
pub trait ControlledScreen {
    fn set_screen_parent(&mut self, parent: ScreenParent);

    fn screen_parent(&self) -> Option<&ScreenParent>;

    fn initialize(&mut self) {}

    /// Ask the owning container to go back to the previous screen.
    fn back(&self) -> Result<(), ScreenError> {
        self.screen_parent().ok_or(ScreenError::Detached)?.back()
    }

    /// Run the handler a layout element names (e.g. a button's `on_click`).
    fn invoke(&mut self, handler: &str) -> Result<(), ScreenError> {
        match handler {
            "back" => self.back(),
            _ => Err(ScreenError::UnknownHandler {
                handler: handler.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Plain {
        parent: Option<ScreenParent>,
    }

    impl ControlledScreen for Plain {
        fn set_screen_parent(&mut self, parent: ScreenParent) {
            self.parent = Some(parent);
        }

        fn screen_parent(&self) -> Option<&ScreenParent> {
            self.parent.as_ref()
        }
    }

    #[test]
    fn back_is_queued_on_parent() {
        let queue = Rc::new(RequestQueue::default());
        let mut screen = Plain::default();
        screen.set_screen_parent(ScreenParent::new(&queue));

        screen.back().unwrap();
        screen.invoke("back").unwrap();
        assert_eq!(
            queue.borrow().iter().cloned().collect::<Vec<_>>(),
            vec![NavigationRequest::Back, NavigationRequest::Back]
        );
    }

    #[test]
    fn unattached_screen_cannot_navigate() {
        let screen = Plain::default();
        assert!(matches!(screen.back(), Err(ScreenError::Detached)));
    }

    #[test]
    fn dropped_container_detaches_parent() {
        let queue = Rc::new(RequestQueue::default());
        let parent = ScreenParent::new(&queue);
        assert!(parent.is_attached());
        drop(queue);
        assert!(!parent.is_attached());
        assert!(matches!(
            parent.show(ViewTypeId::new("home")),
            Err(ScreenError::Detached)
        ));
    }

    #[test]
    fn unknown_handler_is_reported() {
        let mut screen = Plain::default();
        let err = screen.invoke("launchRockets").unwrap_err();
        assert!(
            matches!(err, ScreenError::UnknownHandler { ref handler } if handler == "launchRockets")
        );
    }
}
