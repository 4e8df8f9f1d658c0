use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::breadcrumbs::{BreadcrumbStack, PushGuard};
use crate::error::ScreenError;
use crate::registry::{LoadedView, ViewLoader, ViewRegistry};
use crate::screen::{NavigationRequest, RequestQueue, ScreenParent};
use crate::transition::{Crossfade, TransitionEvent, TransitionTimings};
use crate::view_id::ViewTypeId;

/// Behavior knobs of a [`ScreensController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigatorOptions {
    pub push_guard: PushGuard,
    pub timings: TransitionTimings,
}

/// Single-child container that lazily loads views, crossfades between them,
/// and remembers the way back.
///
/// The host draws [`displayed_view`](Self::displayed_view) with
/// [`opacity`](Self::opacity) applied, feeds frame time to
/// [`tick`](Self::tick), and calls [`process_requests`](Self::process_requests)
/// after dispatching UI events so that navigation asked for by screens takes
/// effect.
pub struct ScreensController<L: ViewLoader> {
    loader: L,
    registry: ViewRegistry<L::Root>,
    breadcrumbs: BreadcrumbStack,
    crossfade: Crossfade,
    push_guard: PushGuard,
    requests: Rc<RequestQueue>,
}

impl<L: ViewLoader> ScreensController<L> {
    pub fn new(loader: L, options: NavigatorOptions) -> Self {
        Self {
            loader,
            registry: ViewRegistry::new(),
            breadcrumbs: BreadcrumbStack::new(),
            crossfade: Crossfade::new(options.timings),
            push_guard: options.push_guard,
            requests: Rc::new(RequestQueue::default()),
        }
    }

    /// Load `id` if needed, start the transition to it, and record it in the
    /// history.
    ///
    /// A load failure leaves the container exactly as it was.
    pub fn show(&mut self, id: ViewTypeId) -> Result<(), ScreenError> {
        let parent = self.handle();
        self.registry.ensure_loaded(&id, &mut self.loader, parent)?;
        self.display(id.clone())?;
        self.breadcrumbs.push(id, self.push_guard);
        Ok(())
    }

    /// Return to the previous screen in the history.
    ///
    /// Fails with [`ScreenError::EmptyStack`] when there is no previous screen;
    /// the history is not modified in that case.
    pub fn back(&mut self) -> Result<(), ScreenError> {
        if self.breadcrumbs.len() < 2 {
            return Err(ScreenError::EmptyStack);
        }
        let current = self.breadcrumbs.pop()?;
        let previous = self.breadcrumbs.pop()?;
        debug!("Back from {current} to {previous}");
        self.display(previous.clone())?;
        self.breadcrumbs.push(previous, self.push_guard);
        Ok(())
    }

    /// Handle given to screens so they can navigate this container.
    pub fn handle(&self) -> ScreenParent {
        ScreenParent::new(&self.requests)
    }

    /// Apply every navigation request queued by screens, oldest first.
    ///
    /// Stops at the first failing request and returns its error; requests
    /// queued after it are discarded. Returns the number of requests applied.
    pub fn process_requests(&mut self) -> Result<usize, ScreenError> {
        let mut applied = 0;
        loop {
            let next = self.requests.borrow_mut().pop_front();
            let Some(request) = next else {
                return Ok(applied);
            };
            let result = match request {
                NavigationRequest::Show(id) => self.show(id),
                NavigationRequest::Back => self.back(),
            };
            if let Err(e) = result {
                self.requests.borrow_mut().clear();
                return Err(e);
            }
            applied += 1;
        }
    }

    /// Advance the running transition by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionEvent> {
        let event = self.crossfade.advance(dt);
        if let Some(ref event) = event {
            debug!("Transition event {event:?}");
        }
        event
    }

    /// Complete the running transition immediately.
    pub fn finish_transition(&mut self) -> Vec<TransitionEvent> {
        self.crossfade.finish()
    }

    pub fn displayed(&self) -> Option<&ViewTypeId> {
        self.crossfade.displayed()
    }

    pub fn displayed_view(&self) -> Option<&LoadedView<L::Root>> {
        self.registry.get(self.crossfade.displayed()?)
    }

    pub fn displayed_view_mut(&mut self) -> Option<&mut LoadedView<L::Root>> {
        let id = self.crossfade.displayed()?;
        self.registry.get_mut(id)
    }

    /// Where the container is heading; differs from `displayed` during a
    /// fade-out.
    pub fn target(&self) -> Option<&ViewTypeId> {
        self.crossfade.target()
    }

    pub fn opacity(&self) -> f32 {
        self.crossfade.opacity()
    }

    pub fn is_transitioning(&self) -> bool {
        self.crossfade.is_animating()
    }

    pub fn can_go_back(&self) -> bool {
        self.breadcrumbs.len() >= 2
    }

    pub fn breadcrumbs(&self) -> &BreadcrumbStack {
        &self.breadcrumbs
    }

    pub fn registry(&self) -> &ViewRegistry<L::Root> {
        &self.registry
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn push_guard(&self) -> PushGuard {
        self.push_guard
    }

    fn display(&mut self, id: ViewTypeId) -> Result<(), ScreenError> {
        if !self.registry.contains(&id) {
            return Err(ScreenError::UnknownView(id));
        }
        info!("Showing {id}");
        self.crossfade.display(id);
        Ok(())
    }
}
