pub mod breadcrumbs;
pub mod controller;
pub mod error;
pub mod registry;
pub mod screen;
pub mod transition;
pub mod view_id;

// Re-export primary types for convenience.
pub use breadcrumbs::{BreadcrumbStack, PushGuard};
pub use controller::{NavigatorOptions, ScreensController};
pub use error::{LoadError, ScreenError};
pub use registry::{LoadedView, ViewLoader, ViewRegistry};
pub use screen::{ControlledScreen, NavigationRequest, ScreenParent};
pub use transition::{Crossfade, TransitionEvent, TransitionTimings};
pub use view_id::ViewTypeId;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, ScreenError>;
