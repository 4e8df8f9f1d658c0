pub mod error;
pub mod loader;
pub mod widget;

pub use error::LayoutError;
pub use loader::{ControllerFactory, LayoutLoader};
pub use widget::{Layout, Widget};
