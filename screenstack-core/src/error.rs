use thiserror::Error;

use crate::view_id::ViewTypeId;

/// Failures raised by a [`ViewLoader`](crate::ViewLoader) while producing a view.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no layout for view {view} at {location}")]
    NotFound { view: ViewTypeId, location: String },

    #[error("layout for view {view} is invalid: {reason}")]
    Invalid { view: ViewTypeId, reason: String },

    #[error("view {view} names unknown controller `{controller}`")]
    MissingController {
        view: ViewTypeId,
        controller: String,
    },
}

/// Errors surfaced by navigation operations.
///
/// None of these are recovered inside the container; callers are expected to
/// treat them as fatal.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("breadcrumb stack has no previous screen")]
    EmptyStack,

    #[error("view {0} was never loaded")]
    UnknownView(ViewTypeId),

    #[error("no handler named `{handler}`")]
    UnknownHandler { handler: String },

    #[error("screen is not attached to a live container")]
    Detached,
}
