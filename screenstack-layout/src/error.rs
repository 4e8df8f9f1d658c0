use std::path::PathBuf;

use screenstack_core::{LoadError, ViewTypeId};
use thiserror::Error;

/// Errors originating from reading or validating a layout description.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout `{name}` not found (searched {searched})")]
    NotFound { name: String, searched: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid layout: {0}")]
    Invalid(String),

    #[error("unknown controller `{0}`")]
    UnknownController(String),
}

impl LayoutError {
    /// Attach the view being loaded and convert into the core loader error.
    pub fn into_load_error(self, view: &ViewTypeId) -> LoadError {
        let view = view.clone();
        match self {
            Self::NotFound { searched, .. } => LoadError::NotFound {
                view,
                location: searched,
            },
            Self::UnknownController(controller) => LoadError::MissingController { view, controller },
            other => LoadError::Invalid {
                view,
                reason: other.to_string(),
            },
        }
    }
}
