use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScreenError;
use crate::view_id::ViewTypeId;

/// Which end of the breadcrumb stack a new id is compared against before it
/// is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushGuard {
    /// Skip the push when the id is already the current (top) screen.
    #[default]
    Top,
    /// Skip the push when the id is the root (bottom) screen. Showing the root
    /// again from deeper in the history leaves the history as it was.
    Bottom,
}

/// Navigation history, most recent screen on top.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbStack {
    entries: Vec<ViewTypeId>,
}

impl BreadcrumbStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless the element selected by `guard` already equals it.
    ///
    /// Returns `true` when the stack grew.
    pub fn push(&mut self, id: ViewTypeId, guard: PushGuard) -> bool {
        let guarded = match guard {
            PushGuard::Top => self.entries.last(),
            PushGuard::Bottom => self.entries.first(),
        };
        if guarded == Some(&id) {
            debug!("Breadcrumb {id} not pushed ({guard:?} guard)");
            return false;
        }
        debug!("Breadcrumb push {id}");
        self.entries.push(id);
        true
    }

    pub fn pop(&mut self) -> Result<ViewTypeId, ScreenError> {
        self.entries.pop().ok_or(ScreenError::EmptyStack)
    }

    pub fn top(&self) -> Option<&ViewTypeId> {
        self.entries.last()
    }

    pub fn bottom(&self) -> Option<&ViewTypeId> {
        self.entries.first()
    }

    /// The entry below the top, i.e. where `back` would lead.
    pub fn previous(&self) -> Option<&ViewTypeId> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewTypeId> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ViewTypeId] {
        &self.entries
    }
}
