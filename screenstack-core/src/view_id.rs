use std::borrow::Cow;
use std::fmt;

/// Stable identifier of a view kind.
///
/// Used as the key of both the view registry and the breadcrumb stack. Built
/// either from a Rust type (its fully-qualified name) or from a plain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewTypeId(Cow<'static, str>);

impl ViewTypeId {
    /// Identifier for the view whose controller is `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Borrowed(std::any::type_name::<T>()))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last `::` segment of the identifier, with any generic arguments removed.
    ///
    /// This is the name used to find a view's layout resource.
    pub fn simple_name(&self) -> &str {
        let base = self.0.split('<').next().unwrap_or(&self.0);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl fmt::Display for ViewTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ViewTypeId {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for ViewTypeId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}
