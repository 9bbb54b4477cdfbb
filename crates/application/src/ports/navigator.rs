//! Navigation port

/// Port for reading and changing the current location.
///
/// Paths are absolute (`/leads`, `/conversations/42`). Implementations keep
/// whatever history they need; the core only needs the current path and the
/// two ways of changing it.
pub trait Navigator: Send + Sync {
    /// Returns the current path.
    fn location(&self) -> String;

    /// Moves to `path`, adding a history entry.
    fn push(&self, path: &str);

    /// Moves to `path`, replacing the current history entry.
    fn replace(&self, path: &str);
}

impl<T: Navigator + ?Sized> Navigator for std::sync::Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn push(&self, path: &str) {
        (**self).push(path);
    }

    fn replace(&self, path: &str) {
        (**self).replace(path);
    }
}
