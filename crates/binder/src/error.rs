//! Binding engine error types

use arbor_naming::NamingError;
use arbor_types::ComponentName;
use thiserror::Error;

/// Errors raised by a [`crate::ComponentBinder`].
#[derive(Debug, Error)]
pub enum BindError {
    /// `bind` was called on a binder that already bound its views.
    #[error("Binder for component '{0}' is already bound")]
    AlreadyActive(ComponentName),

    /// `unbind` was called on a binder that never bound its views.
    #[error("Binder for component '{0}' has nothing bound")]
    NotActive(ComponentName),

    /// Namespace mutation failed: an occupied path at bind time, or a
    /// missing path at unbind time (a bookkeeping integrity defect).
    #[error(transparent)]
    Naming(#[from] NamingError),
}
