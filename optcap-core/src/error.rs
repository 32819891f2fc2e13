use thiserror::Error;

use crate::Capability;

/// Errors raised by this crate.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("`{type_name}` does not provide the {capability} capability")]
    MissingCapability {
        type_name: &'static str,
        capability: Capability,
    },

    /// A message raised through [`throw!`](crate::throw), usually decorated
    /// with its call site.
    #[error("{0}")]
    Message(String),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}
