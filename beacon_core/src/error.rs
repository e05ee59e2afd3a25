use std::sync::Arc;

/// Represents a result type for operations in the Beacon SDK.
///
/// This type alias is used throughout the SDK to indicate the result of operations that may return
/// errors specific to the Beacon SDK.
///
/// This `Result` type is a standard Rust `Result` type where the error variant is defined by the
/// beacon-specific [`Error`] enum.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur in the Beacon SDK.
///
/// Note that dispatching operations never returns errors: an absent destination, an unsupported
/// operation, or a failing destination handler all degrade to a no-op for that destination. The
/// variants here cover the edges around dispatch (the ready timer and page metadata
/// configuration).
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Invalid URL supplied to the page metadata configuration.
    #[error("invalid page url")]
    InvalidPageUrl(#[source] url::ParseError),

    /// Indicates that the ready timer thread panicked. This should normally never happen.
    #[error("ready timer thread panicked")]
    ReadyTimerPanicked,

    /// An I/O error.
    #[error(transparent)]
    // std::io::Error is not clonable, so we're wrapping it in an Arc.
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}
