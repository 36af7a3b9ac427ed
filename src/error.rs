use thiserror::Error;

/// Terminal error carried by a stream.
///
/// Once a node fails, every node downstream of it fails with the same error and stops.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// A view could not be built.
    #[error("render failed: {0}")]
    Render(String),
    /// An operator rejected a value.
    #[error("{0}")]
    Operator(String),
}

/// How a stream ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    Complete,
    Error(StreamError),
}

impl Terminal {
    pub fn error(&self) -> Option<&StreamError> {
        match self {
            Terminal::Complete => None,
            Terminal::Error(error) => Some(error)
        }
    }
}
