#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An internal contradiction in the left-right test. Always a defect, never bad input.
    #[error("planarity invariant violated: {message}")]
    Invariant { message: String },
}

impl Error {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
