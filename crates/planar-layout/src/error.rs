#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout produced a non-finite position for node index {node_ix}")]
    NonFinitePosition { node_ix: usize },
    #[error("invalid layout option `{name}`: {message}")]
    InvalidOption { name: &'static str, message: String },
}

impl Error {
    pub(crate) fn invalid_option(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
