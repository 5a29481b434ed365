use crate::node_id::NodeId;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an invariant violation was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Planarity,
    Euler,
    Layout,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Planarity => "planarity",
            Stage::Euler => "euler",
            Stage::Layout => "layout",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    InvalidEdge,
    SelfLoopRejected,
    AlgorithmInvariant,
    InvalidOptions,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::InvalidEdge => "invalid_edge",
            ErrorKind::SelfLoopRejected => "self_loop_rejected",
            ErrorKind::AlgorithmInvariant => "algorithm_invariant",
            ErrorKind::InvalidOptions => "invalid_options",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Invalid edge at index {index}: {message}")]
    InvalidEdge { index: usize, message: String },

    #[error("Self-loop rejected at edge {index}: node {node} connects to itself")]
    SelfLoopRejected { index: usize, node: NodeId },

    #[error("Algorithm invariant violated ({stage}): {message}")]
    AlgorithmInvariant { stage: Stage, message: String },

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_edge(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEdge {
            index,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::MalformedInput,
            Error::InvalidEdge { .. } => ErrorKind::InvalidEdge,
            Error::SelfLoopRejected { .. } => ErrorKind::SelfLoopRejected,
            Error::AlgorithmInvariant { .. } => ErrorKind::AlgorithmInvariant,
            Error::InvalidOptions { .. } => ErrorKind::InvalidOptions,
        }
    }

    /// `true` for internal defects, `false` for problems with the caller's input or options.
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::AlgorithmInvariant { .. })
    }
}

impl From<planarity::Error> for Error {
    fn from(err: planarity::Error) -> Self {
        match err {
            planarity::Error::Invariant { message } => Error::AlgorithmInvariant {
                stage: Stage::Planarity,
                message,
            },
        }
    }
}

impl From<planar_layout::Error> for Error {
    fn from(err: planar_layout::Error) -> Self {
        match err {
            planar_layout::Error::NonFinitePosition { .. } => Error::AlgorithmInvariant {
                stage: Stage::Layout,
                message: err.to_string(),
            },
            planar_layout::Error::InvalidOption { .. } => Error::InvalidOptions {
                message: err.to_string(),
            },
        }
    }
}
