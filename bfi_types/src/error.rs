use thiserror::Error;

/// Bracket nesting faults found while building the jump table.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ResolveError {
    #[error("unmatched opening bracket at position {position}")]
    UnmatchedOpening { position: usize },
    #[error("unmatched closing bracket at position {position}")]
    UnmatchedClosing { position: usize },
}

impl ResolveError {
    pub fn position(&self) -> usize {
        match self {
            ResolveError::UnmatchedOpening { position }
            | ResolveError::UnmatchedClosing { position } => *position,
        }
    }
}

/// Anything that stops a `Program` from being loaded.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("error reading program: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
