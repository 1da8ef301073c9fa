use thiserror::Error;

/// Errors surfaced to callers of the scoreboard engines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Team name exceeds the client limit
    #[error("team name '{name}' is {length} chars long, the limit is {max}")]
    InvalidName {
        name: String,
        length: usize,
        max: usize,
    },
    /// Another team on the same engine already uses the name (case-insensitive)
    #[error("a team named '{0}' already exists on this scoreboard")]
    DuplicateName(String),
    /// The name would be mistaken for one of the engine's line teams
    #[error("team name '{name}' is reserved for lines ('{prefix}' followed by digits)")]
    ReservedName { name: String, prefix: String },
    /// A rendered line serializes to more chars than a sidebar row holds
    #[error("line '{line}' serializes to {length} chars, the limit is {max}")]
    LineTooLong {
        line: String,
        length: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, BoardError>;
