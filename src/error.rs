//! Error types
//!
//! Nothing in the per-tick path returns errors; these cover construction-time
//! validation and configuration loading only.

use thiserror::Error;

use crate::recipe::Action;

/// Result alias for fallible game setup
pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    /// A step that needs an ingredient was defined without one
    #[error("step '{action}' has no ingredients")]
    EmptyIngredients { action: Action },

    /// Unrecognised step action tag
    #[error("unknown cooking action: {0}")]
    UnknownAction(String),

    /// Settings could not be parsed
    #[error("settings error: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Settings(err.to_string())
    }
}
