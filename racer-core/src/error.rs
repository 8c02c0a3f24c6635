//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum RacerError {
    /// No serialized agent at the given path.
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl RacerError {
    /// Returns the process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_not_found_message_names_path() {
        let err = RacerError::ModelNotFound(PathBuf::from("./models/final_driver"));
        assert_eq!(err.to_string(), "Model file not found: ./models/final_driver");
        assert_eq!(err.exit_code(), 1);
    }
}
