use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid stop at index {index}: {reason}")]
    InvalidStop { index: usize, reason: String },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_stop(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStop {
            index,
            reason: reason.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn invalid_stop_reports_index_and_reason() {
        let err = Error::invalid_stop(3, "latitude is NaN");
        assert_eq!(err.to_string(), "invalid stop at index 3: latitude is NaN");
    }
}
