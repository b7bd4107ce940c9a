use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Non-success status with a JSON `{error}` body.
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Inline text shown in the result pane.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Server(message) => format!("Error: {}", message),
            other => format!("Error converting file(s): {}", other),
        }
    }
}
