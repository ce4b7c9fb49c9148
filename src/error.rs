use thiserror::Error;

pub type Result<T> = std::result::Result<T, WardenError>;

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Illegal value for parameter: {0}")]
    IllegalParameter(String),

    #[error("Does not exist: {0}")]
    DoesNotExist(String),

    #[error("Bad format: {0}")]
    BadFormat(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WardenError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
