use std::fmt;

#[derive(Debug)]
pub enum EduImaginaError {
    ConfigError(String),
    InvalidInput(String),
    RequestError(String),
    ResponseError(String),
    RuntimeError(String),
    DecodeError(String),
    InternalError(String),
}

impl fmt::Display for EduImaginaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EduImaginaError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            EduImaginaError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EduImaginaError::RequestError(msg) => write!(f, "Request error: {}", msg),
            EduImaginaError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            EduImaginaError::RuntimeError(msg) => write!(f, "Inference runtime error: {}", msg),
            EduImaginaError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            EduImaginaError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for EduImaginaError {}

pub type Result<T> = std::result::Result<T, EduImaginaError>;
