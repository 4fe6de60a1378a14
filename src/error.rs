use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid project name \"{0}\"\nProject names must start with a lowercase letter or digit and only contain lowercase letters, digits, dashes, and underscores")]
    InvalidProjectName(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No free port slot found within the first {0} slots")]
    SlotsExhausted(u16),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
