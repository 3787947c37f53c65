use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Saved report '{0}' not found")]
    NotFound(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Stable error kind used on the wire
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::UnknownField(_) => "UnknownField",
            Self::NotFound(_) => "NotFound",
            Self::Parse(_) => "Parse",
            Self::Config(_) => "Config",
            Self::Io(_) => "Io",
            Self::Serialization(_) => "Serialization",
        }
    }
}

impl From<config::ConfigError> for ReportError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
