use thiserror::Error;

/// Which of the three classic failure shapes a payload problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Key,
    Value,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("response is not a mapping")]
    NotAMapping,

    #[error("response is missing the homeworks list")]
    MissingHomeworks,

    #[error("homeworks is not a list")]
    HomeworksNotAList,

    #[error("current_date is not an integer")]
    CurrentDateNotInteger,
}

impl SchemaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::MissingHomeworks => ErrorKind::Key,
            SchemaError::NotAMapping
            | SchemaError::HomeworksNotAList
            | SchemaError::CurrentDateNotInteger => ErrorKind::Type,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("homework record is not a mapping")]
    NotAMapping,

    #[error("homework record is missing the \"{field}\" field")]
    MissingField { field: &'static str },

    #[error("homework field \"{field}\" is not a string")]
    NotAString { field: &'static str },

    #[error("unexpected verdict code \"{code}\"")]
    UnexpectedVerdict { code: String },
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::MissingField { .. } => ErrorKind::Key,
            ExtractionError::UnexpectedVerdict { .. } => ErrorKind::Value,
            ExtractionError::NotAMapping | ExtractionError::NotAString { .. } => ErrorKind::Type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Schema,
    Extraction,
    Delivery,
    Configuration,
}

#[derive(Error, Debug)]
pub enum BotError {
    #[error("connection to the status API failed: {message}")]
    Connection { message: String },

    #[error("status API request timed out")]
    Timeout,

    #[error("status API returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("status API response is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("status API request failed: {message}")]
    Request { message: String },

    #[error("unexpected API response: {0}")]
    Schema(#[from] SchemaError),

    #[error("cannot read homework status: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("message delivery failed: {message}")]
    Delivery { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl BotError {
    /// Classifies a reqwest failure raised while talking to the status API.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BotError::Timeout
        } else if err.is_connect() {
            BotError::Connection {
                message: err.to_string(),
            }
        } else {
            BotError::Request {
                message: err.to_string(),
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::Connection { .. }
            | BotError::Timeout
            | BotError::HttpStatus { .. }
            | BotError::InvalidJson { .. }
            | BotError::Request { .. } => ErrorCategory::Transport,
            BotError::Schema(_) => ErrorCategory::Schema,
            BotError::Extraction(_) => ErrorCategory::Extraction,
            BotError::Delivery { .. } => ErrorCategory::Delivery,
            BotError::IoError(_)
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Only configuration problems may stop the process.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::MissingConfigError { field } => format!(
                "Environment variable or setting {} is missing, the bot cannot start",
                field
            ),
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            BotError::ConfigValidationError { field, message } => {
                format!("Cannot load configuration ({}): {}", field, message)
            }
            BotError::IoError(e) => format!("Cannot read configuration file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
