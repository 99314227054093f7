use thiserror::Error;

use crate::constants::EchoedParams;

#[derive(Error, Debug)]
pub enum EphError {
    #[error("'{0}' cannot be interpreted as a Horizons parameter")]
    UnknownParameter(String),

    #[error("Value '{value}' cannot be interpreted for parameter {param}")]
    UninterpretableValue { param: String, value: String },

    #[error("Bad request, Horizons says: {message}")]
    BadRequest {
        message: String,
        echoed_params: EchoedParams,
    },

    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("Unable to parse the Horizons response: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("None of the following configuration files were found: {}", .0.join(", "))]
    ConfigNotFound(Vec<String>),

    #[error("Unable to parse the configuration file: {0}")]
    ConfigParse(String),

    #[error("Configuration section not found: {0}")]
    ConfigSectionNotFound(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl EphError {
    /// Build a pre-flight [`EphError::BadRequest`] (no echoed parameters).
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        EphError::BadRequest {
            message: message.into(),
            echoed_params: EchoedParams::new(),
        }
    }
}

impl From<ureq::Error> for EphError {
    fn from(err: ureq::Error) -> Self {
        EphError::ConnectionFailure(err.to_string())
    }
}

impl From<toml::de::Error> for EphError {
    fn from(err: toml::de::Error) -> Self {
        EphError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EphError>;

impl PartialEq for EphError {
    fn eq(&self, other: &Self) -> bool {
        use EphError::*;
        match (self, other) {
            (UnknownParameter(a), UnknownParameter(b)) => a == b,
            (
                UninterpretableValue { param: p1, value: v1 },
                UninterpretableValue { param: p2, value: v2 },
            ) => p1 == p2 && v1 == v2,
            (
                BadRequest {
                    message: m1,
                    echoed_params: e1,
                },
                BadRequest {
                    message: m2,
                    echoed_params: e2,
                },
            ) => m1 == m2 && e1 == e2,
            (ConnectionFailure(a), ConnectionFailure(b)) => a == b,
            (ParseError(a), ParseError(b)) => a == b,
            (InvalidUrl(a), InvalidUrl(b)) => a == b,
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (ConfigNotFound(a), ConfigNotFound(b)) => a == b,
            (ConfigParse(a), ConfigParse(b)) => a == b,
            (ConfigSectionNotFound(a), ConfigSectionNotFound(b)) => a == b,

            // not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
