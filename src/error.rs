use thiserror::Error;

/// Errors reported to the host for a single export.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Wrong parameters.")]
    InvalidParameters,

    #[error("Unknown metric key: {0}")]
    UnknownMetric(String),

    #[error("Request timeout.")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Cannot read response body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl WeatherError {
    /// Classifies a failure raised while sending the request
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }

    /// Classifies a failure raised while streaming the response body
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::BodyRead(err)
        }
    }

    /// True when the host supplied something this plugin cannot serve
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidParameters | Self::UnknownMetric(_))
    }
}

/// Errors produced while decoding a plugin options block.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("cannot decode options: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid {field} value {value}: must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("metric {key} is already registered by plugin {plugin}")]
    DuplicateMetric {
        key: &'static str,
        plugin: &'static str,
    },
}
