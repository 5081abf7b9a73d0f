use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures observed while talking to the market-data API.
///
/// Call sites treat both kinds the same way: render the message inline and
/// keep the rest of the page live.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not complete (connect, timeout, non-JSON error page).
    #[error("{endpoint}: {detail}")]
    Transport { endpoint: &'static str, detail: String },

    /// The response completed but reported a failure status.
    #[error("{message}")]
    Application {
        endpoint: &'static str,
        message: String,
    },

    /// The response body did not match the expected envelope.
    #[error("{endpoint}: unexpected response: {detail}")]
    Decode { endpoint: &'static str, detail: String },
}

impl ApiError {
    /// Whether the failure happened before a response could be read.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The endpoint label the failure was observed on.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Application { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// Input validation errors for operator-supplied query values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("at least one symbol is required")]
    NoSymbols,

    #[error("invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown command '{command}' (type 'help' for a list)")]
    UnknownCommand { command: String },

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("preference error: {0}")]
    Preference(String),

    /// A one-shot view finished in an error state that was already rendered.
    #[error("{region} ended in an error state")]
    ViewFailed { region: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_displays_server_message_verbatim() {
        let err = ApiError::Application {
            endpoint: "lookback",
            message: "symbol not found".into(),
        };
        assert_eq!(err.to_string(), "symbol not found");
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_error_names_endpoint() {
        let err = ApiError::Transport {
            endpoint: "provider_status",
            detail: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "provider_status: connection refused");
        assert!(err.is_transport());
        assert_eq!(err.endpoint(), "provider_status");
    }
}
