use thiserror::Error;

/// Failure of a single outbound call. Captured in its outcome slot, never
/// raised past the join barrier.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("request to {endpoint} failed")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("prediction service error: {0}")]
    Prediction(String),
}

impl CallError {
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            CallError::Decode {
                endpoint: endpoint.to_string(),
                source: err,
            }
        } else if let Some(status) = err.status() {
            CallError::Status {
                endpoint: endpoint.to_string(),
                status,
            }
        } else {
            CallError::Network {
                endpoint: endpoint.to_string(),
                source: err,
            }
        }
    }

    /// True for transport-level failures (connection, timeout, non-2xx).
    pub fn is_network(&self) -> bool {
        matches!(self, CallError::Network { .. } | CallError::Status { .. })
    }
}

/// A request that is not ready to be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("draft text is empty")]
    EmptyText,
    #[error("headline is empty")]
    EmptyHeading,
    #[error("no category selected")]
    MissingCategory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid {field} URL {value:?}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
