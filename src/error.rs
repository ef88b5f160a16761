use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    Missing(&'static str),

    #[error("{name} is invalid: {detail}")]
    Invalid { name: &'static str, detail: String },
}

/// Failures of the callback route. All of them are reported to the browser
/// with a 200 and a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("No code provided")]
    MissingCode,

    #[error("state mismatch")]
    StateMismatch,

    #[error("{0}")]
    ExchangeFailure(String),
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        let body = match &self {
            CallbackError::MissingCode => self.to_string(),
            _ => format!("Error: {}", self),
        };

        (StatusCode::OK, body).into_response()
    }
}

impl From<reqwest::Error> for CallbackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CallbackError::ExchangeFailure(format!("token request timed out: {}", err))
        } else {
            CallbackError::ExchangeFailure(format!("token request failed: {}", err))
        }
    }
}
