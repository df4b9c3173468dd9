// src/errors.rs

use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Client-side error taxonomy. Every failure leaving a service wrapper is
/// one of these; view layers render `user_message` and decide nothing else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: cannot connect to server")]
    NetworkUnavailable,

    #[error("session expired")]
    AuthExpired,

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("resource not found")]
    NotFound,

    #[error("server error: {0}")]
    ServerError(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl ApiError {
    /// Message suitable for direct display next to the affected view.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NetworkUnavailable => {
                "Network error: cannot connect to the server. Please check your connection."
                    .to_string()
            }
            ApiError::AuthExpired => "Your session has expired. Please log in again.".to_string(),
            ApiError::Forbidden(detail) => format!("Access denied. {}", detail),
            ApiError::NotFound => "The requested resource was not found.".to_string(),
            ApiError::ServerError(_) => {
                "An unexpected server error occurred. Please try again.".to_string()
            }
            ApiError::ValidationFailed(detail) => detail.clone(),
        }
    }

    /// An expired session is the only error with a side-effecting recovery:
    /// the session store is cleared and the user has to log in again.
    pub fn forces_logout(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// Maps a non-success HTTP status (plus the server's message, when the
    /// body carried one) onto the taxonomy.
    pub(crate) fn from_status(status: StatusCode, server_message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthExpired,
            StatusCode::FORBIDDEN => ApiError::Forbidden(
                server_message.unwrap_or_else(|| "Insufficient permissions.".to_string()),
            ),
            StatusCode::NOT_FOUND => ApiError::NotFound,
            status if status.is_server_error() => ApiError::ServerError(
                server_message.unwrap_or_else(|| format!("status {}", status)),
            ),
            status => ApiError::ValidationFailed(
                server_message.unwrap_or_else(|| format!("request rejected with status {}", status)),
            ),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            tracing::error!("network failure talking to the API: {}", err);
            ApiError::NetworkUnavailable
        } else if err.is_decode() {
            tracing::error!("malformed response body from the API: {}", err);
            ApiError::ServerError("malformed response body".to_string())
        } else {
            tracing::error!("unexpected HTTP client error: {}", err);
            ApiError::ServerError(err.to_string())
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let msg = error.message.as_ref().map_or_else(
                    || format!("Field '{}' is invalid", field),
                    |m| format!("Field '{}': {}", field, m),
                );
                messages.push(msg);
            }
        }
        ApiError::ValidationFailed(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth_expired() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, None);
        assert!(matches!(err, ApiError::AuthExpired));
        assert!(err.forces_logout());
    }

    #[test]
    fn server_statuses_map_to_server_error() {
        for code in [500u16, 502, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = ApiError::from_status(status, None);
            assert!(matches!(err, ApiError::ServerError(_)), "status {}", code);
            assert!(!err.forces_logout());
        }
    }

    #[test]
    fn client_statuses_keep_the_server_message() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("Transaction cannot be accepted".to_string()),
        );
        match err {
            ApiError::ValidationFailed(msg) => {
                assert_eq!(msg, "Transaction cannot be accepted");
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn forbidden_keeps_detail_in_user_message() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            Some("Vendor access required.".to_string()),
        );
        assert_eq!(err.user_message(), "Access denied. Vendor access required.");
    }
}
