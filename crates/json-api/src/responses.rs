//! Error envelope rendering.

use salvo::{
    Response, Scribe,
    catcher::Catcher,
    handler,
    http::{ResBody, StatusCode},
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{FlowCtrl, Json},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    /// Machine-readable error category
    pub error: String,

    /// Human-readable description
    pub message: String,

    /// HTTP status code
    pub code: u16,
}

/// An HTTP error that renders as an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub(crate) fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", message)
    }

    /// Internal failures never leak their cause to the client.
    pub(crate) fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            "Internal server error",
        )
    }

    /// Stand-in for errors salvo produced without a handler speaking,
    /// such as unparseable bodies or unmatched routes.
    pub(crate) fn from_status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Request failed");

        match status {
            StatusCode::BAD_REQUEST => Self::bad_request("Invalid request"),
            StatusCode::NOT_FOUND => Self::not_found("Resource not found"),
            status if status.is_server_error() => Self::new(status, "server_error", reason),
            status => Self::new(status, "error", reason),
        }
    }

    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) const fn error(&self) -> &'static str {
        self.error
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorEnvelope {
            error: self.error.to_owned(),
            message: self.message,
            code: self.status.as_u16(),
        }));
    }
}

#[handler]
async fn envelope_bare_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    res.replace_body(ResBody::None);
    res.render(ApiError::from_status(status));
    ctrl.skip_rest();
}

/// Catcher that renders every error salvo raises on its own as an envelope.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(envelope_bare_errors)
}

// Error responses are declared on each endpoint.
impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, _operation: &mut Operation) {}
}
