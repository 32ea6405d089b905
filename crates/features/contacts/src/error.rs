use std::borrow::Cow;

/// Contacts error type, shared by the resource handlers and the page controller.
#[cdesk_derive::cdesk_error]
pub enum ContactError {
    /// A required field or identifier is missing. Surfaces as HTTP 400.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No contact has the requested identifier.
    #[error("Contact {id} not found{}", format_context(.context))]
    NotFound { id: i64, context: Option<Cow<'static, str>> },

    /// The request body is not a JSON object of the expected shape. Surfaces as HTTP 400.
    #[cfg(feature = "server")]
    #[error("Invalid request body{}: {source}", format_context(.context))]
    Payload {
        source: axum::extract::rejection::JsonRejection,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(feature = "server")]
    #[error("Database error{}: {source}", format_context(.context))]
    Database { source: cdesk_database::DatabaseError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Store error{}: {source}", format_context(.context))]
    Store { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Application state error{}: {source}", format_context(.context))]
    State {
        source: cdesk_kernel::server::ApiStateError,
        context: Option<Cow<'static, str>>,
    },

    /// The request never produced a usable response.
    #[cfg(feature = "client")]
    #[error("HTTP error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The server answered with an error body.
    #[cfg(feature = "client")]
    #[error("Request rejected with status {status}{}: {message}", format_context(.context))]
    Rejected { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContactError {
    pub(crate) fn validation(message: &'static str) -> Self {
        Self::Validation { message: Cow::Borrowed(message), context: None }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::ContactError;
    use crate::domain::ErrorBody;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    impl IntoResponse for ContactError {
        fn into_response(self) -> Response {
            let (status, error) = match self {
                Self::Validation { message, .. } => (StatusCode::BAD_REQUEST, message.into_owned()),
                Self::Payload { source, .. } => (StatusCode::BAD_REQUEST, source.body_text()),
                other => {
                    tracing::error!(error = %other, "Contact request failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
                }
            };

            (status, Json(ErrorBody { error })).into_response()
        }
    }
}
