use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use comms_core::CommsError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CommsError>() {
            Some(e) => status_for(e),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn status_for(e: &CommsError) -> StatusCode {
    match e {
        CommsError::InvalidEngagement(_)
        | CommsError::InvalidValue { .. }
        | CommsError::InvalidRating(_)
        | CommsError::EmptyField(_)
        | CommsError::InvalidPicture => StatusCode::BAD_REQUEST,
        CommsError::RequirementNotFound(_) => StatusCode::NOT_FOUND,
        CommsError::Busy(_) => StatusCode::CONFLICT,
        CommsError::UnsupportedFile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CommsError::Gateway(_) | CommsError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        CommsError::MissingCredentials(_) => StatusCode::SERVICE_UNAVAILABLE,
        CommsError::ConfigNotFound(_)
        | CommsError::Io(_)
        | CommsError::Yaml(_)
        | CommsError::Json(_)
        | CommsError::Zip(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
