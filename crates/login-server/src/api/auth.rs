//! Sign-up and login routes

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use login_core::{Error, RegisterRequest};

use super::AppState;

/// Auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/login", post(login))
}

/// One entry in the error envelope
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub timestamp: String,
    pub code: u16,
    pub detail: String,
}

/// Error envelope returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: Vec<ErrorDetail>,
}

/// Core error carried to the wire.
///
/// Domain failures become 400 with the core error message; anything else
/// is a 500 with a generic detail, logged server-side.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = if self.0.is_client_error() {
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            tracing::error!("internal error: {}", self.0);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        };

        let body = ErrorResponse {
            error: vec![ErrorDetail {
                timestamp: Utc::now().to_rfc3339(),
                code: status.as_u16(),
                detail,
            }],
        };

        (status, Json(body)).into_response()
    }
}

/// Register a new user
async fn sign_up(
    State(service): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with a bearer token from the Authorization header
async fn login(
    State(service): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError(Error::MalformedToken))?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);

    let user = service.login(token).await?;
    Ok(Json(user))
}
