//! Caller identity extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use postboard_core::domain::Principal;
use postboard_core::ports::AuthError;
use postboard_shared::ErrorResponse;

use crate::state::AppState;

/// The authenticated caller, taken from the `sub` claim of a bearer token.
///
/// Use this in handlers that mutate state:
/// ```ignore
/// async fn like(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.principal)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub principal: Principal,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::unauthorized(
                "Your authentication token has expired. Please obtain a new one.",
            ),
            AuthError::InvalidToken(msg) => ErrorResponse::unauthorized(msg.clone()),
            AuthError::MissingAuth => ErrorResponse::unauthorized(
                "Please provide a valid Bearer token in the Authorization header.",
            ),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AuthenticationError(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ))));
        };

        let result = bearer_token(req)
            .and_then(|token| state.tokens.validate_token(token))
            .map(|claims| Identity {
                principal: claims.principal,
            })
            .map_err(AuthenticationError);

        ready(result)
    }
}
