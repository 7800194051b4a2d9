use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::app_state::AppState;
use crate::auth::Claims;
use crate::error::{ApiError, ErrorCode};

/// Header naming the account a request is made on behalf of.
pub const ACCOUNT_ID_HEADER: &str = "account-id";

/// Longest account id the registry stores.
pub const ACCOUNT_ID_MAX_LENGTH: usize = 20;

/// JWT Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = match auth_header.and_then(|value| value.strip_prefix("Bearer ")) {
        Some(token) if !token.trim().is_empty() => token.trim(),
        _ => {
            return ApiError::with_code(
                ErrorCode::TokenMissing,
                "Missing or invalid Authorization header",
            )
            .into_response();
        }
    };

    match state.jwt_service.decode_token(token) {
        Ok(claims) => {
            debug!(user = %claims.username, roles = ?claims.realm_access.roles, "Token accepted");
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Extractor for authenticated user claims
#[derive(Clone)]
pub struct AuthenticatedUser(pub Claims);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("No authentication found".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Optional `Account-Id` header. Blank values count as absent; values longer
/// than [`ACCOUNT_ID_MAX_LENGTH`] are rejected with 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(pub Option<String>);

impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let account_id = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        if let Some(id) = &account_id {
            if id.chars().count() > ACCOUNT_ID_MAX_LENGTH {
                return Err(ApiError::with_details(
                    ErrorCode::InvalidInput,
                    "Invalid Account-Id header",
                    format!("Account-Id must be at most {} characters", ACCOUNT_ID_MAX_LENGTH),
                ));
            }
        }

        Ok(AccountId(account_id))
    }
}
