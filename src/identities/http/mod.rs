use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use crate::{
    http_err::{ApiError, ApiResponse, ErrorRep},
    server::AppState,
};

use super::services::{IdentityService, RegisterUserError};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new().route("/register", get(describe_registration).post(register))
}

/// Describe the registration contract for clients poking at the endpoint with
/// a GET request.
async fn describe_registration() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Registration endpoint",
        "method": "POST",
        "required_fields": {
            "email": "string (valid email format)",
            "password": "string (minimum of 8 characters)",
        },
        "optional_fields": {
            "full_name": "string (max 100 characters)",
            "country_code": "string (ISO 3166 alpha-2, e.g. NO, GB)",
            "preferred_currency": "string (ISO 4217 alpha-3, e.g. EUR, NOK)",
        },
        "example": {
            "email": "user@example.com",
            "password": "SecurePass123",
            "full_name": "Alexander Hamilton",
            "country_code": "NO",
        },
    }))
}

pub enum RegisterResponse {
    Created(reps::NewUserResponse),
    BadRequest(reps::NewUserValidationError),
    Conflict(ErrorRep),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(user) => (StatusCode::CREATED, Json(user)).into_response(),
            Self::BadRequest(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::Conflict(error) => (StatusCode::CONFLICT, Json(error)).into_response(),
        }
    }
}

async fn register(
    State(identity_service): State<IdentityService>,
    headers: HeaderMap,
    Json(new_user): Json<reps::NewUserRequest>,
) -> ApiResponse<RegisterResponse> {
    let client = client_identifier(&headers);

    match identity_service.register_user(&client, new_user.into()).await {
        Ok(user) => Ok(RegisterResponse::Created(reps::NewUserResponse {
            email: user.email().address().to_owned(),
        })),
        Err(RegisterUserError::InvalidUser(context)) => {
            Ok(RegisterResponse::BadRequest(context.into()))
        }
        Err(RegisterUserError::DuplicateEmail(_)) => Ok(RegisterResponse::Conflict(ErrorRep {
            message: "Email already registered.".to_owned(),
        })),
        Err(RegisterUserError::RateLimited(_)) => Err(ApiError::TooManyRequests),
        Err(error) => {
            error!(?error, "Failed to register user.");

            Err(ApiError::InternalServerError)
        }
    }
}

/// Identify the client for rate limiting purposes. The service is expected to
/// run behind a reverse proxy, so prefer the first hop it recorded.
fn client_identifier(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_owned())
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn client_identifier_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 198.51.100.2".parse().unwrap(),
        );

        assert_eq!("203.0.113.7", client_identifier(&headers));
    }

    #[test]
    fn client_identifier_without_header_is_unknown() {
        assert_eq!("unknown", client_identifier(&HeaderMap::new()));
    }
}
