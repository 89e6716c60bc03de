use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::api::events::{FailureBody, SignupResponse, UserListResponse, ValidationErrorBody};
use crate::api::server::AppState;
use crate::error::RegistrationError;
use crate::registration::{Ack, RegistrationRequest, Transport};

/// Renders registration outcomes as HTTP responses.
pub struct HttpTransport;

impl Transport for HttpTransport {
    type Reply = Response;

    fn acknowledge(&self, ack: Ack) -> Response {
        (StatusCode::CREATED, Json(SignupResponse::new(ack.id))).into_response()
    }

    fn reject(&self, error: RegistrationError) -> Response {
        match &error {
            RegistrationError::Validation | RegistrationError::Decode(_) => validation_failed(),
            RegistrationError::Store(store_err) => {
                warn!(error = %store_err, "user creation failed");
                (StatusCode::UNAUTHORIZED, Json(FailureBody::from(store_err))).into_response()
            }
            RegistrationError::Credential(_) => {
                warn!(error = %error, "password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FailureBody::from(&error)),
                )
                    .into_response()
            }
        }
    }
}

fn validation_failed() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorBody {
            error: RegistrationError::Validation.to_string(),
        }),
    )
        .into_response()
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Response {
    match state.store.list_all().await {
        Ok(users) => Json(UserListResponse::new(users)).into_response(),
        Err(e) => {
            warn!(error = %e, "listing users failed");
            // Status stays 200 on failure; clients only see the error body
            (StatusCode::OK, Json(FailureBody::from(&e))).into_response()
        }
    }
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Response {
    // Non-string fields fail to decode here and get the 400, not a store 401
    let Ok(Json(request)) = payload else {
        return validation_failed();
    };

    state.registrar.respond(&HttpTransport, &request).await
}
