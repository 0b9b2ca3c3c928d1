//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler validates the request size, runs one reduction from
//! `tally-core`, and maps a `TallyError` to `400 Bad Request`.

use super::types::{
    AverageRequest, CartCountRequest, CartCountResponse, CartRemoveRequest, CartRemoveResponse,
    HealthResponse, MseRequest, UserRequest, UserResponse, ValueResponse,
};
use axum::{Json, http::StatusCode, response::IntoResponse};
use tally_core::{TallyError, average_with, count_weighted, mean_squared_error, remove_by_id};

/// HTTP status for an error raised while serving a request.
fn status_for(error: &TallyError) -> StatusCode {
    match error {
        TallyError::InvalidArgument(_) | TallyError::LengthMismatch { .. } => {
            StatusCode::BAD_REQUEST
        }
        TallyError::Config(_) | TallyError::Serialization(_) | TallyError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// AVERAGE HANDLER
// =============================================================================

/// Compute the mean of `values` with the requested method.
pub async fn average_handler(Json(request): Json<AverageRequest>) -> impl IntoResponse {
    let result = request
        .validate()
        .and_then(|()| average_with(request.method, &request.values));

    match result {
        Ok(value) => {
            tracing::debug!(
                count = request.values.len(),
                method = %request.method,
                "average computed"
            );
            (StatusCode::OK, Json(ValueResponse::success(value)))
        }
        Err(e) => (
            status_for(&e),
            Json(ValueResponse::error(format!("Average failed: {}", e))),
        ),
    }
}

// =============================================================================
// MSE HANDLER
// =============================================================================

/// Compute the mean squared error of two paired sequences.
pub async fn mse_handler(Json(request): Json<MseRequest>) -> impl IntoResponse {
    let result = request
        .validate()
        .and_then(|()| mean_squared_error(&request.actual, &request.predicted));

    match result {
        Ok(value) => (StatusCode::OK, Json(ValueResponse::success(value))),
        Err(e) => (
            status_for(&e),
            Json(ValueResponse::error(format!("MSE failed: {}", e))),
        ),
    }
}

// =============================================================================
// CART HANDLERS
// =============================================================================

/// Sum the quantities of the submitted cart.
pub async fn cart_count_handler(Json(request): Json<CartCountRequest>) -> impl IntoResponse {
    match request.validate() {
        Ok(()) => {
            let total = count_weighted(&request.items);
            (StatusCode::OK, Json(CartCountResponse::success(total)))
        }
        Err(e) => (
            status_for(&e),
            Json(CartCountResponse::error(format!("Invalid cart: {}", e))),
        ),
    }
}

/// Return the submitted cart without the items carrying `id`.
pub async fn cart_remove_handler(Json(request): Json<CartRemoveRequest>) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return (
            status_for(&e),
            Json(CartRemoveResponse::error(format!("Invalid cart: {}", e))),
        );
    }

    let remaining = remove_by_id(&request.items, &request.id);
    let removed = request.items.len() - remaining.len();
    tracing::debug!(id = request.id.0, removed, "cart items removed");

    (
        StatusCode::OK,
        Json(CartRemoveResponse::success(remaining, removed)),
    )
}

// =============================================================================
// USER HANDLER
// =============================================================================

/// Build a normalised user record from the submitted names.
pub async fn user_handler(Json(request): Json<UserRequest>) -> impl IntoResponse {
    match request.to_user() {
        Ok(user) => (StatusCode::OK, Json(UserResponse::success(user))),
        Err(e) => (
            status_for(&e),
            Json(UserResponse::error(format!("Invalid user: {}", e))),
        ),
    }
}
