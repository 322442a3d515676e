//! HTTP handlers for all routes.

pub mod health;
pub mod identify;
pub mod monitor;
pub mod recommend;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use remedix_common::ApiError;

/// Body parse failures are reported as 400 with the original field wording.
pub(crate) fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(format!("Missing required fields: {}", rejection.body_text()))
}

/// Query-string failures get the same JSON error body.
pub(crate) fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(format!("Missing required fields: {}", rejection.body_text()))
}
