//! REST API module.
//!
//! Every collection is served by the same handlers under `/api/{type}`.

mod form;
mod records;

pub use form::*;
pub use records::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Successful response: a bare JSON body, or nothing at all.
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    Ok(T),
    Created(T),
    NoContent,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Ok(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Created(data) => (StatusCode::CREATED, Json(data)).into_response(),
            ApiResponse::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// 200 with `data` as the body.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::Ok(data))
}

/// 201 with the created record as the body.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::Created(data))
}

/// 204 with an empty body.
pub fn no_content() -> ApiResult<()> {
    Ok(ApiResponse::NoContent)
}
