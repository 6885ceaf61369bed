//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! re-render the originating form with a status that matches the failure.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

use crate::domain::{Error, ErrorCode};

/// Status code reported for a failed form submission.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::WrongPassword => StatusCode::FORBIDDEN,
        ErrorCode::MissingField | ErrorCode::InvalidField => StatusCode::BAD_REQUEST,
        ErrorCode::DuplicateKey => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `200 OK` HTML page.
pub fn html_ok(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// HTML page rendered for `error`, with the matching status.
pub fn html_error(error: &Error, body: String) -> HttpResponse {
    HttpResponse::build(status_for(error.code()))
        .content_type(ContentType::html())
        .body(body)
}
