//! Request extractors whose rejections render as [`AdminError`].
//!
//! Malformed bodies, path segments and query strings become
//! [`AdminError::InvalidRequest`] (400, code 1001).

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AdminError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AdminError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AdminError))]
pub struct AppPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AdminError))]
pub struct AppQuery<T>(pub T);
