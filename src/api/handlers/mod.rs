//! REST endpoint handlers organized by resource.

pub mod account;
pub mod gallery;
pub mod logs;
pub mod queues;
pub mod services;
pub mod system;
pub mod tags;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(account::routes())
        .merge(services::routes())
        .merge(queues::routes())
        .merge(tags::routes())
        .merge(gallery::routes())
        .merge(logs::routes())
}
