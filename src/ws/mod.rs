//! WebSocket layer: change notifications for open dashboards.
//!
//! The endpoint at `/ws` (admin-gated) lets a client subscribe to the
//! views it displays. After every successful write the matching
//! [`crate::domain::AdminEvent`] is pushed so the client can reload that
//! view.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
