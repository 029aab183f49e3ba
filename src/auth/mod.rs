//! Authentication and the role gate.
//!
//! [`claims`] turns a bearer token into a user id; [`session`] provides
//! the extractors that run the admin / superadmin checks of
//! [`crate::service::AccessService`] before a handler body executes.

pub mod claims;
pub mod session;

pub use claims::{SessionClaims, TokenVerifier};
pub use session::{AdminSession, SuperadminSession};
