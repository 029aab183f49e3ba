//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies keep every user-typed field optional or defaulted so
//! that missing input reaches domain validation and comes back as a
//! structured `400` instead of a body-parsing rejection.

pub mod account_dto;
pub mod common_dto;
pub mod gallery_dto;
pub mod queue_dto;
pub mod service_dto;

pub use account_dto::*;
pub use common_dto::*;
pub use gallery_dto::*;
pub use queue_dto::*;
pub use service_dto::*;
