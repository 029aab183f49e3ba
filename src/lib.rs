//! # washbay-admin
//!
//! Admin REST API for a vehicle-cleaning business.
//!
//! Staff with the `admin` role manage the service catalog, the walk-in
//! queue and the photo gallery; `superadmin`s can also read the activity
//! log. Every write is attributed to the acting user and recorded by the
//! store, then announced on the event bus so open dashboards refresh.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── Auth extractors (auth/) ── role gate
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── Catalog / Queue / Gallery / Activity services (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── AdminStore (persistence/) ── PostgreSQL or in-memory
//!     └── ObjectStorage (storage/)  ── local disk or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
pub mod storage;
pub mod ws;
