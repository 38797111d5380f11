//! dx Services Layer
//!
//! This crate connects the editing core to the data-plane service. It owns
//! no domain logic of its own: drafts are compiled by `dx-table-designer`
//! and `dx-row-editor`, and the services here send the results.
//!
//! # Architecture
//!
//! ```text
//! Dashboard UI
//!     ↓
//! Service Layer (dx-services) ← This crate
//!     ↓
//! Domain Layer (dx-table-designer, dx-row-editor)
//!     ↓
//! Core (dx-core)
//! ```
//!
//! # Services
//!
//! - [`SchemaService`] - Schema loading with a cached snapshot
//! - [`TableDesignService`] - Sends compiled schema drafts, one request at a time
//! - [`TableService`] - Row paging and row writes
//!
//! [`DatabaseState`] is the dashboard's editing state: one owned value
//! changed only through [`DatabaseAction`]s.

mod config;
mod data_plane;
mod database_state;
mod error;
pub mod logging;
mod schema_service;
mod table_design_service;
mod table_service;

pub use config::{DataPlaneConfig, ENV_DATA_PLANE_URL, ENV_ENV_ID};
pub use data_plane::{DEV_HOST_HEADER, DataPlane, HttpDataPlane, endpoints};
pub use database_state::{DatabaseAction, DatabaseState, NavDef, reduce};
pub use error::{ServiceError, ServiceResult};
pub use schema_service::SchemaService;
pub use table_design_service::TableDesignService;
pub use table_service::{RowPage, TableService};
