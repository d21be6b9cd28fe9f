//! taskboard-core library.
//!
//! Board data model, the view derivation engine, and the caller-side
//! workflows that mutate a board through a [`mutation::BoardBackend`].
//!
//! # Conventions
//!
//! - **Errors**: `BoardError` for backend workflows, `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod access;
pub mod api;
pub mod config;
pub mod derive;
pub mod due;
pub mod error;
pub mod model;
pub mod mutation;

pub use derive::{BoardSnapshot, BoardView, ViewConfig, derive_view};
pub use error::{BoardError, ErrorCode};
