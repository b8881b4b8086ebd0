//! Shared configuration and error types for the zonegate control-plane core.
//!
//! This crate provides the foundational building blocks shared by the
//! authentication and zone-domain crates: an ambient process-level
//! [`CoreConfig`] and the infrastructural [`ZonegateError`] taxonomy. It has
//! no dependency on any domain crate, matching the core's dependency order:
//! leaves first.

mod config;
mod error;

pub use config::CoreConfig;
pub use error::{ZonegateError, ZonegateResult};
