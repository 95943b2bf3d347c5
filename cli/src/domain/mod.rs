//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod helm_set;
pub mod identifier;
pub mod plan;
pub mod spec;
pub mod values;

pub use config::Qd2Config;
pub use error::{FieldError, InstallerError, SpecError};
pub use identifier::{Identifier, is_valid_identifier};
pub use plan::{Component, Slot, deployment_sequence, resolve_namespace, teardown_targets};
pub use spec::{Purpose, validate};
