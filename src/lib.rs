//! In-memory product catalog built on a single store actor.
//!
//! - [`actor_framework`]: the generic record store actor and its client
//! - [`product_actor`]: product entity, validation rules and errors
//! - [`clients::ProductClient`]: the service layer callers use
//! - [`retry`]: retry policy for transient failures
//! - [`app_system`]: configuration, tracing setup and system lifecycle

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod format;
pub mod product_actor;
pub mod retry;

#[cfg(test)]
mod mock_framework;
