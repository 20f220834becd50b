//! rmqpolicy core: RabbitMQ policy value objects and the apply/clear protocol.
//!
//! This crate models broker policies (generic, TTL, HA mirroring), renders
//! them into `rabbitmqctl` argument vectors, and applies or clears them
//! through caller-supplied collaborators (`CommandRunner`, `StatusReporter`,
//! `VersionProbe`). It performs no process or filesystem access on its own,
//! so the same types serve the agent binary and tests alike.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Validation errors
//! surface as `PolicyError`; operational failures are absorbed by
//! `Policy::apply`/`Policy::clear` and reported through the status port.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod coerce;
pub mod error;
pub mod policy;
pub mod ports;
pub mod protocol;
pub mod registry;

/// Shared result type.
pub use error::{PolicyError, Result};
pub use policy::{ApplyTo, BasePolicy, HaMode, HaPolicy, HaSyncMode, Policy, PolicyKey, TtlPolicy};
pub use ports::{CommandFailure, CommandRunner, PolicyHost, StatusReporter, VersionProbe, WorkloadState};
pub use registry::{PolicyArgs, PolicyType};
