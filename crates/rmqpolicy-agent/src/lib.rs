//! rmqpolicy agent library entry.
//!
//! This crate provides the host-side collaborators (process runner, status
//! hook, package version probe), `rabbitmqctl` queries, the policy file
//! loader, and the command implementations behind the `rmqpolicy` binary.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod commands;
pub mod config;
pub mod ctl;
pub mod host;
