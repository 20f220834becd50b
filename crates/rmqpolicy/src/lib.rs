//! Top-level facade crate for rmqpolicy.
//!
//! Re-exports the policy model and the agent library so users can depend on a single crate.

pub mod core {
    pub use rmqpolicy_core::*;
}

pub mod agent {
    pub use rmqpolicy_agent::*;
}
