//! Generic policy: the caller supplies the definition document verbatim.
//!
//! Any broker policy can be expressed this way. The typed variants exist for
//! definitions whose keys or broker support differ between versions.

use super::target::{target_builders, PolicyTarget};

#[derive(Debug, Clone)]
pub struct BasePolicy {
    target: PolicyTarget,
    definition: Option<String>,
}

impl BasePolicy {
    pub const KIND: &'static str = "BasePolicy";
    pub const TYPE_TAG: &'static str = "generic";

    /// A policy with no pattern or definition is enough for `clear`;
    /// `apply` needs both.
    pub fn new(vhost: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            target: PolicyTarget::new(vhost, name, Self::TYPE_TAG),
            definition: None,
        }
    }

    /// Definition must be a JSON document understood by the broker.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn set_definition(&mut self, definition: impl Into<String>) {
        self.definition = Some(definition.into());
    }
}

target_builders!(BasePolicy);
