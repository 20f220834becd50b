//! Targeting fields shared by every policy variant.

use std::fmt::Display;

use crate::error::Result;

use super::types::ApplyTo;

/// Identity of a policy: two policies with the same key are the same policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolicyKey {
    pub vhost: String,
    pub name: String,
}

/// Where a policy lives and what it matches.
///
/// `apply_to` is only reachable through validating setters.
#[derive(Debug, Clone)]
pub struct PolicyTarget {
    pub(crate) vhost: String,
    pub(crate) name: String,
    pub(crate) pattern: Option<String>,
    apply_to: ApplyTo,
    pub(crate) priority: String,
    pub(crate) type_tag: String,
}

impl PolicyTarget {
    pub(crate) fn new(vhost: impl Into<String>, name: impl Into<String>, type_tag: &str) -> Self {
        Self {
            vhost: vhost.into(),
            name: name.into(),
            pattern: None,
            apply_to: ApplyTo::default(),
            priority: "1".to_string(),
            type_tag: type_tag.to_string(),
        }
    }

    pub fn key(&self) -> PolicyKey {
        PolicyKey {
            vhost: self.vhost.clone(),
            name: self.name.clone(),
        }
    }

    pub fn vhost(&self) -> &str {
        &self.vhost
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn apply_to(&self) -> ApplyTo {
        self.apply_to
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn set_vhost(&mut self, vhost: impl Into<String>) {
        self.vhost = vhost.into();
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = Some(pattern.into());
    }

    /// Validate and assign the apply-to scope. On error the old value is kept.
    pub fn set_apply_to(&mut self, value: &str) -> Result<()> {
        self.apply_to = value.parse()?;
        Ok(())
    }

    pub fn set_apply_to_scope(&mut self, value: ApplyTo) {
        self.apply_to = value;
    }

    /// Priority is kept as text; the broker rejects non-numeric values.
    pub fn set_priority(&mut self, priority: impl Display) {
        self.priority = priority.to_string();
    }

    pub fn set_type_tag(&mut self, type_tag: impl Into<String>) {
        self.type_tag = type_tag.into();
    }
}

/// Builder and accessor methods every variant shares through its `target` field.
macro_rules! target_builders {
    ($variant:ty) => {
        impl $variant {
            pub fn target(&self) -> &$crate::policy::PolicyTarget {
                &self.target
            }

            pub fn target_mut(&mut self) -> &mut $crate::policy::PolicyTarget {
                &mut self.target
            }

            pub fn key(&self) -> $crate::policy::PolicyKey {
                self.target.key()
            }

            pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
                self.target.set_pattern(pattern);
                self
            }

            pub fn with_apply_to(mut self, value: &str) -> $crate::error::Result<Self> {
                self.target.set_apply_to(value)?;
                Ok(self)
            }

            pub fn with_priority(mut self, priority: impl std::fmt::Display) -> Self {
                self.target.set_priority(priority);
                self
            }

            pub fn with_type_tag(mut self, type_tag: impl Into<String>) -> Self {
                self.target.set_type_tag(type_tag);
                self
            }
        }
    };
}

pub(crate) use target_builders;
