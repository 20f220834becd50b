//! Policy value objects.
//!
//! `Policy` is the closed sum of the three variants. Identity is
//! `(vhost, name)` only: a generic and an HA policy with the same key compare
//! equal and hash alike, so a set of policies holds at most one of them.

pub mod base;
pub mod ha;
pub mod target;
pub mod ttl;
pub mod types;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use base::BasePolicy;
pub use ha::HaPolicy;
pub use target::{PolicyKey, PolicyTarget};
pub use ttl::TtlPolicy;
pub use types::{ApplyTo, HaMode, HaSyncMode};

use crate::registry::PolicyType;

#[derive(Debug, Clone)]
pub enum Policy {
    Generic(BasePolicy),
    Ttl(TtlPolicy),
    Ha(HaPolicy),
}

impl Policy {
    pub fn target(&self) -> &PolicyTarget {
        match self {
            Policy::Generic(p) => p.target(),
            Policy::Ttl(p) => p.target(),
            Policy::Ha(p) => p.target(),
        }
    }

    pub fn target_mut(&mut self) -> &mut PolicyTarget {
        match self {
            Policy::Generic(p) => p.target_mut(),
            Policy::Ttl(p) => p.target_mut(),
            Policy::Ha(p) => p.target_mut(),
        }
    }

    pub fn key(&self) -> PolicyKey {
        self.target().key()
    }

    pub fn vhost(&self) -> &str {
        self.target().vhost()
    }

    pub fn name(&self) -> &str {
        self.target().name()
    }

    /// Variant that produced this policy.
    pub fn policy_type(&self) -> PolicyType {
        match self {
            Policy::Generic(_) => PolicyType::Generic,
            Policy::Ttl(_) => PolicyType::Ttl,
            Policy::Ha(_) => PolicyType::Ha,
        }
    }

    /// Type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Policy::Generic(_) => BasePolicy::KIND,
            Policy::Ttl(_) => TtlPolicy::KIND,
            Policy::Ha(_) => HaPolicy::KIND,
        }
    }

    /// JSON definition as passed to the broker. Only a generic policy can
    /// lack one.
    pub fn definition(&self) -> Option<String> {
        match self {
            Policy::Generic(p) => p.definition().map(str::to_string),
            Policy::Ttl(p) => Some(p.definition()),
            Policy::Ha(p) => Some(p.definition()),
        }
    }
}

impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.vhost() == other.vhost() && self.name() == other.name()
    }
}

impl Eq for Policy {}

impl Hash for Policy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vhost().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(vhost: '{}' name: '{}')",
            self.kind(),
            self.vhost(),
            self.name()
        )
    }
}

impl From<BasePolicy> for Policy {
    fn from(p: BasePolicy) -> Self {
        Policy::Generic(p)
    }
}

impl From<TtlPolicy> for Policy {
    fn from(p: TtlPolicy) -> Self {
        Policy::Ttl(p)
    }
}

impl From<HaPolicy> for Policy {
    fn from(p: HaPolicy) -> Self {
        Policy::Ha(p)
    }
}
