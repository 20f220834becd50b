//! Closed registry from type tag to policy variant.
//!
//! Entries arrive as keyword-argument maps (`{"type": "ha", "vhost": "/",
//! ...}`). The tag picks the variant; the remaining keys must be arguments
//! that variant accepts.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::coerce;
use crate::error::{PolicyError, Result};
use crate::policy::{BasePolicy, HaPolicy, Policy, TtlPolicy};

/// Keyword arguments for `PolicyType::construct`.
pub type PolicyArgs = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    Generic,
    Ha,
    Ttl,
}

const GENERIC_ARGS: &[&str] = &[
    "vhost", "name", "pattern", "definition", "apply_to", "priority", "type",
];
const TTL_ARGS: &[&str] = &[
    "vhost", "name", "pattern", "apply_to", "priority", "type", "ttl", "message_ttl",
];
const HA_ARGS: &[&str] = &[
    "vhost", "name", "pattern", "apply_to", "priority", "params", "type", "mode", "sync_mode",
];

impl PolicyType {
    pub const ALL: [PolicyType; 3] = [PolicyType::Generic, PolicyType::Ha, PolicyType::Ttl];

    pub fn tag(self) -> &'static str {
        match self {
            PolicyType::Generic => BasePolicy::TYPE_TAG,
            PolicyType::Ha => HaPolicy::TYPE_TAG,
            PolicyType::Ttl => TtlPolicy::TYPE_TAG,
        }
    }

    /// Keyword arguments the variant's constructor accepts.
    pub fn accepted_args(self) -> &'static [&'static str] {
        match self {
            PolicyType::Generic => GENERIC_ARGS,
            PolicyType::Ha => HA_ARGS,
            PolicyType::Ttl => TTL_ARGS,
        }
    }

    /// Variant named by the entry's `type` key, `generic` when absent.
    pub fn of_args(args: &PolicyArgs) -> Result<Self> {
        match args.get("type") {
            None => Ok(PolicyType::Generic),
            Some(Value::String(tag)) => tag.parse(),
            Some(other) => Err(PolicyError::UnknownPolicyType(other.to_string())),
        }
    }

    /// Build the variant from keyword arguments, coercing and validating
    /// each field exactly as direct construction does.
    pub fn construct(self, args: &PolicyArgs) -> Result<Policy> {
        let accepted = self.accepted_args();
        if let Some(unexpected) = args.keys().find(|k| !accepted.contains(&k.as_str())) {
            return Err(PolicyError::UnexpectedArgument(unexpected.clone()));
        }

        let vhost = coerce::string("vhost", required(args, "vhost")?)?;
        let name = coerce::string("name", required(args, "name")?)?;

        let mut policy = match self {
            PolicyType::Generic => {
                let mut p = BasePolicy::new(vhost, name);
                if let Some(pattern) = args.get("pattern") {
                    if let Some(pattern) = coerce::optional_string("pattern", pattern)? {
                        p = p.with_pattern(pattern);
                    }
                }
                if let Some(definition) = args.get("definition") {
                    if let Some(definition) = coerce::definition(definition)? {
                        p = p.with_definition(definition);
                    }
                }
                Policy::Generic(p)
            }
            PolicyType::Ttl => {
                let pattern = coerce::string("pattern", required(args, "pattern")?)?;
                let mut p = TtlPolicy::new(vhost, name, pattern);
                if let Some(ttl) = args.get("ttl") {
                    p.set_ttl(coerce::integer("ttl", ttl)?);
                }
                if let Some(message_ttl) = args.get("message_ttl") {
                    p.set_message_ttl(coerce::boolean(message_ttl));
                }
                Policy::Ttl(p)
            }
            PolicyType::Ha => {
                let pattern = coerce::string("pattern", required(args, "pattern")?)?;
                let mut p = HaPolicy::new(vhost, name, pattern);
                if let Some(mode) = args.get("mode") {
                    p.set_mode(&coerce::string("mode", mode)?)?;
                }
                if let Some(sync_mode) = args.get("sync_mode") {
                    p.set_sync_mode(&coerce::string("sync_mode", sync_mode)?)?;
                }
                p.set_params(args.get("params").filter(|v| !v.is_null()).cloned());
                Policy::Ha(p)
            }
        };

        let target = policy.target_mut();
        if let Some(apply_to) = args.get("apply_to") {
            target.set_apply_to(&coerce::string("apply_to", apply_to)?)?;
        }
        if let Some(priority) = args.get("priority") {
            target.set_priority(coerce::string("priority", priority)?);
        }
        if let Some(tag) = args.get("type") {
            target.set_type_tag(coerce::string("type", tag)?);
        }
        Ok(policy)
    }
}

/// Look up the entry's variant and construct it.
pub fn build(args: &PolicyArgs) -> Result<Policy> {
    PolicyType::of_args(args)?.construct(args)
}

impl FromStr for PolicyType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| PolicyError::UnknownPolicyType(s.to_string()))
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn required<'a>(args: &'a PolicyArgs, key: &'static str) -> Result<&'a Value> {
    args.get(key).ok_or(PolicyError::MissingArgument(key))
}
