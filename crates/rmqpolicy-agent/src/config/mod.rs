//! Policy file loader (strict parsing).
//!
//! A policy file is YAML (JSON also parses, being a YAML subset). Entries are
//! built through the core registry, so the same validation applies as for
//! direct construction.

pub mod schema;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::{Policy, PolicyArgs, PolicyKey};

pub use schema::PolicyFile;

/// Vhost value that stands for "every vhost on the broker".
pub const WILDCARD_VHOST: &str = "*";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<Policy>> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| PolicyError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<Vec<Policy>> {
    let file: PolicyFile = serde_yaml::from_str(s)
        .map_err(|e| PolicyError::Config(format!("invalid yaml: {e}")))?;
    file.validate()?;
    file.build()
}

/// Parse a JSON list of policy entries, as handed over by a related service.
pub fn entries_from_json(s: &str) -> Result<Vec<Policy>> {
    let entries: Vec<PolicyArgs> = serde_json::from_str(s)
        .map_err(|e| PolicyError::Config(format!("invalid policy list: {e}")))?;
    schema::build_entries(&entries)
}

/// Append `extra` to `policies`, skipping any whose identity is already present.
pub fn merge(policies: &mut Vec<Policy>, extra: Vec<Policy>) {
    let mut seen: HashSet<PolicyKey> = policies.iter().map(Policy::key).collect();
    for policy in extra {
        if seen.insert(policy.key()) {
            policies.push(policy);
        }
    }
}

pub fn has_wildcard(policies: &[Policy]) -> bool {
    policies.iter().any(|p| p.vhost() == WILDCARD_VHOST)
}

/// Replace every wildcard-vhost policy by one copy per vhost.
///
/// Explicitly configured policies win over expanded copies with the same key.
pub fn expand_wildcards(policies: Vec<Policy>, vhosts: &[String]) -> Vec<Policy> {
    let (wildcards, mut out): (Vec<Policy>, Vec<Policy>) = policies
        .into_iter()
        .partition(|p| p.vhost() == WILDCARD_VHOST);

    let mut expanded = Vec::with_capacity(wildcards.len() * vhosts.len());
    for policy in &wildcards {
        for vhost in vhosts {
            let mut copy = policy.clone();
            copy.target_mut().set_vhost(vhost.as_str());
            expanded.push(copy);
        }
    }
    merge(&mut out, expanded);
    out
}
