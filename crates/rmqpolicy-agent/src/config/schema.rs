use serde::Deserialize;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::registry;
use rmqpolicy_core::{Policy, PolicyArgs};

use super::merge;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    pub version: u32,

    #[serde(default)]
    pub policies: Vec<PolicyArgs>,
}

impl PolicyFile {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PolicyError::Config(format!(
                "unsupported policy file version {}",
                self.version
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Vec<Policy>> {
        build_entries(&self.policies)
    }
}

/// Build every entry; duplicates by identity keep the first occurrence.
pub(crate) fn build_entries(entries: &[PolicyArgs]) -> Result<Vec<Policy>> {
    let mut built = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let policy = registry::build(entry)
            .map_err(|e| PolicyError::Config(format!("policies[{i}]: {e}")))?;
        built.push(policy);
    }
    let mut out = Vec::with_capacity(built.len());
    merge(&mut out, built);
    Ok(out)
}
