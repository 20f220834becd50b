//! Command implementations behind the `rmqpolicy` binary.

use std::path::Path;

use rmqpolicy_core::error::Result;
use rmqpolicy_core::{Policy, PolicyHost};

use crate::config;
use crate::ctl::Rabbitmqctl;

/// Outcome counts of a batch apply or clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    /// Failed, or declined by the policy's own check.
    pub not_applied: usize,
}

/// Load the policy file, merge relation-provided entries after it, and expand
/// wildcard vhosts against the broker's vhost list.
pub fn load_policies(
    path: &Path,
    relation_json: Option<&str>,
    ctl: &Rabbitmqctl<'_>,
) -> Result<Vec<Policy>> {
    let mut policies = config::load_from_file(path)?;
    if let Some(json) = relation_json {
        config::merge(&mut policies, config::entries_from_json(json)?);
    }
    if config::has_wildcard(&policies) {
        let vhosts = ctl.list_vhosts();
        policies = config::expand_wildcards(policies, &vhosts);
    }
    tracing::debug!(count = policies.len(), "loaded policies");
    Ok(policies)
}

pub fn apply_all(policies: &[Policy], host: &PolicyHost<'_>) -> BatchSummary {
    run_batch(policies, |p| p.apply(host))
}

pub fn clear_all(policies: &[Policy], host: &PolicyHost<'_>) -> BatchSummary {
    run_batch(policies, |p| p.clear(host))
}

/// `set_policy` argument vectors, without executing anything.
pub fn render_all(policies: &[Policy]) -> Result<Vec<Vec<String>>> {
    policies.iter().map(Policy::set_policy_argv).collect()
}

fn run_batch(policies: &[Policy], op: impl Fn(&Policy) -> Option<String>) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for policy in policies {
        match op(policy) {
            Some(_) => summary.succeeded += 1,
            None => summary.not_applied += 1,
        }
    }
    summary
}
