//! Read-only broker queries.
//!
//! Brokers from 3.8.2 on understand `--formatter=json`; older ones print a
//! header line followed by tab-separated rows, sometimes closed by `...done`.
//! Policy rows are `vhost name apply-to pattern definition priority`.

use std::cell::OnceCell;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::policy::ha::BROKER_PACKAGE;
use rmqpolicy_core::protocol::RABBITMQCTL;
use rmqpolicy_core::{BasePolicy, CommandRunner, Policy, VersionProbe};

pub const JSON_FORMATTER_MIN_VERSION: &str = "3.8.2";
const DONE_MARKER: &str = "...done";

/// A policy as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedPolicy {
    pub vhost: String,
    pub name: String,
    pub apply_to: String,
    pub pattern: String,
    pub definition: String,
    pub priority: String,
}

impl ListedPolicy {
    /// Generic policy with the same identity, for comparison with configured ones.
    pub fn to_policy(&self) -> Result<Policy> {
        let policy = BasePolicy::new(self.vhost.as_str(), self.name.as_str())
            .with_pattern(self.pattern.as_str())
            .with_definition(self.definition.as_str())
            .with_apply_to(&self.apply_to)?
            .with_priority(&self.priority);
        Ok(policy.into())
    }
}

#[derive(Debug, Deserialize)]
struct JsonPolicy {
    vhost: String,
    name: String,
    #[serde(rename = "apply-to")]
    apply_to: String,
    pattern: String,
    definition: Value,
    priority: Value,
}

impl From<JsonPolicy> for ListedPolicy {
    fn from(p: JsonPolicy) -> Self {
        Self {
            vhost: p.vhost,
            name: p.name,
            apply_to: p.apply_to,
            pattern: p.pattern,
            definition: text_of(p.definition),
            priority: text_of(p.priority),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonVhost {
    name: String,
}

enum QueryOutput {
    Json(String),
    Raw(String),
}

pub struct Rabbitmqctl<'a> {
    runner: &'a dyn CommandRunner,
    versions: &'a dyn VersionProbe,
    json: OnceCell<bool>,
}

impl<'a> Rabbitmqctl<'a> {
    pub fn new(runner: &'a dyn CommandRunner, versions: &'a dyn VersionProbe) -> Self {
        Self {
            runner,
            versions,
            json: OnceCell::new(),
        }
    }

    /// Asked once per instance; an unknown version means "no".
    pub fn supports_json(&self) -> bool {
        *self.json.get_or_init(|| {
            matches!(
                self.versions
                    .cmp_pkgrevno(BROKER_PACKAGE, JSON_FORMATTER_MIN_VERSION),
                Ok(Ordering::Greater | Ordering::Equal)
            )
        })
    }

    fn query(&self, args: &[&str]) -> Result<QueryOutput> {
        let mut argv: Vec<String> = std::iter::once(RABBITMQCTL)
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        if self.supports_json() {
            argv.push("--formatter=json".to_string());
            Ok(QueryOutput::Json(self.runner.run(&argv)?))
        } else {
            Ok(QueryOutput::Raw(self.runner.run(&argv)?))
        }
    }

    pub fn try_list_vhosts(&self) -> Result<Vec<String>> {
        match self.query(&["list_vhosts"])? {
            QueryOutput::Json(s) => {
                let vhosts: Vec<JsonVhost> = serde_json::from_str(&s).map_err(json_error)?;
                Ok(vhosts.into_iter().map(|v| v.name).collect())
            }
            QueryOutput::Raw(s) => Ok(raw_rows(&s).map(str::to_string).collect()),
        }
    }

    /// Empty when the broker has no vhosts or cannot be queried.
    pub fn list_vhosts(&self) -> Vec<String> {
        self.try_list_vhosts().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "list_vhosts failed");
            Vec::new()
        })
    }

    pub fn try_list_policies_in(&self, vhost: &str) -> Result<Vec<ListedPolicy>> {
        match self.query(&["list_policies", "-p", vhost])? {
            QueryOutput::Json(s) => {
                let policies: Vec<JsonPolicy> = serde_json::from_str(&s).map_err(json_error)?;
                Ok(policies.into_iter().map(ListedPolicy::from).collect())
            }
            QueryOutput::Raw(s) => Ok(raw_rows(&s).filter_map(parse_raw_policy).collect()),
        }
    }

    /// Policies across all vhosts; empty if any vhost cannot be queried.
    pub fn list_policies(&self) -> Vec<ListedPolicy> {
        let mut policies = Vec::new();
        for vhost in self.list_vhosts() {
            match self.try_list_policies_in(&vhost) {
                Ok(mut listed) => policies.append(&mut listed),
                Err(e) => {
                    tracing::error!(vhost = %vhost, error = %e, "list_policies failed");
                    return Vec::new();
                }
            }
        }
        policies
    }
}

fn raw_rows(output: &str) -> impl Iterator<Item = &str> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty() && line.trim() != DONE_MARKER)
}

fn parse_raw_policy(line: &str) -> Option<ListedPolicy> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [vhost, name, apply_to, pattern, definition, priority, ..] = fields.as_slice() else {
        tracing::debug!(line, "skipping short list_policies row");
        return None;
    };
    Some(ListedPolicy {
        vhost: vhost.to_string(),
        name: name.to_string(),
        apply_to: apply_to.to_string(),
        pattern: pattern.to_string(),
        definition: definition.to_string(),
        priority: priority.to_string(),
    })
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_error(e: serde_json::Error) -> PolicyError {
    PolicyError::Internal(format!("unexpected rabbitmqctl json: {e}"))
}
