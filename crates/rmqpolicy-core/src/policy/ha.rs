//! Classic queue mirroring policy.
//!
//! Mirroring needs rabbitmq-server >= 3.0, so `check` consults the installed
//! package version before anything is applied.

use std::cmp::Ordering;

use serde_json::{json, Value};

use crate::error::Result;
use crate::ports::VersionProbe;

use super::target::{target_builders, PolicyTarget};
use super::types::{HaMode, HaSyncMode};

pub const BROKER_PACKAGE: &str = "rabbitmq-server";
pub const MIN_MIRRORING_VERSION: &str = "3.0.0";
const MIRRORING_BACKGROUND_URL: &str =
    "http://www.rabbitmq.com/blog/2012/11/19/breaking-things-with-rabbitmq-3-0";

#[derive(Debug, Clone)]
pub struct HaPolicy {
    target: PolicyTarget,
    mode: HaMode,
    sync_mode: HaSyncMode,
    params: Option<Value>,
}

impl HaPolicy {
    pub const KIND: &'static str = "HaPolicy";
    pub const TYPE_TAG: &'static str = "ha";

    pub fn new(vhost: impl Into<String>, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let mut target = PolicyTarget::new(vhost, name, Self::TYPE_TAG);
        target.set_pattern(pattern);
        Self {
            target,
            mode: HaMode::default(),
            sync_mode: HaSyncMode::default(),
            params: None,
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Result<Self> {
        self.set_mode(mode)?;
        Ok(self)
    }

    pub fn with_sync_mode(mut self, sync_mode: &str) -> Result<Self> {
        self.set_sync_mode(sync_mode)?;
        Ok(self)
    }

    /// Meaning depends on the mode: a node count for `exactly`, a node list
    /// for `nodes`. Ignored for `all`.
    pub fn with_params(mut self, params: impl Into<Value>) -> Self {
        self.params = Some(params.into());
        self
    }

    pub fn mode(&self) -> HaMode {
        self.mode
    }

    pub fn sync_mode(&self) -> HaSyncMode {
        self.sync_mode
    }

    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Validate and assign; on error the old mode is kept.
    pub fn set_mode(&mut self, mode: &str) -> Result<()> {
        self.mode = mode.parse()?;
        Ok(())
    }

    pub fn set_sync_mode(&mut self, sync_mode: &str) -> Result<()> {
        self.sync_mode = sync_mode.parse()?;
        Ok(())
    }

    pub fn set_params(&mut self, params: Option<Value>) {
        self.params = params;
    }

    pub fn definition(&self) -> String {
        let mut definition = json!({
            "ha-mode": self.mode.as_str(),
            "ha-sync-mode": self.sync_mode.as_str(),
        });
        if self.mode != HaMode::All {
            definition["ha-params"] = self.params.clone().unwrap_or(Value::Null);
        }
        definition.to_string()
    }

    /// Whether the installed broker supports mirroring.
    pub fn check(&self, versions: &dyn VersionProbe) -> bool {
        match versions.cmp_pkgrevno(BROKER_PACKAGE, MIN_MIRRORING_VERSION) {
            Ok(Ordering::Less) => {
                tracing::warn!(
                    vhost = %self.target.vhost,
                    policy = %self.target.name,
                    "Mirroring queues cannot be enabled, only supported in rabbitmq-server >= 3.0"
                );
                tracing::info!("More information at {MIRRORING_BACKGROUND_URL}");
                false
            }
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    vhost = %self.target.vhost,
                    policy = %self.target.name,
                    error = %e,
                    "cannot determine {BROKER_PACKAGE} version, skipping mirroring policy"
                );
                false
            }
        }
    }
}

target_builders!(HaPolicy);
