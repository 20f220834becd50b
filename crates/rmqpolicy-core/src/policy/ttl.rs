//! Time-to-live policy (message or queue expiry).

use serde_json::json;

use super::target::{target_builders, PolicyTarget};

pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// Definition key used when `message_ttl` is off.
///
/// Known defect kept for compatibility: the broker key for queue expiry is
/// `expires`, but deployed configurations were written with this spelling and
/// comparing definitions against them must keep matching.
pub const TTL_EXPIRES_KEY: &str = "experies";
pub const TTL_MESSAGE_KEY: &str = "message-ttl";

#[derive(Debug, Clone)]
pub struct TtlPolicy {
    target: PolicyTarget,
    ttl: i64,
    message_ttl: bool,
}

impl TtlPolicy {
    pub const KIND: &'static str = "TtlPolicy";
    pub const TYPE_TAG: &'static str = "ttl";

    pub fn new(vhost: impl Into<String>, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let mut target = PolicyTarget::new(vhost, name, Self::TYPE_TAG);
        target.set_pattern(pattern);
        Self {
            target,
            ttl: DEFAULT_TTL_MS,
            message_ttl: true,
        }
    }

    /// Time-to-live in milliseconds.
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    /// `true` renders a per-message TTL, `false` a per-queue expiry.
    pub fn with_message_ttl(mut self, message_ttl: bool) -> Self {
        self.message_ttl = message_ttl;
        self
    }

    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    pub fn message_ttl(&self) -> bool {
        self.message_ttl
    }

    pub fn set_ttl(&mut self, ttl: i64) {
        self.ttl = ttl;
    }

    pub fn set_message_ttl(&mut self, message_ttl: bool) {
        self.message_ttl = message_ttl;
    }

    /// Rendered on every call from the current fields.
    pub fn definition(&self) -> String {
        let key = if self.message_ttl {
            TTL_MESSAGE_KEY
        } else {
            TTL_EXPIRES_KEY
        };
        json!({ key: self.ttl }).to_string()
    }
}

target_builders!(TtlPolicy);
