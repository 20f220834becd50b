//! Apply/clear protocol: render `rabbitmqctl` argument vectors and run them.
//!
//! The `try_*` methods return every failure as `PolicyError`. `apply` and
//! `clear` absorb operational failures: one error log entry, a `blocked`
//! status, and `None`.

use crate::error::{PolicyError, Result};
use crate::policy::Policy;
use crate::ports::{PolicyHost, WorkloadState};

pub const RABBITMQCTL: &str = "rabbitmqctl";

impl Policy {
    /// Whether applying should proceed. Only mirroring is version-gated.
    pub fn check(&self, host: &PolicyHost<'_>) -> bool {
        match self {
            Policy::Ha(p) => p.check(host.versions),
            Policy::Generic(_) | Policy::Ttl(_) => true,
        }
    }

    /// `rabbitmqctl set_policy -p <vhost> <name> <pattern> <definition>
    /// --apply-to <scope> --priority <priority>`
    pub fn set_policy_argv(&self) -> Result<Vec<String>> {
        let target = self.target();
        let pattern = target
            .pattern()
            .ok_or_else(|| PolicyError::MalformedCommand(format!("{self} has no pattern")))?;
        let definition = self
            .definition()
            .ok_or_else(|| PolicyError::MalformedCommand(format!("{self} has no definition")))?;

        let argv = vec![
            RABBITMQCTL.to_string(),
            "set_policy".to_string(),
            "-p".to_string(),
            target.vhost().to_string(),
            target.name().to_string(),
            pattern.to_string(),
            definition,
            "--apply-to".to_string(),
            target.apply_to().as_str().to_string(),
            "--priority".to_string(),
            target.priority().to_string(),
        ];
        ensure_passable(&argv)?;
        Ok(argv)
    }

    /// `rabbitmqctl clear_policy -p <vhost> <name>`
    pub fn clear_policy_argv(&self) -> Result<Vec<String>> {
        let argv = vec![
            RABBITMQCTL.to_string(),
            "clear_policy".to_string(),
            "-p".to_string(),
            self.vhost().to_string(),
            self.name().to_string(),
        ];
        ensure_passable(&argv)?;
        Ok(argv)
    }

    /// `Ok(None)` when `check` declined; nothing is executed then.
    pub fn try_apply(&self, host: &PolicyHost<'_>) -> Result<Option<String>> {
        if !self.check(host) {
            return Ok(None);
        }
        tracing::debug!(
            kind = self.kind(),
            vhost = %self.vhost(),
            policy = %self.name(),
            "Setting policy {} to vhost: '{}' with name: '{}'",
            self.kind(),
            self.vhost(),
            self.name()
        );
        let argv = self.set_policy_argv()?;
        let output = host.runner.run(&argv)?;
        Ok(Some(output))
    }

    pub fn try_clear(&self, host: &PolicyHost<'_>) -> Result<String> {
        tracing::debug!(
            kind = self.kind(),
            vhost = %self.vhost(),
            policy = %self.name(),
            "Clearing policy {} to vhost: '{}' with name: '{}'",
            self.kind(),
            self.vhost(),
            self.name()
        );
        let argv = self.clear_policy_argv()?;
        Ok(host.runner.run(&argv)?)
    }

    /// Create or update the policy on the broker. Idempotent: re-applying
    /// re-issues the same command.
    pub fn apply(&self, host: &PolicyHost<'_>) -> Option<String> {
        match self.try_apply(host) {
            Ok(Some(output)) => {
                tracing::info!(policy = %self.name(), "{output}");
                Some(output)
            }
            Ok(None) => None,
            Err(e) => {
                let msg = format!("RabbitMQ failed to create policy {}", self.name());
                self.absorb(host, e, &msg);
                None
            }
        }
    }

    /// Remove the policy from the broker.
    pub fn clear(&self, host: &PolicyHost<'_>) -> Option<String> {
        match self.try_clear(host) {
            Ok(output) => {
                tracing::info!(policy = %self.name(), "{output}");
                Some(output)
            }
            Err(e) => {
                let msg = format!("RabbitMQ failed to clear policy {}", self.name());
                self.absorb(host, e, &msg);
                None
            }
        }
    }

    fn absorb(&self, host: &PolicyHost<'_>, e: PolicyError, msg: &str) {
        tracing::error!(
            vhost = %self.vhost(),
            policy = %self.name(),
            code = e.code().as_str(),
            "{e}, {msg}"
        );
        host.status.status_set(WorkloadState::Blocked, msg);
    }
}

// Arguments travel through execve; an interior NUL cannot.
fn ensure_passable(argv: &[String]) -> Result<()> {
    if let Some(arg) = argv.iter().find(|a| a.contains('\0')) {
        return Err(PolicyError::MalformedCommand(format!(
            "embedded NUL byte in argument {arg:?}"
        )));
    }
    Ok(())
}
