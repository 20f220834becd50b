//! Host-side collaborators: operator status and package versions.

pub mod debversion;

use std::cmp::Ordering;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::{CommandRunner, StatusReporter, VersionProbe, WorkloadState};

use crate::ctl::SystemRunner;

pub const STATUS_SET: &str = "status-set";

/// Reports status through the `status-set` hook tool.
///
/// Outside a hook environment the tool is missing; the status is logged
/// instead so the caller never fails on reporting.
#[derive(Debug, Clone, Default)]
pub struct HookStatus<R = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> HookStatus<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> StatusReporter for HookStatus<R> {
    fn status_set(&self, state: WorkloadState, message: &str) {
        let argv = [STATUS_SET, state.as_str(), message].map(str::to_string);
        if let Err(e) = self.runner.run(&argv) {
            tracing::warn!(state = %state, error = %e, "{message}");
        }
    }
}

/// Reports status to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStatus;

impl StatusReporter for LogStatus {
    fn status_set(&self, state: WorkloadState, message: &str) {
        match state {
            WorkloadState::Blocked => tracing::warn!(state = %state, "{message}"),
            _ => tracing::info!(state = %state, "{message}"),
        }
    }
}

/// Installed package versions from the dpkg database.
#[derive(Debug, Clone, Default)]
pub struct DpkgVersionProbe<R = SystemRunner> {
    runner: R,
}

impl<R: CommandRunner> DpkgVersionProbe<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn installed_version(&self, package: &str) -> Result<String> {
        let argv = ["dpkg-query", "-W", "-f=${Version}", package].map(str::to_string);
        let out = self
            .runner
            .run(&argv)
            .map_err(|e| PolicyError::Version(format!("{package}: {e}")))?;
        let version = out.trim();
        if version.is_empty() {
            return Err(PolicyError::Version(format!("{package} is not installed")));
        }
        Ok(version.to_string())
    }
}

impl<R: CommandRunner> VersionProbe for DpkgVersionProbe<R> {
    fn cmp_pkgrevno(&self, package: &str, revno: &str) -> Result<Ordering> {
        let installed = self.installed_version(package)?;
        Ok(debversion::compare(&installed, revno))
    }
}
