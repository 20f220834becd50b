//! Collaborator ports consumed by the apply/clear protocol.
//!
//! The core never spawns processes itself. Callers hand a `PolicyHost` that
//! bundles the three collaborators; the agent crate provides the real ones
//! and tests provide recording fakes.

use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;

pub use crate::error::CommandFailure;

/// Runs an external program and returns its standard output.
pub trait CommandRunner {
    /// `argv[0]` is the program. Non-zero exit or spawn failure is an `Err`.
    fn run(&self, argv: &[String]) -> std::result::Result<String, CommandFailure>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, argv: &[String]) -> std::result::Result<String, CommandFailure> {
        (**self).run(argv)
    }
}

/// Operator-visible workload state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadState {
    Active,
    Maintenance,
    Waiting,
    Blocked,
}

impl WorkloadState {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkloadState::Active => "active",
            WorkloadState::Maintenance => "maintenance",
            WorkloadState::Waiting => "waiting",
            WorkloadState::Blocked => "blocked",
        }
    }
}

impl fmt::Display for WorkloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surfaces a state and message to the operator without failing the caller.
pub trait StatusReporter {
    fn status_set(&self, state: WorkloadState, message: &str);
}

/// Compares an installed package's version against a given one.
pub trait VersionProbe {
    /// `Less` when the installed version is older than `revno`.
    fn cmp_pkgrevno(&self, package: &str, revno: &str) -> Result<Ordering>;
}

impl<T: VersionProbe + ?Sized> VersionProbe for &T {
    fn cmp_pkgrevno(&self, package: &str, revno: &str) -> Result<Ordering> {
        (**self).cmp_pkgrevno(package, revno)
    }
}

/// Collaborators needed to apply or clear a policy.
#[derive(Clone, Copy)]
pub struct PolicyHost<'a> {
    pub runner: &'a dyn CommandRunner,
    pub status: &'a dyn StatusReporter,
    pub versions: &'a dyn VersionProbe,
}

impl<'a> PolicyHost<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        status: &'a dyn StatusReporter,
        versions: &'a dyn VersionProbe,
    ) -> Self {
        Self {
            runner,
            status,
            versions,
        }
    }
}
