#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::cmp::Ordering;

use rmqpolicy_agent::host::{DpkgVersionProbe, HookStatus};
use rmqpolicy_core::error::ErrorCode;
use rmqpolicy_core::{StatusReporter, VersionProbe, WorkloadState};

use common::ScriptedRunner;

#[test]
fn dpkg_probe_compares_installed_version() {
    let runner = ScriptedRunner::default().answer(
        "dpkg-query -W -f=${Version} rabbitmq-server",
        "3.8.2-0ubuntu1.4",
    );
    let probe = DpkgVersionProbe::new(&runner);

    assert_eq!(probe.cmp_pkgrevno("rabbitmq-server", "3.0.0").unwrap(), Ordering::Greater);
    assert_eq!(probe.cmp_pkgrevno("rabbitmq-server", "3.9").unwrap(), Ordering::Less);
}

#[test]
fn dpkg_probe_reports_missing_package() {
    let runner = ScriptedRunner::default()
        .answer("dpkg-query -W -f=${Version} rabbitmq-server", "")
        .fail("dpkg-query -W -f=${Version} nothing", 1);
    let probe = DpkgVersionProbe::new(&runner);

    let err = probe.cmp_pkgrevno("rabbitmq-server", "3.0.0").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Version);
    assert!(probe.cmp_pkgrevno("nothing", "1").is_err());
}

#[test]
fn hook_status_runs_status_set() {
    let runner = ScriptedRunner::default();
    let status = HookStatus::new(&runner);

    // unscripted command fails; reporting must not panic or propagate
    status.status_set(WorkloadState::Blocked, "RabbitMQ failed to create policy HA");

    assert_eq!(
        *runner.calls.borrow(),
        vec![vec![
            "status-set".to_string(),
            "blocked".to_string(),
            "RabbitMQ failed to create policy HA".to_string(),
        ]]
    );
}
