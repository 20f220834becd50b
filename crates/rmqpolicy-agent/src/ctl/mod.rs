//! Process execution and `rabbitmqctl` queries.

pub mod query;

use std::process::Command;

use rmqpolicy_core::{CommandFailure, CommandRunner};

pub use query::{ListedPolicy, Rabbitmqctl};

/// Runs commands on the local host, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> Result<String, CommandFailure> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| CommandFailure::spawn("", "empty argument vector"))?;

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| CommandFailure::spawn(program.as_str(), e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(match output.status.code() {
                Some(code) => CommandFailure::exited(program.as_str(), code, stdout, stderr),
                None => CommandFailure {
                    program: program.clone(),
                    exit_code: None,
                    stdout,
                    stderr,
                },
            });
        }
        Ok(stdout)
    }
}
