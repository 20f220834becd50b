//! Scripted command runner and fixed version probe for agent tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::{CommandFailure, CommandRunner, VersionProbe};

/// Answers by exact command line; anything unscripted fails with exit 1.
#[derive(Default)]
pub struct ScriptedRunner {
    answers: HashMap<String, std::result::Result<String, CommandFailure>>,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn answer(mut self, command_line: &str, output: &str) -> Self {
        self.answers
            .insert(command_line.to_string(), Ok(output.to_string()));
        self
    }

    pub fn fail(mut self, command_line: &str, exit_code: i32) -> Self {
        let program = command_line.split(' ').next().unwrap_or_default();
        self.answers.insert(
            command_line.to_string(),
            Err(CommandFailure::exited(program, exit_code, String::new(), String::new())),
        );
        self
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|argv| argv.join(" ")).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> std::result::Result<String, CommandFailure> {
        self.calls.borrow_mut().push(argv.to_vec());
        let line = argv.join(" ");
        self.answers.get(&line).cloned().unwrap_or_else(|| {
            Err(CommandFailure::exited(
                argv.first().cloned().unwrap_or_default(),
                1,
                String::new(),
                format!("unscripted: {line}"),
            ))
        })
    }
}

pub struct FixedVersion(pub Option<Ordering>);

impl VersionProbe for FixedVersion {
    fn cmp_pkgrevno(&self, package: &str, _revno: &str) -> Result<Ordering> {
        self.0
            .ok_or_else(|| PolicyError::Version(format!("{package} is not installed")))
    }
}
