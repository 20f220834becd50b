//! Recording fakes for the policy ports and a log-capturing tracing layer.

#![allow(dead_code)]

use std::cell::RefCell;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use rmqpolicy_core::error::{PolicyError, Result};
use rmqpolicy_core::{CommandFailure, CommandRunner, StatusReporter, VersionProbe, WorkloadState};

pub struct FakeRunner {
    pub calls: RefCell<Vec<Vec<String>>>,
    outcome: std::result::Result<String, CommandFailure>,
}

impl FakeRunner {
    pub fn ok(output: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            outcome: Ok(output.to_string()),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            outcome: Err(CommandFailure::exited(
                "rabbitmqctl",
                exit_code,
                String::new(),
                "Error: boom".to_string(),
            )),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String]) -> std::result::Result<String, CommandFailure> {
        self.calls.borrow_mut().push(argv.to_vec());
        self.outcome.clone()
    }
}

#[derive(Default)]
pub struct RecordingStatus {
    pub calls: RefCell<Vec<(WorkloadState, String)>>,
}

impl StatusReporter for RecordingStatus {
    fn status_set(&self, state: WorkloadState, message: &str) {
        self.calls.borrow_mut().push((state, message.to_string()));
    }
}

pub struct FixedVersion {
    answer: Option<Ordering>,
    pub queries: RefCell<Vec<(String, String)>>,
}

impl FixedVersion {
    pub fn newer() -> Self {
        Self::answering(Some(Ordering::Greater))
    }

    pub fn older() -> Self {
        Self::answering(Some(Ordering::Less))
    }

    pub fn unknown() -> Self {
        Self::answering(None)
    }

    pub fn answering(answer: Option<Ordering>) -> Self {
        Self {
            answer,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl VersionProbe for FixedVersion {
    fn cmp_pkgrevno(&self, package: &str, revno: &str) -> Result<Ordering> {
        self.queries
            .borrow_mut()
            .push((package.to_string(), revno.to_string()));
        self.answer
            .ok_or_else(|| PolicyError::Version(format!("package {package} is not installed")))
    }
}

#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LogCapture {
    pub fn count(&self, level: Level) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    pub fn total(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.message));
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Run `f` with a subscriber that records every event.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}
