//! Shared error type across rmqpolicy crates.

use std::fmt;

use thiserror::Error;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A value outside a closed enumeration.
    InvalidEnumValue,
    /// A value that cannot be converted to the field's type.
    Coercion,
    /// Registry lookup failed.
    UnknownPolicyType,
    /// Constructor argument problems.
    BadArguments,
    /// The administration command could not be composed.
    MalformedCommand,
    /// The administration command ran and failed.
    CommandFailed,
    /// Installed package version could not be determined.
    Version,
    /// Policy file problems.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ErrorCode::Coercion => "COERCION",
            ErrorCode::UnknownPolicyType => "UNKNOWN_POLICY_TYPE",
            ErrorCode::BadArguments => "BAD_ARGUMENTS",
            ErrorCode::MalformedCommand => "MALFORMED_COMMAND",
            ErrorCode::CommandFailed => "COMMAND_FAILED",
            ErrorCode::Version => "VERSION",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// A failed external command: non-zero exit or a spawn error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// Program that was invoked (`argv[0]`).
    pub program: String,
    /// Exit status; `None` when the process never ran or was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output, possibly partial.
    pub stdout: String,
    /// Captured standard error or the spawn error text.
    pub stderr: String,
}

impl CommandFailure {
    pub fn exited(program: impl Into<String>, exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            program: program.into(),
            exit_code: Some(exit_code),
            stdout,
            stderr,
        }
    }

    pub fn spawn(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            exit_code: None,
            stdout: String::new(),
            stderr: reason.into(),
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "command '{}' returned non-zero exit status {code}", self.program)?,
            None => write!(f, "command '{}' could not be executed", self.program)?,
        }
        let detail = self.stderr.trim();
        if !detail.is_empty() {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CommandFailure {}

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("value {value} not in {field}")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("cannot convert {field}={value} to {expected}")]
    Coercion {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("unknown policy type: {0}")]
    UnknownPolicyType(String),
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error(transparent)]
    CommandFailed(#[from] CommandFailure),
    #[error("version: {0}")]
    Version(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PolicyError {
    /// Map the error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PolicyError::InvalidEnumValue { .. } => ErrorCode::InvalidEnumValue,
            PolicyError::Coercion { .. } => ErrorCode::Coercion,
            PolicyError::UnknownPolicyType(_) => ErrorCode::UnknownPolicyType,
            PolicyError::MissingArgument(_) | PolicyError::UnexpectedArgument(_) => {
                ErrorCode::BadArguments
            }
            PolicyError::MalformedCommand(_) => ErrorCode::MalformedCommand,
            PolicyError::CommandFailed(_) => ErrorCode::CommandFailed,
            PolicyError::Version(_) => ErrorCode::Version,
            PolicyError::Config(_) => ErrorCode::Config,
            PolicyError::Internal(_) => ErrorCode::Internal,
        }
    }
}
