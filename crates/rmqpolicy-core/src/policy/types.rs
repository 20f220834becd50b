//! Closed enumerations carried by policies.
//!
//! Every enumeration parses from its broker spelling and rejects anything
//! else with `PolicyError::InvalidEnumValue`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PolicyError, Result};

/// Which resources a policy pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyTo {
    #[default]
    Queues,
    Exchanges,
    All,
}

impl ApplyTo {
    pub const FIELD: &'static str = "ApplyToTypes";

    pub fn as_str(self) -> &'static str {
        match self {
            ApplyTo::Queues => "queues",
            ApplyTo::Exchanges => "exchanges",
            ApplyTo::All => "all",
        }
    }
}

impl FromStr for ApplyTo {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "queues" => Ok(ApplyTo::Queues),
            "exchanges" => Ok(ApplyTo::Exchanges),
            "all" => Ok(ApplyTo::All),
            other => Err(invalid(Self::FIELD, other)),
        }
    }
}

/// Mirroring mode of an HA policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HaMode {
    /// Mirror to every node, including nodes that join later.
    #[default]
    All,
    /// Mirror to a fixed count of nodes (`ha-params` is the count).
    Exactly,
    /// Mirror to named nodes (`ha-params` is the node list).
    Nodes,
}

impl HaMode {
    pub const FIELD: &'static str = "ModeTypes";

    pub fn as_str(self) -> &'static str {
        match self {
            HaMode::All => "all",
            HaMode::Exactly => "exactly",
            HaMode::Nodes => "nodes",
        }
    }
}

impl FromStr for HaMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(HaMode::All),
            "exactly" => Ok(HaMode::Exactly),
            "nodes" => Ok(HaMode::Nodes),
            other => Err(invalid(Self::FIELD, other)),
        }
    }
}

/// Synchronisation behaviour of a new queue mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HaSyncMode {
    /// New mirrors receive existing messages.
    #[default]
    Automatic,
    /// New mirrors only receive new messages.
    Manual,
}

impl HaSyncMode {
    pub const FIELD: &'static str = "SyncModeTypes";

    pub fn as_str(self) -> &'static str {
        match self {
            HaSyncMode::Automatic => "automatic",
            HaSyncMode::Manual => "manual",
        }
    }
}

impl FromStr for HaSyncMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "automatic" => Ok(HaSyncMode::Automatic),
            "manual" => Ok(HaSyncMode::Manual),
            other => Err(invalid(Self::FIELD, other)),
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(ApplyTo, HaMode, HaSyncMode);

fn invalid(field: &'static str, value: &str) -> PolicyError {
    PolicyError::InvalidEnumValue {
        field,
        value: value.to_string(),
    }
}
