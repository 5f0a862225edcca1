//! Namespace identifiers
//!
//! A namespace names one category of provider data and the compatibility
//! adapter that translates it for the legacy host. The set is closed: the
//! legacy host only understands these four identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Data category understood by the legacy host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Weather,
    Battery,
    System,
    Media,
}

impl Namespace {
    /// Every namespace, in first-update order.
    ///
    /// An adapter may read data published by namespaces that precede it in
    /// this list during its own first update, never the ones that follow.
    pub const ALL: [Namespace; 4] = [
        Namespace::Weather,
        Namespace::Battery,
        Namespace::System,
        Namespace::Media,
    ];

    /// Identifier passed verbatim to the legacy host callback.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Weather => "weather",
            Namespace::Battery => "battery",
            Namespace::System => "system",
            Namespace::Media => "media",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weather" => Ok(Namespace::Weather),
            "battery" => Ok(Namespace::Battery),
            "system" => Ok(Namespace::System),
            "media" => Ok(Namespace::Media),
            other => Err(BridgeError::UnknownNamespace(other.to_string())),
        }
    }
}
