//! Code artifacts and diagnostics returned to the host.

use crate::ir::NodeId;
use indexmap::{set::Slice, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag of a code artifact, as the host's code panel understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Html,
    Css,
    Javascript,
    Swift,
    Dart,
    Plaintext,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Javascript => "JAVASCRIPT",
            Self::Swift => "SWIFT",
            Self::Dart => "DART",
            Self::Plaintext => "PLAINTEXT",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named block of generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    pub title: String,
    #[serde(rename = "code")]
    pub body: String,
    pub language: Language,
}

impl CodeArtifact {
    pub fn new(title: impl Into<String>, body: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            language,
        }
    }
}

/// A non-fatal problem with one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub node_id: NodeId,
    pub reason: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node_id, self.reason)
    }
}

/// Collects warnings for one invocation.
///
/// Identical warnings are recorded once, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: IndexSet<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning about a node.
    pub fn warn(&mut self, node_id: &NodeId, reason: impl Into<String>) {
        let warning = Warning {
            node_id: node_id.clone(),
            reason: reason.into(),
        };
        if self.warnings.contains(&warning) {
            return;
        }
        tracing::warn!(node = %warning.node_id, "{}", warning.reason);
        self.warnings.insert(warning);
    }

    pub fn warnings(&self) -> &Slice<Warning> {
        self.warnings.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings.into_iter().collect()
    }
}
