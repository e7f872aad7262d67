//! Substitution error types
//!
//! Defines structured error types for placeholder resolution failures, with
//! enough context (node position, field, key) for the upstream request
//! handler to produce an actionable message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of a node template failed to resolve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateField {
    /// The node's name template
    NodeName,
    /// A value in the node's parameter map, identified by its key
    Parameter(String),
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateField::NodeName => write!(f, "node name"),
            TemplateField::Parameter(key) => write!(f, "parameter '{}'", key),
        }
    }
}

/// A placeholder resolution failure for a single node template field
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct SubstitutionError {
    /// Zero-based position of the node in the solution pipeline
    pub node_index: usize,
    /// Node type from the template (e.g., "rtsp_src")
    pub node_type: String,
    /// Which field of the node held the unresolved template
    pub field: TemplateField,
    /// The placeholder key that had no value in the effective parameters
    pub key: String,
    /// Complete error message
    pub message: String,
}

impl SubstitutionError {
    /// Create a new substitution error with auto-generated message
    pub fn new(
        node_index: usize,
        node_type: impl Into<String>,
        field: TemplateField,
        key: impl Into<String>,
    ) -> Self {
        let node_type = node_type.into();
        let key = key.into();

        let message = format!(
            "Node {} ({}): {} references '{}' which has no supplied value and no default",
            node_index, node_type, field, key
        );

        Self {
            node_index,
            node_type,
            field,
            key,
            message,
        }
    }
}
