use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kind of statement a shadow decision is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowOperationType {
    Insert,
    Delete,
    Update,
    Select,
    /// Carried by conditions that are not bound to a table.
    HintMatch,
}

impl std::fmt::Display for ShadowOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadowOperationType::Insert => write!(f, "insert"),
            ShadowOperationType::Delete => write!(f, "delete"),
            ShadowOperationType::Update => write!(f, "update"),
            ShadowOperationType::Select => write!(f, "select"),
            ShadowOperationType::HintMatch => write!(f, "hint_match"),
        }
    }
}

impl FromStr for ShadowOperationType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(ShadowOperationType::Insert),
            "delete" => Ok(ShadowOperationType::Delete),
            "update" => Ok(ShadowOperationType::Update),
            "select" => Ok(ShadowOperationType::Select),
            "hint_match" => Ok(ShadowOperationType::HintMatch),
            _ => Err(ConfigError::UnknownOperation(s.to_string())),
        }
    }
}

/// What a shadow algorithm is asked to evaluate.
///
/// An empty condition is only ever handed to the default algorithm; every
/// per-table evaluation gets a condition bound to that table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowCondition {
    table: Option<String>,
    operation: ShadowOperationType,
}

impl ShadowCondition {
    pub fn empty() -> Self {
        Self {
            table: None,
            operation: ShadowOperationType::HintMatch,
        }
    }

    pub fn for_table(table: impl Into<String>, operation: ShadowOperationType) -> Self {
        Self {
            table: Some(table.into()),
            operation,
        }
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn operation(&self) -> ShadowOperationType {
        self.operation
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_none()
    }
}

impl Default for ShadowCondition {
    fn default() -> Self {
        Self::empty()
    }
}
