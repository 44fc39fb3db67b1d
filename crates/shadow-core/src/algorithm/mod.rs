pub mod hint;

use std::sync::Arc;

use crate::condition::{ShadowCondition, ShadowOperationType};
use crate::config::AlgorithmConfig;
use crate::error::{ConfigError, ShadowError};

use self::hint::{SqlHintShadowAlgorithm, TableHintShadowAlgorithm};

/// A pluggable shadow algorithm.
///
/// Not every algorithm can evaluate hints. `as_hint` lets a caller ask for
/// that capability without knowing the concrete type.
pub trait ShadowAlgorithm: Send + Sync {
    /// The configured name of this algorithm (for logging).
    fn name(&self) -> &str;

    /// The algorithm type as it appears in configuration.
    fn kind(&self) -> &'static str;

    /// Hint-capable view of this algorithm, if it has one.
    fn as_hint(&self) -> Option<&dyn HintShadowAlgorithm> {
        None
    }
}

/// An algorithm that decides from the hints carried by a statement.
pub trait HintShadowAlgorithm: ShadowAlgorithm {
    /// Evaluate `condition` for the requested direction (`true` = shadow).
    ///
    /// Must be free of side effects: the same arguments yield the same verdict
    /// within one routing attempt.
    fn is_shadow(&self, condition: &ShadowCondition, is_shadow: bool) -> Result<bool, ShadowError>;
}

/// Instantiate a configured algorithm by its `type`.
pub fn create(name: &str, config: &AlgorithmConfig) -> Result<Arc<dyn ShadowAlgorithm>, ConfigError> {
    let props = Props { algorithm: name, table: &config.props };
    let algorithm: Arc<dyn ShadowAlgorithm> = match config.kind.to_ascii_uppercase().as_str() {
        SqlHintShadowAlgorithm::TYPE => Arc::new(SqlHintShadowAlgorithm::from_props(name, &props)?),
        TableHintShadowAlgorithm::TYPE => {
            Arc::new(TableHintShadowAlgorithm::from_props(name, &props)?)
        }
        _ => return Err(ConfigError::UnknownAlgorithmType(config.kind.clone())),
    };

    tracing::debug!(
        algorithm = name,
        kind = algorithm.kind(),
        hint = algorithm.as_hint().is_some(),
        "Created shadow algorithm"
    );
    Ok(algorithm)
}

/// Typed access to an algorithm's `props` table.
pub(crate) struct Props<'a> {
    algorithm: &'a str,
    table: &'a toml::Table,
}

impl Props<'_> {
    fn invalid(&self, property: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidProperty {
            algorithm: self.algorithm.to_string(),
            property: property.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn bool_or(&self, property: &str, default: bool) -> Result<bool, ConfigError> {
        match self.table.get(property) {
            Some(toml::Value::Boolean(b)) => Ok(*b),
            Some(toml::Value::String(s)) => s
                .trim()
                .parse::<bool>()
                .map_err(|_| self.invalid(property, format!("`{s}` is not a boolean"))),
            Some(_) => Err(self.invalid(property, "expected a boolean")),
            None => Ok(default),
        }
    }

    pub(crate) fn str_list(&self, property: &str) -> Result<Vec<String>, ConfigError> {
        match self.table.get(property) {
            Some(toml::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => Ok(s.clone()),
                    _ => Err(self.invalid(property, "expected a list of strings")),
                })
                .collect(),
            Some(toml::Value::String(s)) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()),
            Some(_) => Err(self.invalid(property, "expected a list of strings")),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn operations(&self, property: &str) -> Result<Vec<ShadowOperationType>, ConfigError> {
        self.str_list(property)?
            .iter()
            .map(|raw| {
                raw.parse()
                    .map_err(|_| self.invalid(property, format!("unknown operation `{raw}`")))
            })
            .collect()
    }
}
