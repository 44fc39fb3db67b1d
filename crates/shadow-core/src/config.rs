use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Shadow rule configuration, usually read from a TOML file.
///
/// ```toml
/// default_algorithm = "sql-hint"
///
/// [data_sources.shadow_group]
/// production = "ds"
/// shadow = "ds_shadow"
///
/// [tables.t_order]
/// data_sources = ["shadow_group"]
/// algorithms = ["sql-hint"]
///
/// [algorithms.sql-hint]
/// type = "SQL_HINT"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ShadowRuleConfig {
    #[serde(default)]
    pub default_algorithm: Option<String>,
    #[serde(default)]
    pub data_sources: BTreeMap<String, DataSourceConfig>,
    #[serde(default)]
    pub tables: BTreeMap<String, TableConfig>,
    #[serde(default)]
    pub algorithms: BTreeMap<String, AlgorithmConfig>,
}

/// A production data source and the shadow data source that mirrors it.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    pub production: String,
    pub shadow: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableConfig {
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub algorithms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: toml::Table,
}

impl ShadowRuleConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
