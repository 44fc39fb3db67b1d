use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::algorithm::{self, HintShadowAlgorithm, ShadowAlgorithm};
use crate::config::ShadowRuleConfig;
use crate::error::ConfigError;

/// Production data-source name to shadow data-source name.
pub type DataSourceMapping = BTreeMap<String, String>;

/// The queries a retriever needs from the owner of shadow configuration.
///
/// Implementations are shared read-only between routing calls.
pub trait ShadowRuleEngine: Send + Sync {
    /// Keep the candidates that are configured shadow tables, in candidate order.
    fn filter_shadow_tables(&self, candidates: &[String]) -> Vec<String>;

    fn default_shadow_algorithm(&self) -> Option<&dyn ShadowAlgorithm>;

    /// Hint-capable algorithms bound to `table`, in configured order.
    fn hint_shadow_algorithms(&self, table: &str) -> Vec<&dyn HintShadowAlgorithm>;

    /// Mappings for the data sources `table` is bound to.
    fn shadow_data_source_mappings(&self, table: &str) -> DataSourceMapping;

    /// Mappings for every configured data source.
    fn all_shadow_data_source_mappings(&self) -> DataSourceMapping;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ShadowDataSource {
    production: String,
    shadow: String,
}

struct ShadowTable {
    data_sources: Vec<String>,
    algorithms: Vec<Arc<dyn ShadowAlgorithm>>,
}

/// In-memory shadow rule built from a validated [`ShadowRuleConfig`].
pub struct ShadowRule {
    data_sources: BTreeMap<String, ShadowDataSource>,
    tables: BTreeMap<String, ShadowTable>,
    default_algorithm: Option<Arc<dyn ShadowAlgorithm>>,
}

impl ShadowRule {
    /// Build the rule, failing on any dangling reference or on two data
    /// sources sharing one production name.
    pub fn new(config: &ShadowRuleConfig) -> Result<Self, ConfigError> {
        let algorithms = config
            .algorithms
            .iter()
            .map(|(name, cfg)| Ok((name.clone(), algorithm::create(name, cfg)?)))
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        let mut data_sources = BTreeMap::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (name, cfg) in &config.data_sources {
            if let Some(first) = owners.insert(&cfg.production, name) {
                return Err(ConfigError::DuplicateProduction {
                    production: cfg.production.clone(),
                    first: first.to_string(),
                    second: name.clone(),
                });
            }
            data_sources.insert(
                name.clone(),
                ShadowDataSource {
                    production: cfg.production.clone(),
                    shadow: cfg.shadow.clone(),
                },
            );
        }

        let mut tables = BTreeMap::new();
        for (table, cfg) in &config.tables {
            for data_source in &cfg.data_sources {
                if !data_sources.contains_key(data_source) {
                    return Err(ConfigError::UnknownReference {
                        kind: "data source",
                        name: data_source.clone(),
                        owner: format!("table {table}"),
                    });
                }
            }

            let table_algorithms = cfg
                .algorithms
                .iter()
                .map(|name| {
                    algorithms
                        .get(name)
                        .cloned()
                        .ok_or_else(|| ConfigError::UnknownReference {
                            kind: "algorithm",
                            name: name.clone(),
                            owner: format!("table {table}"),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            tables.insert(
                table.clone(),
                ShadowTable {
                    data_sources: cfg.data_sources.clone(),
                    algorithms: table_algorithms,
                },
            );
        }

        let default_algorithm = match &config.default_algorithm {
            Some(name) => Some(algorithms.get(name).cloned().ok_or_else(|| {
                ConfigError::UnknownReference {
                    kind: "algorithm",
                    name: name.clone(),
                    owner: "default_algorithm".into(),
                }
            })?),
            None => None,
        };

        tracing::info!(
            data_sources = data_sources.len(),
            tables = tables.len(),
            algorithms = algorithms.len(),
            default_algorithm = ?config.default_algorithm,
            "Loaded shadow rule"
        );

        Ok(Self {
            data_sources,
            tables,
            default_algorithm,
        })
    }

    fn mappings_for<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> DataSourceMapping {
        names
            .into_iter()
            .filter_map(|name| self.data_sources.get(name))
            .map(|ds| (ds.production.clone(), ds.shadow.clone()))
            .collect()
    }
}

impl ShadowRuleEngine for ShadowRule {
    fn filter_shadow_tables(&self, candidates: &[String]) -> Vec<String> {
        candidates
            .iter()
            .filter(|table| self.tables.contains_key(table.as_str()))
            .cloned()
            .collect()
    }

    fn default_shadow_algorithm(&self) -> Option<&dyn ShadowAlgorithm> {
        self.default_algorithm.as_deref()
    }

    fn hint_shadow_algorithms(&self, table: &str) -> Vec<&dyn HintShadowAlgorithm> {
        self.tables
            .get(table)
            .map(|t| t.algorithms.iter().filter_map(|a| a.as_hint()).collect())
            .unwrap_or_default()
    }

    fn shadow_data_source_mappings(&self, table: &str) -> DataSourceMapping {
        self.tables
            .get(table)
            .map(|t| self.mappings_for(&t.data_sources))
            .unwrap_or_default()
    }

    fn all_shadow_data_source_mappings(&self) -> DataSourceMapping {
        self.mappings_for(self.data_sources.keys())
    }
}
