use std::collections::BTreeMap;

use crate::condition::{ShadowCondition, ShadowOperationType};
use crate::error::ShadowError;
use crate::rule::{DataSourceMapping, ShadowRuleEngine};

/// Decides which shadow data sources, if any, a statement is routed to.
///
/// An empty mapping means "no shadow routing"; it is never an error.
pub trait DataSourceMappingsRetriever {
    fn retrieve(&self, rule: &dyn ShadowRuleEngine) -> Result<DataSourceMapping, ShadowError>;
}

/// Retrieves shadow data-source mappings from hint algorithms.
///
/// Tables configured for shadow routing are checked in order, each against its
/// own hint algorithms, and the first positive verdict picks that table's
/// mappings. Only when none of the statement's tables is a shadow table does
/// the rule's default algorithm get a say, and then it can only select the
/// mappings of every data source.
///
/// Called for every routed statement; keep it allocation-light.
#[derive(Debug, Clone)]
pub struct TableHintMappingsRetriever {
    operation: ShadowOperationType,
    is_shadow: bool,
    table_alias_and_names: BTreeMap<String, String>,
}

impl TableHintMappingsRetriever {
    pub fn new(
        operation: ShadowOperationType,
        is_shadow: bool,
        table_alias_and_names: BTreeMap<String, String>,
    ) -> Self {
        Self {
            operation,
            is_shadow,
            table_alias_and_names,
        }
    }

    /// Distinct table names, in alias order, first occurrence kept.
    fn candidate_tables(&self) -> Vec<String> {
        let mut tables: Vec<String> = Vec::with_capacity(self.table_alias_and_names.len());
        for name in self.table_alias_and_names.values() {
            if !tables.contains(name) {
                tables.push(name.clone());
            }
        }
        tables
    }

    fn matches_default_algorithm(&self, rule: &dyn ShadowRuleEngine) -> Result<bool, ShadowError> {
        let Some(algorithm) = rule.default_shadow_algorithm() else {
            return Ok(false);
        };
        let Some(hint) = algorithm.as_hint() else {
            tracing::debug!(
                algorithm = algorithm.name(),
                kind = algorithm.kind(),
                "Default shadow algorithm is not hint-capable, skipping"
            );
            return Ok(false);
        };

        let matched = hint.is_shadow(&ShadowCondition::empty(), self.is_shadow)?;
        tracing::debug!(
            algorithm = hint.name(),
            is_shadow = self.is_shadow,
            matched,
            "Evaluated default shadow algorithm"
        );
        Ok(matched)
    }

    fn find_mappings_by_hints(
        &self,
        rule: &dyn ShadowRuleEngine,
        shadow_tables: &[String],
    ) -> Result<DataSourceMapping, ShadowError> {
        for table in shadow_tables {
            let condition = ShadowCondition::for_table(table.as_str(), self.operation);
            for algorithm in rule.hint_shadow_algorithms(table) {
                if algorithm.is_shadow(&condition, self.is_shadow)? {
                    tracing::debug!(
                        table = %table,
                        operation = %self.operation,
                        algorithm = algorithm.name(),
                        "Shadow hint matched"
                    );
                    return Ok(rule.shadow_data_source_mappings(table));
                }
            }
        }

        tracing::debug!(
            tables = ?shadow_tables,
            operation = %self.operation,
            "No shadow hint matched"
        );
        Ok(DataSourceMapping::new())
    }
}

impl DataSourceMappingsRetriever for TableHintMappingsRetriever {
    fn retrieve(&self, rule: &dyn ShadowRuleEngine) -> Result<DataSourceMapping, ShadowError> {
        let candidates = self.candidate_tables();
        let shadow_tables = rule.filter_shadow_tables(&candidates);

        tracing::debug!(
            candidates = ?candidates,
            shadow_tables = ?shadow_tables,
            "Retrieving shadow data source mappings"
        );

        if shadow_tables.is_empty() {
            return if self.matches_default_algorithm(rule)? {
                Ok(rule.all_shadow_data_source_mappings())
            } else {
                Ok(DataSourceMapping::new())
            };
        }

        self.find_mappings_by_hints(rule, &shadow_tables)
    }
}
