use serde::{Deserialize, Serialize};

use crate::rule::DataSourceMapping;

/// One data source a statement is routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteUnit {
    /// Name the statement addresses.
    pub logic: String,
    /// Physical data source the statement runs on.
    pub actual: String,
}

impl RouteUnit {
    pub fn new(logic: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            logic: logic.into(),
            actual: actual.into(),
        }
    }
}

/// Point each unit whose actual data source has a shadow at that shadow.
///
/// Units without a mapping keep their production data source.
pub fn apply_mappings(units: &[RouteUnit], mappings: &DataSourceMapping) -> Vec<RouteUnit> {
    units
        .iter()
        .map(|unit| match mappings.get(&unit.actual) {
            Some(shadow) => {
                tracing::debug!(
                    logic = %unit.logic,
                    production = %unit.actual,
                    shadow = %shadow,
                    "Routing to shadow data source"
                );
                RouteUnit::new(unit.logic.clone(), shadow.clone())
            }
            None => unit.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings(pairs: &[(&str, &str)]) -> DataSourceMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn rewrites_mapped_units() {
        let units = vec![RouteUnit::new("logic_db", "ds"), RouteUnit::new("logic_db", "ds_other")];
        let routed = apply_mappings(&units, &mappings(&[("ds", "ds_shadow")]));

        assert_eq!(
            routed,
            vec![
                RouteUnit::new("logic_db", "ds_shadow"),
                RouteUnit::new("logic_db", "ds_other"),
            ]
        );
    }

    #[test]
    fn empty_mapping_keeps_units() {
        let units = vec![RouteUnit::new("logic_db", "ds")];
        assert_eq!(apply_mappings(&units, &DataSourceMapping::new()), units);
    }

    #[test]
    fn serializes_as_plain_object() {
        let json = serde_json::to_value(RouteUnit::new("logic_db", "ds_shadow")).unwrap();
        assert_eq!(json, serde_json::json!({"logic": "logic_db", "actual": "ds_shadow"}));
    }
}
