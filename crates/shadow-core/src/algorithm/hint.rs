use crate::algorithm::{HintShadowAlgorithm, Props, ShadowAlgorithm};
use crate::condition::{ShadowCondition, ShadowOperationType};
use crate::error::{ConfigError, ShadowError};

/// Trusts the shadow hint carried by the statement.
///
/// The requested direction *is* the hint value, so the verdict is whether it
/// equals the configured `shadow` value (default `true`).
#[derive(Debug, Clone)]
pub struct SqlHintShadowAlgorithm {
    name: String,
    shadow: bool,
}

impl SqlHintShadowAlgorithm {
    pub const TYPE: &'static str = "SQL_HINT";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shadow: true,
        }
    }

    pub(crate) fn from_props(name: &str, props: &Props<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.to_string(),
            shadow: props.bool_or("shadow", true)?,
        })
    }
}

impl ShadowAlgorithm for SqlHintShadowAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        Self::TYPE
    }

    fn as_hint(&self) -> Option<&dyn HintShadowAlgorithm> {
        Some(self)
    }
}

impl HintShadowAlgorithm for SqlHintShadowAlgorithm {
    fn is_shadow(&self, _condition: &ShadowCondition, is_shadow: bool) -> Result<bool, ShadowError> {
        Ok(is_shadow == self.shadow)
    }
}

/// Shadow hint restricted to a set of tables and operations.
///
/// An empty `tables` or `operations` list places no restriction. Table names
/// match exactly, as shadow tables are looked up in the rule. A condition
/// without a table only matches when `tables` is empty.
#[derive(Debug, Clone)]
pub struct TableHintShadowAlgorithm {
    name: String,
    tables: Vec<String>,
    operations: Vec<ShadowOperationType>,
}

impl TableHintShadowAlgorithm {
    pub const TYPE: &'static str = "TABLE_HINT";

    pub fn new(
        name: impl Into<String>,
        tables: Vec<String>,
        operations: Vec<ShadowOperationType>,
    ) -> Self {
        Self {
            name: name.into(),
            tables,
            operations,
        }
    }

    pub(crate) fn from_props(name: &str, props: &Props<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new(
            name,
            props.str_list("tables")?,
            props.operations("operations")?,
        ))
    }

    fn matches_table(&self, condition: &ShadowCondition) -> bool {
        if self.tables.is_empty() {
            return true;
        }
        condition
            .table()
            .is_some_and(|table| self.tables.iter().any(|t| t == table))
    }

    fn matches_operation(&self, condition: &ShadowCondition) -> bool {
        self.operations.is_empty()
            || condition.is_empty()
            || self.operations.contains(&condition.operation())
    }
}

impl ShadowAlgorithm for TableHintShadowAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        Self::TYPE
    }

    fn as_hint(&self) -> Option<&dyn HintShadowAlgorithm> {
        Some(self)
    }
}

impl HintShadowAlgorithm for TableHintShadowAlgorithm {
    fn is_shadow(&self, condition: &ShadowCondition, is_shadow: bool) -> Result<bool, ShadowError> {
        Ok(is_shadow && self.matches_table(condition) && self.matches_operation(condition))
    }
}
