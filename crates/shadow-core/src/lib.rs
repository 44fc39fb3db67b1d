//! Shadow data-source routing.
//!
//! Decides, per statement, whether traffic goes to shadow data sources and
//! which shadow each production data source maps to.

pub mod algorithm;
pub mod condition;
pub mod config;
pub mod error;
pub mod retriever;
pub mod route;
pub mod rule;

pub use algorithm::{HintShadowAlgorithm, ShadowAlgorithm};
pub use condition::{ShadowCondition, ShadowOperationType};
pub use config::ShadowRuleConfig;
pub use error::{ConfigError, ShadowError};
pub use retriever::{DataSourceMappingsRetriever, TableHintMappingsRetriever};
pub use route::{RouteUnit, apply_mappings};
pub use rule::{DataSourceMapping, ShadowRule, ShadowRuleEngine};
