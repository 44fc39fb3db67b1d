use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::Serialize;
use shadow_core::{DataSourceMapping, RouteUnit};

/// Split a `key=value` command-line pair.
pub fn parse_pair(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected `key=value`, got `{raw}`");
    };
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        bail!("expected `key=value`, got `{raw}`");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Table aliases of the statement. A bare `name` is its own alias.
pub fn table_aliases(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut aliases = BTreeMap::new();
    for entry in raw {
        let (alias, name) = if entry.contains('=') {
            parse_pair(entry)?
        } else {
            (entry.trim().to_string(), entry.trim().to_string())
        };
        if let Some(previous) = aliases.insert(alias.clone(), name) {
            bail!("table alias `{alias}` given twice (previously `{previous}`)");
        }
    }
    Ok(aliases)
}

pub fn route_units(raw: &[String]) -> Result<Vec<RouteUnit>> {
    raw.iter()
        .map(|entry| {
            let (logic, actual) = parse_pair(entry)?;
            Ok(RouteUnit::new(logic, actual))
        })
        .collect()
}

/// What the binary prints on stdout.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    /// The requested direction, not the routing outcome.
    pub is_shadow: bool,
    pub mappings: DataSourceMapping,
    pub routes: Vec<RouteUnit>,
}
