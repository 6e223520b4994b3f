use std::collections::HashSet;

use crate::tool::ToolConfig;

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Internal validation, called automatically during `ToolConfig::from_str` / `load`.
pub(crate) fn validate_tool(config: &ToolConfig) -> anyhow::Result<()> {
    check_level("logging.level", &config.logging.level)?;
    for (module, level) in &config.logging.modules {
        check_level(&format!("logging.modules.{module}"), level)?;
    }

    let dialect = config.dialect.resolve();
    check_order("dialect.query_clauses", &dialect.query_clauses)?;
    check_order("dialect.create_clauses", &dialect.create_clauses)?;
    Ok(())
}

fn check_level(key: &str, level: &str) -> anyhow::Result<()> {
    if !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        anyhow::bail!("{key}: unknown log level {level:?} (expected one of {LEVELS:?})");
    }
    Ok(())
}

/// A clause order must be non-empty and name each clause once.
fn check_order(key: &str, order: &[String]) -> anyhow::Result<()> {
    if order.is_empty() {
        anyhow::bail!("{key} must name at least one clause");
    }
    let mut seen = HashSet::new();
    for name in order {
        if name.is_empty() {
            anyhow::bail!("{key}: empty clause name");
        }
        if !seen.insert(name.as_str()) {
            anyhow::bail!("{key}: clause {name:?} listed twice");
        }
    }
    Ok(())
}
