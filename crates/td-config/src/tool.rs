use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::dialect::DialectConfig;
use crate::logging::LoggingConfig;
use crate::validate;

/// Contents of `tdsql.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub logging: LoggingConfig,
    pub dialect: DialectConfig,
}

impl ToolConfig {
    /// Read and parse a `tdsql.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for ToolConfig {
    type Err = anyhow::Error;

    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: ToolConfig = toml::from_str(toml_str)?;
        validate::validate_tool(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::logging::LogFormat;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: ToolConfig = "".parse().unwrap();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.logging.format, LogFormat::Plain);
        assert!(cfg.dialect.query_clauses.is_none());
    }

    #[test]
    fn full_file() {
        let cfg: ToolConfig = r#"
            [logging]
            level = "debug"
            format = "json"
            file = "logs/tdsql.log"
            modules = { "td_clause::statement" = "trace" }

            [dialect]
            create_clauses = ["CREATE TABLE", "USING"]
        "#
        .parse()
        .unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.modules["td_clause::statement"], "trace");
        assert_eq!(
            cfg.dialect.resolve().create_clauses,
            vec!["CREATE TABLE", "USING"]
        );
    }

    #[test]
    fn duplicate_clause_names_rejected() {
        let err = r#"
            [dialect]
            query_clauses = ["SELECT", "FROM", "select"]
        "#
        .parse::<ToolConfig>()
        .unwrap_err();
        assert!(err.to_string().contains("SELECT"), "{err}");
    }

    #[test]
    fn unknown_level_rejected() {
        assert!("[logging]\nlevel = \"loud\"".parse::<ToolConfig>().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"info\"").unwrap();
        let cfg = ToolConfig::load(file.path()).unwrap();
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(ToolConfig::load("/nonexistent/tdsql.toml").is_err());
    }
}
