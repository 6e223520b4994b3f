use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// `[logging]` section of `tdsql.toml`. Every key is optional; an absent
/// section keeps the CLI quiet apart from warnings.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    /// Per-module overrides, e.g. `{ "td_clause::clause" = "debug" }` to
    /// follow SLIMIT merges.
    pub modules: BTreeMap<String, String>,
    /// Relative paths are taken from the directory of `tdsql.toml`.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            modules: BTreeMap::new(),
            file: None,
            format: LogFormat::Plain,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directives: the global level, then `module=level` in
    /// module order.
    pub fn filter_directives(&self) -> String {
        let mut directives = self.level.clone();
        for (module, level) in &self.modules {
            directives.push(',');
            directives.push_str(module);
            directives.push('=');
            directives.push_str(level);
        }
        directives
    }

    /// Log file location with a relative `file` joined onto `base_dir`.
    pub fn file_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.file.as_ref().map(|file| {
            if file.is_relative() {
                base_dir.join(file)
            } else {
                file.clone()
            }
        })
    }
}

/// `plain` puts the event domain in front as `[merge]`; `json` keeps it as
/// a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_follow_module_order() {
        let config: LoggingConfig = toml::from_str(
            r#"
            level = "info"
            modules = { "td_config" = "trace", "td_clause::statement" = "debug" }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.filter_directives(),
            "info,td_clause::statement=debug,td_config=trace"
        );
    }

    #[test]
    fn default_is_warn_without_file() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter_directives(), "warn");
        assert_eq!(config.file_path(Path::new("/etc/tdsql")), None);
    }

    #[test]
    fn relative_file_joins_base_dir() {
        let mut config = LoggingConfig::default();
        config.file = Some("logs/tdsql.log".into());
        assert_eq!(
            config.file_path(Path::new("/etc/tdsql")),
            Some(PathBuf::from("/etc/tdsql/logs/tdsql.log"))
        );
        config.file = Some("/var/log/tdsql.log".into());
        assert_eq!(
            config.file_path(Path::new("/etc/tdsql")),
            Some(PathBuf::from("/var/log/tdsql.log"))
        );
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(toml::from_str::<LoggingConfig>(r#"levl = "info""#).is_err());
    }
}
