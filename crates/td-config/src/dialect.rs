use serde::Deserialize;
use td_clause::Dialect;

/// `[dialect]`: optional overrides of the clause emission order.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub query_clauses: Option<Vec<String>>,
    pub create_clauses: Option<Vec<String>>,
}

impl DialectConfig {
    /// Apply the overrides on top of the built-in TDengine dialect.
    pub fn resolve(&self) -> Dialect {
        let mut dialect = Dialect::default();
        if let Some(ref order) = self.query_clauses {
            dialect.query_clauses = normalize(order);
        }
        if let Some(ref order) = self.create_clauses {
            dialect.create_clauses = normalize(order);
        }
        dialect
    }
}

/// Clause names are matched in upper case with single spaces.
fn normalize(order: &[String]) -> Vec<String> {
    order
        .iter()
        .map(|name| {
            name.split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_ascii_uppercase()
        })
        .collect()
}
