//! Declarative statement files.
//!
//! A statement file describes one statement as TOML tables; resolving it
//! checks the description and turns it into clause values in the order
//! they are added to a [`Statement`].

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use td_clause::{
    Clause, ClauseResult, Column, CreateTable, Dialect, Duration, Fill, Fragment, RawClause,
    SLimit, Statement, Table, TableKind, Tags, Using, Value, Window,
};

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatementFileRaw {
    kind: StatementKind,
    #[serde(default)]
    prelude: Vec<RawClauseDef>,
    #[serde(default)]
    tables: Vec<TableDef>,
    using: Option<UsingDef>,
    window: Option<WindowDef>,
    fill: Option<FillDef>,
    /// Applied in order; later entries merge into earlier ones.
    #[serde(default)]
    slimit: Vec<SLimitDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClauseDef {
    name: String,
    sql: String,
    #[serde(default)]
    vars: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDef {
    kind: TableKind,
    name: String,
    #[serde(default)]
    if_not_exists: bool,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    tag_columns: Vec<Column>,
    using: Option<UsingDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UsingDef {
    super_table: String,
    #[serde(default)]
    tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WindowKind {
    Interval,
    State,
    Session,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowDef {
    kind: WindowKind,
    interval: Option<Duration>,
    offset: Option<Duration>,
    sliding: Option<Duration>,
    column: Option<String>,
    gap: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FillMode {
    None,
    Value,
    Prev,
    Null,
    Linear,
    Next,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FillDef {
    mode: FillMode,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SLimitDef {
    #[serde(default)]
    limit: i64,
    #[serde(default)]
    offset: i64,
}

// ---------------------------------------------------------------------------
// StatementFile (resolved, validated)
// ---------------------------------------------------------------------------

/// Which clause order the statement is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Create,
    Query,
}

#[derive(Debug, Clone)]
pub struct StatementFile {
    pub kind: StatementKind,
    /// Clauses in the order they are added to the statement.
    pub clauses: Vec<Clause>,
}

impl StatementFile {
    /// Read and parse a statement file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }

    pub fn to_statement(&self) -> Statement {
        let mut stmt = Statement::new();
        for clause in &self.clauses {
            stmt.add_clause(clause.clone());
        }
        stmt
    }

    /// Build the statement with `dialect` and return its text and parameters.
    pub fn render(&self, dialect: &Dialect) -> ClauseResult<Fragment> {
        let mut stmt = self.to_statement();
        match self.kind {
            StatementKind::Create => stmt.build_create(dialect),
            StatementKind::Query => stmt.build_query(dialect),
        }
        stmt.finish()
    }
}

impl FromStr for StatementFile {
    type Err = anyhow::Error;

    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: StatementFileRaw = toml::from_str(toml_str)?;
        let mut clauses = Vec::new();

        for def in raw.prelude {
            let name = def.name.to_ascii_uppercase();
            clauses.push(RawClause::new(name, def.sql).with_vars(def.vars).into());
        }
        if !raw.tables.is_empty() {
            let tables = raw
                .tables
                .into_iter()
                .enumerate()
                .map(|(i, def)| resolve_table(def).map_err(|e| anyhow::anyhow!("tables[{i}]: {e}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            clauses.push(CreateTable::new(tables).into());
        }
        if let Some(def) = raw.using {
            clauses.push(Using::new(def.super_table, def.tags).into());
        }
        if let Some(def) = raw.window {
            clauses.push(resolve_window(def).map_err(|e| anyhow::anyhow!("window: {e}"))?.into());
        }
        if let Some(def) = raw.fill {
            clauses.push(resolve_fill(def).map_err(|e| anyhow::anyhow!("fill: {e}"))?.into());
        }
        for def in raw.slimit {
            clauses.push(SLimit::new(def.limit, def.offset).into());
        }

        tracing::debug!(domain = "conf", clauses = clauses.len(), "statement file resolved");
        Ok(StatementFile {
            kind: raw.kind,
            clauses,
        })
    }
}

fn resolve_table(def: TableDef) -> anyhow::Result<Table> {
    for column in def.columns.iter().chain(&def.tag_columns) {
        if column.column_type.has_length() && column.length == 0 {
            anyhow::bail!(
                "column {:?}: type {} requires a length > 0",
                column.name,
                column.column_type
            );
        }
    }
    let columns_empty = def.columns.is_empty();
    let builder = Table::builder(def.kind, &def.name)
        .if_not_exists(def.if_not_exists)
        .columns(def.columns);

    match def.kind {
        TableKind::Super => {
            if def.using.is_some() {
                anyhow::bail!("super table {:?} cannot have `using`", def.name);
            }
            if def.tag_columns.is_empty() {
                anyhow::bail!("super table {:?} needs at least one tag column", def.name);
            }
            Ok(def
                .tag_columns
                .into_iter()
                .fold(builder, |b, c| b.tag_column(c))
                .build())
        }
        TableKind::Simple => {
            if !def.tag_columns.is_empty() {
                anyhow::bail!("simple table {:?} cannot have tag_columns", def.name);
            }
            match def.using {
                Some(using) => Ok(builder.using(using.super_table, using.tags).build()),
                None if columns_empty => {
                    anyhow::bail!("simple table {:?} needs `columns` or `using`", def.name)
                }
                None => Ok(builder.build()),
            }
        }
    }
}

fn resolve_window(def: WindowDef) -> anyhow::Result<Window> {
    let interval_only = def.offset.is_some() || def.sliding.is_some();
    match def.kind {
        WindowKind::Interval => {
            if def.column.is_some() || def.gap.is_some() {
                anyhow::bail!("interval window takes no `column` or `gap`");
            }
            let interval = def
                .interval
                .ok_or_else(|| anyhow::anyhow!("interval window requires `interval`"))?;
            let mut window = Window::interval(interval);
            if let Some(offset) = def.offset {
                window = window.with_offset(offset);
            }
            if let Some(sliding) = def.sliding {
                window = window.with_sliding(sliding);
            }
            Ok(window)
        }
        WindowKind::State => {
            if interval_only || def.interval.is_some() || def.gap.is_some() {
                anyhow::bail!("state window takes only `column`");
            }
            let column = def
                .column
                .ok_or_else(|| anyhow::anyhow!("state window requires `column`"))?;
            Ok(Window::state(column))
        }
        WindowKind::Session => {
            if interval_only || def.interval.is_some() {
                anyhow::bail!("session window takes only `column` and `gap`");
            }
            let column = def
                .column
                .ok_or_else(|| anyhow::anyhow!("session window requires `column`"))?;
            let gap = def
                .gap
                .ok_or_else(|| anyhow::anyhow!("session window requires `gap`"))?;
            Ok(Window::session(column, gap))
        }
    }
}

fn resolve_fill(def: FillDef) -> anyhow::Result<Fill> {
    let fill = match (def.mode, def.value) {
        (FillMode::Value, Some(v)) => Fill::Value(v),
        (FillMode::Value, None) => anyhow::bail!("mode \"value\" requires `value`"),
        (_, Some(_)) => anyhow::bail!("`value` is only allowed with mode \"value\""),
        (FillMode::None, None) => Fill::None,
        (FillMode::Prev, None) => Fill::Prev,
        (FillMode::Null, None) => Fill::Null,
        (FillMode::Linear, None) => Fill::Linear,
        (FillMode::Next, None) => Fill::Next,
    };
    Ok(fill)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render(toml_str: &str) -> Fragment {
        let file: StatementFile = toml_str.parse().unwrap();
        file.render(&Dialect::default()).unwrap()
    }

    #[test]
    fn create_child_table() {
        let frag = render(
            r#"
            kind = "create"

            [[tables]]
            kind = "simple"
            name = "t_1"
            if_not_exists = true
            using = { super_table = "st_1", tags = [
                { name = "tag_int", value = 1 },
                { name = "tag_string", value = "string" },
            ] }
            "#,
        );
        assert_eq!(
            frag.sql,
            "CREATE TABLE IF NOT EXISTS `t_1` USING `st_1`(`tag_int`,`tag_string`) TAGS (?,?)"
        );
        assert_eq!(frag.vars, vec![Value::Int(1), Value::from("string")]);
    }

    #[test]
    fn create_super_table() {
        let frag = render(
            r#"
            kind = "create"

            [[tables]]
            kind = "super"
            name = "st_1"
            if_not_exists = true
            columns = [
                { name = "ts", type = "TIMESTAMP" },
                { name = "value", type = "BIGINT" },
            ]
            tag_columns = [{ name = "tbn", type = "BINARY", length = 64 }]
            "#,
        );
        assert_eq!(
            frag.sql,
            "CREATE STABLE IF NOT EXISTS `st_1` (`ts` TIMESTAMP,`value` BIGINT) TAGS(`tbn` BINARY(64))"
        );
    }

    #[test]
    fn query_with_window_fill_and_slimit() {
        let frag = render(
            r#"
            kind = "query"

            [[prelude]]
            name = "select"
            sql = "avg(`value`)"

            [[prelude]]
            name = "FROM"
            sql = "`st_1`"

            [[prelude]]
            name = "GROUP BY"
            sql = "tbname"

            [window]
            kind = "interval"
            interval = "10m"
            offset = "5m"
            sliding = "2m"

            [fill]
            mode = "value"
            value = 12

            [[slimit]]
            limit = 10
            offset = 20

            [[slimit]]
            offset = 30
            "#,
        );
        assert_eq!(
            frag.sql,
            "SELECT avg(`value`) FROM `st_1` INTERVAL(10m,5m) SLIDING(2m) FILL (VALUE,12) GROUP BY tbname SLIMIT 10 SOFFSET 30"
        );
    }

    #[test]
    fn prelude_vars_bound() {
        let frag = render(
            r#"
            kind = "query"

            [[prelude]]
            name = "SELECT"
            sql = "*"

            [[prelude]]
            name = "FROM"
            sql = "`t`"

            [[prelude]]
            name = "WHERE"
            sql = "`v` > ?"
            vars = [1.5]
            "#,
        );
        assert_eq!(frag.sql, "SELECT * FROM `t` WHERE `v` > ?");
        assert_eq!(frag.vars, vec![Value::Float(1.5)]);
    }

    #[test]
    fn session_window() {
        let frag = render(
            r#"
            kind = "query"
            prelude = [{ name = "SELECT", sql = "count(*)" }, { name = "FROM", sql = "`t`" }]
            window = { kind = "session", column = "ts", gap = "30s" }
            "#,
        );
        assert_eq!(frag.sql, "SELECT count(*) FROM `t` SESSION(`ts`,30s)");
    }

    #[test]
    fn bad_duration_rejected() {
        assert!(
            r#"
            kind = "query"
            window = { kind = "interval", interval = "10" }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn window_fields_must_match_kind() {
        assert!(
            r#"
            kind = "query"
            window = { kind = "state", column = "s", gap = "1m" }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
        assert!(
            r#"
            kind = "query"
            window = { kind = "interval" }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn fill_value_only_with_value_mode() {
        assert!(
            r#"
            kind = "query"
            fill = { mode = "prev", value = 1.0 }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
        assert!(
            r#"
            kind = "query"
            fill = { mode = "value" }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn sized_column_needs_length() {
        let err = r#"
            kind = "create"
            [[tables]]
            kind = "simple"
            name = "t"
            columns = [{ name = "c", type = "NCHAR" }]
        "#
        .parse::<StatementFile>()
        .unwrap_err();
        assert!(err.to_string().contains("tables[0]"), "{err}");
    }

    #[test]
    fn super_table_rejects_using() {
        assert!(
            r#"
            kind = "create"
            [[tables]]
            kind = "super"
            name = "st"
            columns = [{ name = "ts", type = "TIMESTAMP" }]
            tag_columns = [{ name = "t", type = "INT" }]
            using = { super_table = "other" }
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn simple_table_needs_columns_or_using() {
        assert!(
            r#"
            kind = "create"
            [[tables]]
            kind = "simple"
            name = "t"
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn unknown_table_kind_rejected() {
        assert!(
            r#"
            kind = "create"
            [[tables]]
            kind = "view"
            name = "t"
            "#
            .parse::<StatementFile>()
            .is_err()
        );
    }

    #[test]
    fn geometry_column_refused_at_render() {
        let file: StatementFile = r#"
            kind = "create"
            [[tables]]
            kind = "simple"
            name = "t"
            columns = [{ name = "g", type = "GEOMETRY" }]
        "#
        .parse()
        .unwrap();
        assert!(file.render(&Dialect::default()).is_err());
    }

    #[test]
    fn load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            kind = "create"
            [[tables]]
            kind = "simple"
            name = "t"
            columns = [{{ name = "ts", type = "timestamp" }}, {{ name = "n", type = "nchar", length = 8 }}]
            "#
        )
        .unwrap();
        let stmt = StatementFile::load(file.path()).unwrap();
        assert_eq!(stmt.kind, StatementKind::Create);
        assert_eq!(stmt.clauses.len(), 1);
        let frag = stmt.render(&Dialect::default()).unwrap();
        assert_eq!(frag.sql, "CREATE TABLE `t` (`ts` TIMESTAMP,`n` NCHAR(8))");
    }

    #[test]
    fn repeated_tag_name_keeps_last_value() {
        let frag = render(
            r#"
            kind = "create"

            [[tables]]
            kind = "simple"
            name = "t_1"
            using = { super_table = "st_1", tags = [
                { name = "a", value = 1 },
                { name = "a", value = 2 },
            ] }
            "#,
        );
        assert_eq!(frag.sql, "CREATE TABLE `t_1` USING `st_1`(`a`) TAGS (?)");
        assert_eq!(frag.vars, vec![Value::Int(2)]);
    }

    #[test]
    fn load_missing_file() {
        assert!(StatementFile::load("/nonexistent/statement.toml").is_err());
    }
}
