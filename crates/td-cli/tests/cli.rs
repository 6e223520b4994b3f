use std::io::Write;
use std::process::Command;

fn tdsql() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tdsql"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn statement_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const CHILD_TABLE: &str = r#"
kind = "create"

[[tables]]
kind = "simple"
name = "t_1"
if_not_exists = true
using = { super_table = "st_1", tags = [{ name = "tag_string", value = "it's" }] }
"#;

#[test]
fn render_prints_sql_and_vars() {
    let file = statement_file(CHILD_TABLE);
    let out = tdsql().arg("render").arg(file.path()).output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("CREATE TABLE IF NOT EXISTS `t_1` USING `st_1`(`tag_string`) TAGS (?)")
    );
    assert_eq!(lines.next(), Some("$1 = 'it''s'"));
}

#[test]
fn render_json() {
    let file = statement_file(CHILD_TABLE);
    let out = tdsql()
        .arg("render")
        .arg("--json")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        doc["sql"],
        "CREATE TABLE IF NOT EXISTS `t_1` USING `st_1`(`tag_string`) TAGS (?)"
    );
    assert_eq!(doc["vars"], serde_json::json!(["it's"]));
}

#[test]
fn explain_inlines_vars() {
    let file = statement_file(CHILD_TABLE);
    let out = tdsql().arg("explain").arg(file.path()).output().unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim_end(),
        "CREATE TABLE IF NOT EXISTS `t_1` USING `st_1`(`tag_string`) TAGS ('it''s')"
    );
}

#[test]
fn config_reorders_clauses() {
    let statement = statement_file(
        r#"
kind = "query"
prelude = [{ name = "SELECT", sql = "*" }, { name = "FROM", sql = "`t`" }]
fill = { mode = "prev" }
window = { kind = "interval", interval = "1h" }
"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tdsql.toml");
    std::fs::write(
        &config,
        r#"
[dialect]
query_clauses = ["select", "from", "fill", "window"]
"#,
    )
    .unwrap();

    let out = tdsql()
        .arg("--config")
        .arg(&config)
        .arg("render")
        .arg(statement.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap().trim_end(),
        "SELECT * FROM `t` FILL (PREV) INTERVAL(1h)"
    );
}

#[test]
fn build_error_fails_the_command() {
    let file = statement_file(
        r#"
kind = "create"
[[tables]]
kind = "simple"
name = "t"
columns = [{ name = "g", type = "GEOMETRY" }]
"#,
    );
    let out = tdsql().arg("render").arg(file.path()).output().unwrap();
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn duration_is_normalised() {
    let out = tdsql().args(["duration", "500a"]).output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim_end(), "500a");

    let out = tdsql().args(["duration", "10x"]).output().unwrap();
    assert!(!out.status.success());
}
