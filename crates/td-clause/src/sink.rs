//! Fragment sink: the write target every clause renders into.

use serde::Serialize;

use crate::error::ClauseError;
use crate::quote::quote_to;
use crate::value::Value;

/// A value handed to [`Builder::add_var`].
#[derive(Debug, Clone, PartialEq)]
pub enum Var {
    /// Rendered as a single `?`.
    One(Value),
    /// Rendered as `(?,?,…)`, or `(NULL)` when empty.
    List(Vec<Value>),
}

impl Var {
    pub fn one(value: impl Into<Value>) -> Self {
        Var::One(value.into())
    }

    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Var::List(values.into_iter().map(Into::into).collect())
    }
}

/// Write-only sink for statement text and positional parameters.
///
/// Writes are infallible; problems found while rendering a clause are
/// recorded with [`add_error`](Builder::add_error) and surface when the
/// statement is finished.
pub trait Builder {
    fn write_str(&mut self, s: &str);

    fn write_char(&mut self, c: char);

    /// Write `ident` as a quoted identifier.
    fn write_quoted(&mut self, ident: &str);

    /// Write placeholder(s) for `var` and record the literal(s) in call order.
    fn add_var(&mut self, var: Var);

    /// Record a deferred build error.
    fn add_error(&mut self, err: ClauseError);
}

/// Rendered statement text with its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub sql: String,
    pub vars: Vec<Value>,
}

/// In-memory [`Builder`] owning one statement's text, parameters and the
/// first recorded build error.
#[derive(Debug, Default)]
pub struct SqlBuffer {
    sql: String,
    vars: Vec<Value>,
    error: Option<ClauseError>,
}

impl SqlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn vars(&self) -> &[Value] {
        &self.vars
    }

    pub fn error(&self) -> Option<&ClauseError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.sql.len()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.sql.truncate(len);
    }

    /// Consume the buffer. A recorded build error wins over the text.
    pub fn finish(self) -> Result<Fragment, ClauseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Fragment {
                sql: self.sql,
                vars: self.vars,
            }),
        }
    }

    fn bind_var(&mut self, value: Value) {
        self.sql.push('?');
        self.vars.push(value);
    }
}

impl Builder for SqlBuffer {
    fn write_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    fn write_char(&mut self, c: char) {
        self.sql.push(c);
    }

    fn write_quoted(&mut self, ident: &str) {
        quote_to(&mut self.sql, ident);
    }

    fn add_var(&mut self, var: Var) {
        match var {
            Var::One(value) => self.bind_var(value),
            Var::List(values) if values.is_empty() => self.sql.push_str("(NULL)"),
            Var::List(values) => {
                self.sql.push('(');
                for (i, value) in values.into_iter().enumerate() {
                    if i > 0 {
                        self.sql.push(',');
                    }
                    self.bind_var(value);
                }
                self.sql.push(')');
            }
        }
    }

    fn add_error(&mut self, err: ClauseError) {
        if self.error.is_some() {
            td_warn!(emit, error = %err, "additional build error dropped");
            return;
        }
        self.error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use orion_error::StructError;

    use super::*;
    use crate::error::ClauseReason;

    #[test]
    fn single_var() {
        let mut buf = SqlBuffer::new();
        buf.write_str("LIMIT ");
        buf.add_var(Var::one(10));
        assert_eq!(buf.sql(), "LIMIT ?");
        assert_eq!(buf.vars(), &[Value::Int(10)]);
    }

    #[test]
    fn list_var() {
        let mut buf = SqlBuffer::new();
        buf.add_var(Var::list([Value::from(1), Value::from("string")]));
        assert_eq!(buf.sql(), "(?,?)");
        assert_eq!(buf.vars(), &[Value::Int(1), Value::from("string")]);
    }

    #[test]
    fn empty_list_var() {
        let mut buf = SqlBuffer::new();
        buf.add_var(Var::List(Vec::new()));
        assert_eq!(buf.sql(), "(NULL)");
        assert!(buf.vars().is_empty());
    }

    #[test]
    fn quoted_write() {
        let mut buf = SqlBuffer::new();
        buf.write_quoted("db.t_1");
        buf.write_char(' ');
        assert_eq!(buf.sql(), "`db`.`t_1` ");
    }

    #[test]
    fn finish_refuses_recorded_error() {
        let mut buf = SqlBuffer::new();
        buf.write_str("CREATE TABLE ");
        buf.add_error(StructError::from(ClauseReason::Build));
        assert!(buf.has_error());
        assert!(buf.finish().is_err());
    }

    #[test]
    fn finish_returns_text_and_vars() {
        let mut buf = SqlBuffer::new();
        buf.write_str("TAGS ");
        buf.add_var(Var::List(vec![Value::from(true)]));
        let frag = buf.finish().unwrap();
        assert_eq!(frag.sql, "TAGS (?)");
        assert_eq!(frag.vars, vec![Value::Bool(true)]);
    }
}
