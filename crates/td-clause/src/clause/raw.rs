use crate::sink::{Builder, Var};
use crate::value::Value;

use super::{Clause, ClauseSlot};

/// A host clause given as literal SQL, e.g. `SELECT` or `FROM`, with values
/// for its `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClause {
    name: String,
    sql: String,
    vars: Vec<Value>,
}

impl RawClause {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            vars: Vec::new(),
        }
    }

    pub fn with_vars(mut self, vars: impl IntoIterator<Item = Value>) -> Self {
        self.vars.extend(vars);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn build(&self, builder: &mut dyn Builder) {
        let mut vars = self.vars.iter();
        let mut rest = self.sql.as_str();
        while let Some(pos) = rest.find('?') {
            builder.write_str(&rest[..pos]);
            match vars.next() {
                Some(v) => builder.add_var(Var::One(v.clone())),
                None => builder.write_char('?'),
            }
            rest = &rest[pos + 1..];
        }
        builder.write_str(rest);
    }

    /// Replaces the previous clause of the same name; the keyword stays.
    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        slot.expression = Some(Clause::Raw(self));
    }
}
