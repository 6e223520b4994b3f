//! Reference statement host: clause slots plus the buffer they render into.

use std::collections::HashMap;

use crate::clause::{Clause, ClauseSlot, CreateTable};
use crate::dialect::Dialect;
use crate::error::ClauseResult;
use crate::sink::{Builder, Fragment, SqlBuffer};
use crate::value::Value;

/// Collects clauses by name and renders them in a caller-given order.
#[derive(Debug, Default)]
pub struct Statement {
    clauses: HashMap<String, ClauseSlot>,
    buf: SqlBuffer,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `clause`, merging it into any clause already stored under the
    /// same name.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        let name = clause.name().to_string();
        let replaced = self.clauses.contains_key(&name);
        let slot = self.clauses.entry(name.clone()).or_default();
        slot.name = name.clone();
        clause.merge_clause(slot);
        td_debug!(merge, clause = %name, replaced, "clause added");
    }

    pub fn clause(&self, name: &str) -> Option<&ClauseSlot> {
        self.clauses.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clauses.contains_key(name)
    }

    /// Render the named slots in order, one space apart. Missing slots and
    /// slots that render nothing are skipped.
    pub fn build<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            let Some(slot) = self.clauses.get(name.as_ref()) else {
                continue;
            };
            let mark = self.buf.len();
            if mark > 0 {
                self.buf.write_char(' ');
            }
            let body = self.buf.len();
            slot.build(&mut self.buf);
            if self.buf.len() == body {
                self.buf.truncate(mark);
            }
        }
    }

    /// Render in the dialect's query clause order.
    pub fn build_query(&mut self, dialect: &Dialect) {
        let names = dialect.query_clauses.clone();
        self.build(&names);
    }

    /// Render in the dialect's create clause order. INSERT and VALUES are
    /// left out when the statement carries a CREATE TABLE clause.
    pub fn build_create(&mut self, dialect: &Dialect) {
        let names: Vec<String> = dialect
            .create_clauses
            .iter()
            .filter(|name| !dialect.is_suppressed(name, self))
            .cloned()
            .collect();
        self.build(&names);
    }

    pub fn sql(&self) -> &str {
        self.buf.sql()
    }

    pub fn vars(&self) -> &[Value] {
        self.buf.vars()
    }

    pub fn has_error(&self) -> bool {
        self.buf.has_error()
    }

    /// Hand out the rendered text and parameters, or the first build error
    /// recorded while rendering.
    pub fn finish(self) -> ClauseResult<Fragment> {
        if let Some(err) = self.buf.error() {
            td_warn!(emit, error = %err, "statement refused");
        }
        self.buf.finish()
    }

    pub(crate) fn has_create_table(&self) -> bool {
        self.contains(CreateTable::NAME)
    }
}
