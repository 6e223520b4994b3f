//! Clause values, their emission and the per-slot merge rules.
//!
//! Each clause kind has a stable name key. A statement keeps one
//! [`ClauseSlot`] per key; adding a clause whose key is already present
//! merges into that slot. Every kind replaces the previous value except
//! [`SLimit`], which merges field by field.

mod create;
mod fill;
mod raw;
mod slimit;
pub mod table;
mod using;
mod window;

use crate::sink::Builder;

pub use create::CreateTable;
pub use fill::Fill;
pub use raw::RawClause;
pub use slimit::SLimit;
pub use table::{
    Column, ColumnType, SimpleTable, SuperTable, Table, TableBuilder, TableKind, TagBinding,
    TagValue, Tags,
};
pub use using::Using;
pub use window::{Interval, Window};


#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    CreateTable(CreateTable),
    Using(Using),
    Window(Window),
    Fill(Fill),
    SLimit(SLimit),
    Raw(RawClause),
}

impl Clause {
    /// Key of the slot this clause occupies in a statement.
    pub fn name(&self) -> &str {
        match self {
            Clause::CreateTable(_) => CreateTable::NAME,
            Clause::Using(_) => Using::NAME,
            Clause::Window(_) => Window::NAME,
            Clause::Fill(_) => Fill::NAME,
            Clause::SLimit(_) => SLimit::NAME,
            Clause::Raw(raw) => raw.name(),
        }
    }

    pub fn build(&self, builder: &mut dyn Builder) {
        match self {
            Clause::CreateTable(c) => c.build(builder),
            Clause::Using(c) => c.build(builder),
            Clause::Window(c) => c.build(builder),
            Clause::Fill(c) => c.build(builder),
            Clause::SLimit(c) => c.build(builder),
            Clause::Raw(c) => c.build(builder),
        }
    }

    /// Merge into `slot`, whose name has been reset to this clause's key.
    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        match self {
            Clause::CreateTable(c) => c.merge_clause(slot),
            Clause::Using(c) => c.merge_clause(slot),
            Clause::Window(c) => c.merge_clause(slot),
            Clause::Fill(c) => c.merge_clause(slot),
            Clause::SLimit(c) => c.merge_clause(slot),
            Clause::Raw(c) => c.merge_clause(slot),
        }
    }
}

macro_rules! impl_into_clause {
    ($($variant:ident),+) => {
        $(impl From<$variant> for Clause {
            fn from(c: $variant) -> Self {
                Clause::$variant(c)
            }
        })+
    };
}

impl_into_clause!(CreateTable, Using, Window, Fill, SLimit);

impl From<RawClause> for Clause {
    fn from(c: RawClause) -> Self {
        Clause::Raw(c)
    }
}

/// One clause category of a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseSlot {
    /// Keyword written before the expression. Clauses that render their
    /// own keyword clear it while merging.
    pub name: String,
    pub expression: Option<Clause>,
}

impl ClauseSlot {
    pub fn build(&self, builder: &mut dyn Builder) {
        let Some(expression) = &self.expression else {
            return;
        };
        if !self.name.is_empty() {
            builder.write_str(&self.name);
            builder.write_char(' ');
        }
        expression.build(builder);
    }
}
