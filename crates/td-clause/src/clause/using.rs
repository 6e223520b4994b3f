use crate::sink::{Builder, Var};
use crate::value::Value;

use super::table::Tags;
use super::{Clause, ClauseSlot};

/// `USING <stable>(?,…) TAGS(?,…)` for auto-creating a sub-table on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Using {
    super_table: String,
    tags: Tags,
}

impl Using {
    pub const NAME: &'static str = "USING";

    pub fn new(super_table: impl Into<String>, tags: Tags) -> Self {
        Self {
            super_table: super_table.into(),
            tags,
        }
    }

    /// Return a copy with `name` set to `value`; `self` is left untouched.
    pub fn add_tag(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.tags.insert(name, value);
        next
    }

    pub fn super_table(&self) -> &str {
        &self.super_table
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn build(&self, builder: &mut dyn Builder) {
        builder.write_str("USING ");
        builder.write_quoted(&self.super_table);
        let (names, values) = self.tags.split();
        builder.add_var(Var::list(names));
        builder.write_str(" TAGS");
        builder.add_var(Var::List(values));
    }

    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        slot.name.clear();
        slot.expression = Some(Clause::Using(self));
    }
}
