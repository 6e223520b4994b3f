use crate::sink::{Builder, Var};

use super::table::{SimpleTable, Table, column_list_sql};
use super::{Clause, ClauseSlot};

/// `CREATE TABLE` / `CREATE STABLE` for one or more tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    tables: Vec<Table>,
}

impl CreateTable {
    pub const NAME: &'static str = "CREATE TABLE";

    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn add_tables(mut self, tables: impl IntoIterator<Item = Table>) -> Self {
        self.tables.extend(tables);
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Render every table in order. A table that fails validation records a
    /// build error and stops the clause; text of earlier tables is kept.
    pub fn build(&self, builder: &mut dyn Builder) {
        for (i, table) in self.tables.iter().enumerate() {
            if let Err(err) = table.validate() {
                td_warn!(emit, table = table.name(), error = %err, "CREATE TABLE aborted");
                builder.add_error(err);
                return;
            }
            if i > 0 {
                builder.write_char(' ');
            }
            build_table(table, builder);
        }
    }

    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        slot.name.clear();
        slot.expression = Some(Clause::CreateTable(self));
    }
}

fn build_table(table: &Table, builder: &mut dyn Builder) {
    match table {
        Table::Simple(_) => builder.write_str("CREATE TABLE "),
        Table::Super(_) => builder.write_str("CREATE STABLE "),
    }
    if table.if_not_exists() {
        builder.write_str("IF NOT EXISTS ");
    }
    builder.write_quoted(table.name());

    match table {
        Table::Simple(SimpleTable {
            binding: Some(binding),
            ..
        }) => {
            builder.write_str(" USING ");
            builder.write_quoted(&binding.super_table);
            let (names, values) = binding.tags.split();
            builder.write_char('(');
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    builder.write_char(',');
                }
                builder.write_quoted(name);
            }
            builder.write_str(") TAGS ");
            builder.add_var(Var::List(values));
        }
        Table::Simple(t) => {
            builder.write_str(" (");
            builder.write_str(&column_list_sql(&t.columns));
            builder.write_char(')');
        }
        Table::Super(t) => {
            builder.write_str(" (");
            builder.write_str(&column_list_sql(&t.columns));
            builder.write_char(')');
            builder.write_str(" TAGS(");
            builder.write_str(&column_list_sql(&t.tag_columns));
            builder.write_char(')');
        }
    }
}
