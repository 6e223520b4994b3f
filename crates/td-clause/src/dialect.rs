//! Clause ordering and type mapping of the TDengine dialect.

use orion_error::prelude::*;

use crate::clause::{Column, ColumnType};
use crate::error::{ClauseReason, ClauseResult};
use crate::statement::Statement;

pub const QUERY_CLAUSES: [&str; 9] = [
    "SELECT", "FROM", "WHERE", "WINDOW", "FILL", "GROUP BY", "ORDER BY", "SLIMIT", "LIMIT",
];

pub const CREATE_CLAUSES: [&str; 6] = [
    "CREATE TABLE",
    "INSERT",
    "USING",
    "VALUES",
    "ON CONFLICT",
    "RETURNING",
];

/// Default string/bytes length when a host field has no size.
const DEFAULT_VAR_LENGTH: u64 = 64;

/// Host-side field kinds mapped onto column types by [`Dialect::column_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int { bits: u16 },
    Uint { bits: u16 },
    Float { bits: u16 },
    /// Text; `size == 0` picks the default length.
    String { size: u64 },
    Time,
    Bytes { size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub query_clauses: Vec<String>,
    pub create_clauses: Vec<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            query_clauses: QUERY_CLAUSES.iter().map(|s| s.to_string()).collect(),
            create_clauses: CREATE_CLAUSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Dialect {
    pub const NAME: &'static str = "tdengine";

    /// Placeholder written for every bound value.
    pub const BIND_VAR: char = '?';

    /// INSERT and VALUES are dropped when the statement creates tables.
    pub fn is_suppressed(&self, clause: &str, stmt: &Statement) -> bool {
        matches!(clause, "INSERT" | "VALUES") && stmt.has_create_table()
    }

    pub fn data_type_of(&self, field: FieldKind) -> (ColumnType, u64) {
        let sized = |size: u64| if size == 0 { DEFAULT_VAR_LENGTH } else { size };
        match field {
            FieldKind::Bool => (ColumnType::Bool, 0),
            FieldKind::Int { bits } => (int_type(bits, false), 0),
            FieldKind::Uint { bits } => (int_type(bits, true), 0),
            FieldKind::Float { bits } if bits <= 32 => (ColumnType::Float, 0),
            FieldKind::Float { .. } => (ColumnType::Double, 0),
            FieldKind::String { size } => (ColumnType::NChar, sized(size)),
            FieldKind::Time => (ColumnType::Timestamp, 0),
            FieldKind::Bytes { size } => (ColumnType::Binary, sized(size)),
        }
    }

    pub fn column_for(&self, name: impl Into<String>, field: FieldKind) -> Column {
        let (column_type, length) = self.data_type_of(field);
        Column::with_length(name, column_type, length)
    }

    /// The store has no transactions.
    pub fn savepoint(&self, name: &str) -> ClauseResult<()> {
        StructError::from(ClauseReason::Unsupported)
            .with_detail(format!("savepoint {name:?}: transactions are not supported"))
            .err()
    }

    pub fn rollback_to(&self, name: &str) -> ClauseResult<()> {
        StructError::from(ClauseReason::Unsupported)
            .with_detail(format!("rollback to {name:?}: transactions are not supported"))
            .err()
    }
}

fn int_type(bits: u16, unsigned: bool) -> ColumnType {
    match (bits, unsigned) {
        (0..=8, false) => ColumnType::TinyInt,
        (0..=8, true) => ColumnType::TinyIntUnsigned,
        (9..=16, false) => ColumnType::SmallInt,
        (9..=16, true) => ColumnType::SmallIntUnsigned,
        (17..=32, false) => ColumnType::Int,
        (17..=32, true) => ColumnType::IntUnsigned,
        (_, false) => ColumnType::BigInt,
        (_, true) => ColumnType::BigIntUnsigned,
    }
}
