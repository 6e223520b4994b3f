use std::fmt;
use std::str::FromStr;

use orion_error::prelude::*;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ClauseError, ClauseReason, ClauseResult};
use crate::quote::quote_to;
use crate::value::Value;

// ---------------------------------------------------------------------------
// ColumnType
// ---------------------------------------------------------------------------

/// Column data types of the target store, by their SQL spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Timestamp,
    Int,
    IntUnsigned,
    BigInt,
    BigIntUnsigned,
    Float,
    Double,
    Binary,
    SmallInt,
    SmallIntUnsigned,
    TinyInt,
    TinyIntUnsigned,
    Bool,
    NChar,
    Json,
    VarChar,
    VarBinary,
    /// Reserved; tables using it cannot be created yet.
    Geometry,
}

impl ColumnType {
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Int => "INT",
            ColumnType::IntUnsigned => "INT UNSIGNED",
            ColumnType::BigInt => "BIGINT",
            ColumnType::BigIntUnsigned => "BIGINT UNSIGNED",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Binary => "BINARY",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::SmallIntUnsigned => "SMALLINT UNSIGNED",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::TinyIntUnsigned => "TINYINT UNSIGNED",
            ColumnType::Bool => "BOOL",
            ColumnType::NChar => "NCHAR",
            ColumnType::Json => "JSON",
            ColumnType::VarChar => "VARCHAR",
            ColumnType::VarBinary => "VARBINARY",
            ColumnType::Geometry => "GEOMETRY",
        }
    }

    /// Whether the type is written with a `(length)` suffix.
    pub fn has_length(self) -> bool {
        matches!(
            self,
            ColumnType::NChar | ColumnType::Binary | ColumnType::VarChar | ColumnType::VarBinary
        )
    }

    pub fn is_supported(self) -> bool {
        self != ColumnType::Geometry
    }
}

const ALL_COLUMN_TYPES: [ColumnType; 18] = [
    ColumnType::Timestamp,
    ColumnType::Int,
    ColumnType::IntUnsigned,
    ColumnType::BigInt,
    ColumnType::BigIntUnsigned,
    ColumnType::Float,
    ColumnType::Double,
    ColumnType::Binary,
    ColumnType::SmallInt,
    ColumnType::SmallIntUnsigned,
    ColumnType::TinyInt,
    ColumnType::TinyIntUnsigned,
    ColumnType::Bool,
    ColumnType::NChar,
    ColumnType::Json,
    ColumnType::VarChar,
    ColumnType::VarBinary,
    ColumnType::Geometry,
];

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = ClauseError;

    /// Case-insensitive; runs of whitespace between words are collapsed.
    fn from_str(s: &str) -> ClauseResult<Self> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        ALL_COLUMN_TYPES
            .into_iter()
            .find(|t| t.as_sql() == normalized)
            .ok_or_else(|| {
                StructError::from(ClauseReason::Format)
                    .with_detail(format!("unknown column type {s:?}"))
            })
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_sql())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A data or tag column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Only meaningful for NCHAR, BINARY, VARCHAR and VARBINARY.
    #[serde(default)]
    pub length: u64,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            length: 0,
        }
    }

    pub fn with_length(name: impl Into<String>, column_type: ColumnType, length: u64) -> Self {
        Self {
            name: name.into(),
            column_type,
            length,
        }
    }

    /// Append `` `name` TYPE[(length)] `` to `out`.
    pub fn write_sql(&self, out: &mut String) {
        quote_to(out, &self.name);
        out.push(' ');
        out.push_str(self.column_type.as_sql());
        if self.column_type.has_length() {
            out.push('(');
            out.push_str(&self.length.to_string());
            out.push(')');
        }
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}

/// Comma-joined column definitions.
pub(crate) fn column_list_sql(columns: &[Column]) -> String {
    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        column.write_sql(&mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Ordered tag name → value pairs. Names and values are always iterated
/// together, so the i-th name corresponds to the i-th value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<TagValue>);

/// A repeated name keeps its first position and takes the last value, the
/// same as repeated [`Tags::insert`] calls.
impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<TagValue>::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|t| (t.name, t.value)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagValue {
    pub name: String,
    pub value: Value,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. An existing tag keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|t| t.name == name) {
            Some(tag) => tag.value = value,
            None => self.0.push(TagValue { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|t| t.name == name).map(|t| &t.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|t| (t.name.as_str(), &t.value))
    }

    /// Split into parallel name and value lists from a single pass.
    pub fn split(&self) -> (Vec<String>, Vec<Value>) {
        self.0
            .iter()
            .map(|t| (t.name.clone(), t.value.clone()))
            .unzip()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (name, value) in iter {
            tags.insert(name, value);
        }
        tags
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Which CREATE statement a table definition renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Simple,
    Super,
}

/// Binding of a simple table to its super-table.
#[derive(Debug, Clone, PartialEq)]
pub struct TagBinding {
    pub super_table: String,
    pub tags: Tags,
}

/// A concrete table, either standalone or instantiated from a super-table.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTable {
    pub name: String,
    pub if_not_exists: bool,
    pub columns: Vec<Column>,
    /// When set, the table is rendered with `USING` and `columns` is ignored.
    pub binding: Option<TagBinding>,
}

/// A schema template carrying data and tag columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SuperTable {
    pub name: String,
    pub if_not_exists: bool,
    pub columns: Vec<Column>,
    pub tag_columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Simple(SimpleTable),
    Super(SuperTable),
}

impl Table {
    /// A simple table. When `super_table` is set the table is created from
    /// it with `tags`, otherwise from `columns`.
    pub fn new_table(
        name: impl Into<String>,
        if_not_exists: bool,
        columns: Vec<Column>,
        super_table: Option<String>,
        tags: Tags,
    ) -> Self {
        Table::Simple(SimpleTable {
            name: name.into(),
            if_not_exists,
            columns,
            binding: super_table.map(|super_table| TagBinding { super_table, tags }),
        })
    }

    pub fn new_super_table(
        name: impl Into<String>,
        if_not_exists: bool,
        columns: Vec<Column>,
        tag_columns: Vec<Column>,
    ) -> Self {
        Table::Super(SuperTable {
            name: name.into(),
            if_not_exists,
            columns,
            tag_columns,
        })
    }

    pub fn builder(kind: TableKind, name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(kind, name)
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Table::Simple(_) => TableKind::Simple,
            Table::Super(_) => TableKind::Super,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Table::Simple(t) => &t.name,
            Table::Super(t) => &t.name,
        }
    }

    pub fn if_not_exists(&self) -> bool {
        match self {
            Table::Simple(t) => t.if_not_exists,
            Table::Super(t) => t.if_not_exists,
        }
    }

    /// Columns that end up in the rendered statement.
    fn emitted_columns(&self) -> Vec<&Column> {
        match self {
            Table::Simple(t) if t.binding.is_some() => Vec::new(),
            Table::Simple(t) => t.columns.iter().collect(),
            Table::Super(t) => t.columns.iter().chain(&t.tag_columns).collect(),
        }
    }

    /// Check that every emitted column has a type the store can create.
    pub fn validate(&self) -> ClauseResult<()> {
        if let Some(column) = self
            .emitted_columns()
            .into_iter()
            .find(|c| !c.column_type.is_supported())
        {
            return StructError::from(ClauseReason::Build)
                .with_detail(format!(
                    "table {:?}: column {:?} has unsupported type {}",
                    self.name(),
                    column.name,
                    column.column_type
                ))
                .err();
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TableBuilder
// ---------------------------------------------------------------------------

/// Fluent construction of a [`Table`]. Fields that do not apply to the
/// chosen kind are dropped by [`build`](TableBuilder::build).
#[derive(Debug, Clone)]
pub struct TableBuilder {
    kind: TableKind,
    name: String,
    if_not_exists: bool,
    columns: Vec<Column>,
    tag_columns: Vec<Column>,
    super_table: Option<String>,
    tags: Tags,
}

impl TableBuilder {
    pub fn new(kind: TableKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            if_not_exists: false,
            columns: Vec::new(),
            tag_columns: Vec::new(),
            super_table: None,
            tags: Tags::new(),
        }
    }

    pub fn if_not_exists(mut self, yes: bool) -> Self {
        self.if_not_exists = yes;
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn tag_column(mut self, column: Column) -> Self {
        self.tag_columns.push(column);
        self
    }

    pub fn using(mut self, super_table: impl Into<String>, tags: Tags) -> Self {
        self.super_table = Some(super_table.into());
        self.tags = tags;
        self
    }

    pub fn tag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(name, value);
        self
    }

    pub fn build(self) -> Table {
        match self.kind {
            TableKind::Simple => Table::new_table(
                self.name,
                self.if_not_exists,
                self.columns,
                self.super_table,
                self.tags,
            ),
            TableKind::Super => Table::new_super_table(
                self.name,
                self.if_not_exists,
                self.columns,
                self.tag_columns,
            ),
        }
    }
}
