use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal bound to a positional `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[serde(skip_deserializing)]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Render the value as an inline SQL literal (single quotes, `'`
    /// doubled inside strings).
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s.replace('\'', "''")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $target:ty, $($src:ty),+) => {
        $(impl From<$src> for Value {
            fn from(v: $src) -> Self {
                Value::$variant(<$target>::from(v))
            }
        })+
    };
}

impl_from!(Int, i64, i8, i16, i32, i64);
impl_from!(UInt, u64, u8, u16, u32, u64);
impl_from!(Float, f64, f32, f64);
impl_from!(Bool, bool, bool);
impl_from!(Str, String, String, &str);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Substitute each `?` placeholder in `sql` with the matching inline
/// literal from `vars`. Placeholders beyond the supplied values are kept.
pub fn explain(sql: &str, vars: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut vars = vars.iter();
    for c in sql.chars() {
        if c != '?' {
            out.push(c);
            continue;
        }
        match vars.next() {
            Some(v) => out.push_str(&v.to_sql_literal()),
            None => out.push('?'),
        }
    }
    out
}
