//! Clause model and merge/emit engine for TDengine SQL fragments.
//!
//! Clauses render into a [`Builder`] sink; a [`Statement`] stores them in
//! named slots and applies the per-kind merge rule when a clause of the
//! same name is added twice.

#[macro_use]
mod log_macros;

pub mod clause;
pub mod dialect;
pub mod duration;
pub mod error;
pub mod quote;
pub mod sink;
pub mod statement;
pub mod value;

pub use clause::{
    Clause, ClauseSlot, Column, ColumnType, CreateTable, Fill, Interval, RawClause, SLimit,
    Table, TableBuilder, TableKind, Tags, Using, Window,
};
pub use dialect::{Dialect, FieldKind};
pub use duration::{Duration, TimeUnit};
pub use error::{ClauseError, ClauseReason, ClauseResult};
pub use quote::{quote, quote_to};
pub use sink::{Builder, Fragment, SqlBuffer, Var};
pub use statement::Statement;
pub use value::{Value, explain};
