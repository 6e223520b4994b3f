use crate::sink::Builder;

use super::{Clause, ClauseSlot};

/// `FILL` policy for window buckets without data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    None,
    Value(f64),
    Prev,
    Null,
    Linear,
    Next,
}

impl Fill {
    pub const NAME: &'static str = "FILL";

    pub fn mode(&self) -> &'static str {
        match self {
            Fill::None => "NONE",
            Fill::Value(_) => "VALUE",
            Fill::Prev => "PREV",
            Fill::Null => "NULL",
            Fill::Linear => "LINEAR",
            Fill::Next => "NEXT",
        }
    }

    /// `(MODE)` or `(VALUE,<v>)`; the value uses the shortest decimal
    /// form that reads back to the same float.
    pub fn build(&self, builder: &mut dyn Builder) {
        builder.write_char('(');
        builder.write_str(self.mode());
        if let Fill::Value(v) = self {
            builder.write_char(',');
            builder.write_str(&v.to_string());
        }
        builder.write_char(')');
    }

    /// Replaces the previous policy; the slot keeps its `FILL` keyword.
    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        slot.expression = Some(Clause::Fill(self));
    }
}
