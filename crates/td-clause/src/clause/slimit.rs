use crate::sink::Builder;

use super::{Clause, ClauseSlot};

/// `SLIMIT` / `SOFFSET` over the partitions of a super-table query.
///
/// Zero means "not set". Across merges a negative `offset` is a request to
/// clear the inherited offset, while a negative `limit` is only suppressed
/// at emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SLimit {
    pub limit: i64,
    pub offset: i64,
}

impl SLimit {
    pub const NAME: &'static str = "SLIMIT";

    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    pub fn build(&self, builder: &mut dyn Builder) {
        if self.limit > 0 {
            builder.write_str("SLIMIT ");
            builder.write_str(&self.limit.to_string());
        }
        if self.offset > 0 {
            if self.limit > 0 {
                builder.write_char(' ');
            }
            builder.write_str("SOFFSET ");
            builder.write_str(&self.offset.to_string());
        }
    }

    /// Fold `self` over the SLIMIT already in `slot`, field by field.
    pub fn merge_clause(mut self, slot: &mut ClauseSlot) {
        slot.name.clear();
        if let Some(Clause::SLimit(prev)) = &slot.expression {
            if self.limit == 0 && prev.limit != 0 {
                self.limit = prev.limit;
            }
            if self.offset == 0 && prev.offset > 0 {
                self.offset = prev.offset;
            } else if self.offset < 0 {
                self.offset = 0;
            }
        }
        td_debug!(
            merge,
            limit = self.limit,
            offset = self.offset,
            "SLIMIT merged"
        );
        slot.expression = Some(Clause::SLimit(self));
    }
}
