use crate::duration::Duration;
use crate::sink::Builder;

use super::{Clause, ClauseSlot};

/// Parameters of an `INTERVAL` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub interval: Duration,
    pub offset: Option<Duration>,
    pub sliding: Option<Duration>,
}

/// Time-bucketing directive of an aggregation query.
///
/// Setters take and return the value, so a shared window is never
/// changed behind another holder's back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window {
    Interval(Interval),
    State { column: String },
    Session { column: String, gap: Duration },
}

impl Window {
    pub const NAME: &'static str = "WINDOW";

    pub fn interval(interval: Duration) -> Self {
        Window::Interval(Interval {
            interval,
            offset: None,
            sliding: None,
        })
    }

    pub fn state(column: impl Into<String>) -> Self {
        Window::State {
            column: column.into(),
        }
    }

    pub fn session(column: impl Into<String>, gap: Duration) -> Self {
        Window::Session {
            column: column.into(),
            gap,
        }
    }

    /// Set the `INTERVAL` offset. Other window kinds are returned unchanged.
    pub fn with_offset(self, offset: Duration) -> Self {
        match self {
            Window::Interval(iv) => Window::Interval(Interval {
                offset: Some(offset),
                ..iv
            }),
            other => {
                td_debug!(emit, kind = other.kind(), "offset ignored for window kind");
                other
            }
        }
    }

    /// Set the `SLIDING` step. Other window kinds are returned unchanged.
    pub fn with_sliding(self, sliding: Duration) -> Self {
        match self {
            Window::Interval(iv) => Window::Interval(Interval {
                sliding: Some(sliding),
                ..iv
            }),
            other => {
                td_debug!(emit, kind = other.kind(), "sliding ignored for window kind");
                other
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Window::Interval(_) => "interval",
            Window::State { .. } => "state",
            Window::Session { .. } => "session",
        }
    }

    pub fn build(&self, builder: &mut dyn Builder) {
        match self {
            Window::Interval(iv) => {
                builder.write_str("INTERVAL(");
                builder.write_str(&iv.interval.to_string());
                if let Some(offset) = iv.offset {
                    builder.write_char(',');
                    builder.write_str(&offset.to_string());
                }
                builder.write_char(')');
                if let Some(sliding) = iv.sliding {
                    builder.write_str(" SLIDING(");
                    builder.write_str(&sliding.to_string());
                    builder.write_char(')');
                }
            }
            Window::State { column } => {
                builder.write_str("STATE_WINDOW(");
                builder.write_quoted(column);
                builder.write_char(')');
            }
            Window::Session { column, gap } => {
                builder.write_str("SESSION(");
                builder.write_quoted(column);
                builder.write_char(',');
                builder.write_str(&gap.to_string());
                builder.write_char(')');
            }
        }
    }

    pub fn merge_clause(self, slot: &mut ClauseSlot) {
        slot.name.clear();
        slot.expression = Some(Clause::Window(self));
    }
}
