use std::fmt;
use std::str::FromStr;

use orion_error::prelude::*;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, take_while};

use crate::error::{ClauseReason, ClauseResult};


// ---------------------------------------------------------------------------
// TimeUnit
// ---------------------------------------------------------------------------

/// Time units accepted by window clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    /// Calendar month; its length depends on the bucket start.
    NaturalMonth,
    /// Calendar year.
    NaturalYear,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 9] = [
        TimeUnit::Microsecond,
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::NaturalMonth,
        TimeUnit::NaturalYear,
    ];

    /// Canonical token written after the value. Milliseconds are written as
    /// `a`; `ms` is accepted on input only.
    pub fn token(self) -> &'static str {
        match self {
            TimeUnit::Microsecond => "u",
            TimeUnit::Millisecond => "a",
            TimeUnit::Second => "s",
            TimeUnit::Minute => "m",
            TimeUnit::Hour => "h",
            TimeUnit::Day => "d",
            TimeUnit::Week => "w",
            TimeUnit::NaturalMonth => "n",
            TimeUnit::NaturalYear => "y",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ---------------------------------------------------------------------------
// Duration
// ---------------------------------------------------------------------------

/// A non-negative time span in one of the [`TimeUnit`]s, written as
/// `<value><unit>` with no separator (`10m`, `300000000u`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    pub value: u64,
    pub unit: TimeUnit,
}

impl Duration {
    pub const fn new(value: u64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub const fn micros(value: u64) -> Self {
        Self::new(value, TimeUnit::Microsecond)
    }

    pub const fn millis(value: u64) -> Self {
        Self::new(value, TimeUnit::Millisecond)
    }

    pub const fn seconds(value: u64) -> Self {
        Self::new(value, TimeUnit::Second)
    }

    pub const fn minutes(value: u64) -> Self {
        Self::new(value, TimeUnit::Minute)
    }

    pub const fn hours(value: u64) -> Self {
        Self::new(value, TimeUnit::Hour)
    }

    pub const fn days(value: u64) -> Self {
        Self::new(value, TimeUnit::Day)
    }

    pub const fn weeks(value: u64) -> Self {
        Self::new(value, TimeUnit::Week)
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Parse a duration token such as `"5m"` or `"250ms"`.
    ///
    /// The whole input must be consumed: a bare number, an unknown unit or
    /// trailing characters are rejected with [`ClauseReason::Format`].
    pub fn parse(token: &str) -> ClauseResult<Self> {
        duration_token.parse(token).map_err(|e| {
            StructError::from(ClauseReason::Format)
                .with_detail(format!("invalid duration {token:?}: {e}"))
        })
    }

    /// Convert a signed time span into a microsecond duration. Negative
    /// spans are rejected; zero is accepted.
    pub fn from_time_delta(delta: chrono::TimeDelta) -> ClauseResult<Self> {
        let micros = match delta.num_microseconds() {
            Some(us) => us,
            None => {
                return StructError::from(ClauseReason::Format)
                    .with_detail(format!("duration {delta} overflows microseconds"))
                    .err();
            }
        };
        if micros < 0 {
            return StructError::from(ClauseReason::Format)
                .with_detail(format!("negative duration {delta}"))
                .err();
        }
        Ok(Self::micros(micros as u64))
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self::micros(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
    }
}

impl TryFrom<chrono::TimeDelta> for Duration {
    type Error = crate::error::ClauseError;

    fn try_from(delta: chrono::TimeDelta) -> ClauseResult<Self> {
        Self::from_time_delta(delta)
    }
}

impl FromStr for Duration {
    type Err = crate::error::ClauseError;

    fn from_str(s: &str) -> ClauseResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.token())
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Duration::parse(&s).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

pub(crate) fn duration_token(input: &mut &str) -> ModalResult<Duration> {
    let digits = take_while(1.., |c: char| c.is_ascii_digit())
        .context(StrContext::Expected(StrContextValue::Description(
            "duration value",
        )))
        .parse_next(input)?;
    let value: u64 = digits
        .parse()
        .map_err(|_| ErrMode::Cut(ContextError::new()))?;
    let unit = time_unit.parse_next(input)?;
    Ok(Duration { value, unit })
}

fn time_unit(input: &mut &str) -> ModalResult<TimeUnit> {
    // `ms` must be tried before `m`.
    alt((
        literal("ms").value(TimeUnit::Millisecond),
        literal("u").value(TimeUnit::Microsecond),
        literal("a").value(TimeUnit::Millisecond),
        literal("s").value(TimeUnit::Second),
        literal("m").value(TimeUnit::Minute),
        literal("h").value(TimeUnit::Hour),
        literal("d").value(TimeUnit::Day),
        literal("w").value(TimeUnit::Week),
        literal("n").value(TimeUnit::NaturalMonth),
        literal("y").value(TimeUnit::NaturalYear),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "time unit (u|a|ms|s|m|h|d|w|n|y)",
    )))
    .parse_next(input)
}
