/// Domain-aware logging macros.
///
/// Each macro injects a `domain` field so every event emitted by the clause
/// engine can be filtered by area: `merge` (clause slot merges), `emit`
/// (fragment emission and build errors), `conf` and `sys`.
///
/// ```ignore
/// td_debug!(merge, clause = "SLIMIT", limit = 10, "clause merged");
/// td_warn!(emit, table = %name, "table dropped from statement");
/// ```

/// Internal helper.  Do not call directly; use `td_error!` … `td_trace!`.
#[doc(hidden)]
macro_rules! td_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

#[allow(unused_macros)]
macro_rules! td_error {
    ($domain:ident, $($rest:tt)*) => {
        td_log!(error, $domain, $($rest)*)
    };
}

macro_rules! td_warn {
    ($domain:ident, $($rest:tt)*) => {
        td_log!(warn, $domain, $($rest)*)
    };
}

#[allow(unused_macros)]
macro_rules! td_info {
    ($domain:ident, $($rest:tt)*) => {
        td_log!(info, $domain, $($rest)*)
    };
}

macro_rules! td_debug {
    ($domain:ident, $($rest:tt)*) => {
        td_log!(debug, $domain, $($rest)*)
    };
}

#[allow(unused_macros)]
macro_rules! td_trace {
    ($domain:ident, $($rest:tt)*) => {
        td_log!(trace, $domain, $($rest)*)
    };
}
