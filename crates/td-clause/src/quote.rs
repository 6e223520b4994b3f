//! Backtick identifier quoting.
//!
//! Every dot-separated segment is wrapped in backticks and embedded
//! backticks are doubled. Input that is already quoted passes through
//! unchanged, so quoting is idempotent. The empty identifier is written
//! as a pair of backticks.

/// Quote `name` into a fresh string.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    quote_to(&mut out, name);
    out
}

/// Append the quoted form of `name` to `out`.
pub fn quote_to(out: &mut String, name: &str) {
    if name.is_empty() || name == "``" {
        out.push_str("``");
        return;
    }
    let mut under_quoted = false;
    let mut self_quoted = false;
    // Pending backticks not yet written.
    let mut backticks: i64 = 0;
    // Characters seen since the last segment boundary.
    let mut shift: i64 = 0;

    for c in name.chars() {
        match c {
            '`' => {
                backticks += 1;
                if backticks == 2 {
                    out.push_str("``");
                    backticks = 0;
                }
            }
            '.' => {
                if backticks > 0 || !self_quoted {
                    shift = 0;
                    under_quoted = false;
                    backticks = 0;
                    out.push('`');
                }
                out.push('.');
                continue;
            }
            _ => {
                if shift - backticks <= 0 && !under_quoted {
                    out.push('`');
                    under_quoted = true;
                    self_quoted = backticks > 0;
                    if self_quoted {
                        backticks -= 1;
                    }
                }
                while backticks > 0 {
                    out.push_str("``");
                    backticks -= 1;
                }
                out.push(c);
            }
        }
        shift += 1;
    }

    if backticks > 0 && !self_quoted {
        out.push_str("``");
    }
    out.push('`');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        assert_eq!(quote("abc"), "`abc`");
    }

    #[test]
    fn doubled_backtick_kept() {
        assert_eq!(quote("ab``c"), "`ab``c`");
    }

    #[test]
    fn inner_backtick_doubled() {
        assert_eq!(quote("ab`c"), "`ab``c`");
    }

    #[test]
    fn trailing_backtick_doubled() {
        assert_eq!(quote("abc`"), "`abc```");
    }

    #[test]
    fn leading_backtick_is_opening_quote() {
        assert_eq!(quote("`abc"), "`abc`");
    }

    #[test]
    fn already_quoted() {
        assert_eq!(quote("`abc`"), "`abc`");
    }

    #[test]
    fn dotted_segments() {
        assert_eq!(quote("a.b"), "`a`.`b`");
        assert_eq!(quote("ab.c"), "`ab`.`c`");
        assert_eq!(quote("`ab`.`c`"), "`ab`.`c`");
    }

    #[test]
    fn quoting_is_a_fixed_point() {
        for name in ["abc", "ab`c", "ab.c", "db.t_1", "`x`", "st_1", "a``b", ""] {
            let once = quote(name);
            assert_eq!(quote(&once), once, "{name}");
        }
    }

    #[test]
    fn empty_name() {
        assert_eq!(quote(""), "``");
        assert_eq!(quote("``"), "``");
    }

    #[test]
    fn long_names() {
        let name = "c".repeat(300);
        assert_eq!(quote(&name), format!("`{name}`"));
    }

    #[test]
    fn quote_to_appends() {
        let mut out = String::from("FROM ");
        quote_to(&mut out, "t_1");
        assert_eq!(out, "FROM `t_1`");
    }
}
