//! Positional placeholder handling for command templates
//!
//! A placeholder is `$` followed by a maximal run of ASCII digits. `$0` is the
//! shell's own name and is never treated as a placeholder.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([0-9]+)").expect("valid placeholder regex"))
}

/// 1-based indexes of all placeholders in order of appearance.
///
/// An index too large for `usize` saturates to `usize::MAX`.
pub fn placeholders(template: &str) -> impl Iterator<Item = usize> + '_ {
    placeholder_re()
        .captures_iter(template)
        .map(|c| c[1].parse::<usize>().unwrap_or(usize::MAX))
        .filter(|&i| i > 0)
}

/// Highest placeholder index referenced, 0 when there is none.
pub fn highest_placeholder(template: &str) -> usize {
    placeholders(template).max().unwrap_or(0)
}

/// Replace each `$k` with `values[k-1]` verbatim.
///
/// Placeholders without a bound value are left as they are.
pub fn substitute(template: &str, values: &[String]) -> String {
    let replaced: Cow<'_, str> = placeholder_re().replace_all(template, |caps: &Captures| {
        caps[1]
            .parse::<usize>()
            .ok()
            .filter(|&i| i > 0)
            .and_then(|i| values.get(i - 1))
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });
    replaced.into_owned()
}
