//! Placeholder extraction from route file paths.
//!
//! `[name]` marks a single-value segment and `[...name]` a rest segment. The
//! whole path is scanned, so placeholders in parent directories count too.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

static SINGLE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_]+)\]").expect("single param pattern is valid"));

static SPREAD_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\.\.\.([A-Za-z0-9_]+)\]").expect("spread param pattern is valid")
});

/// Parameter names encoded in a route path, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSet {
    pub single: IndexSet<String>,
    pub spread: IndexSet<String>,
}

impl PlaceholderSet {
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.spread.is_empty()
    }
}

pub fn extract(path: &str) -> PlaceholderSet {
    PlaceholderSet {
        single: captures(&SINGLE_PARAM, path),
        spread: captures(&SPREAD_PARAM, path),
    }
}

fn captures(pattern: &Regex, path: &str) -> IndexSet<String> {
    pattern
        .captures_iter(path)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}
