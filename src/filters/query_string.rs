//! Shareable query-string codec for `FilterState`
//!
//! Format, in parameter order:
//!
//! | Param     | Meaning                         | Present when          |
//! |-----------|---------------------------------|-----------------------|
//! | `q`       | free-text query                 | non-empty             |
//! | `include` | comma-joined tag ids            | set non-empty         |
//! | `exclude` | comma-joined tag ids            | set non-empty         |
//! | `safety`  | comma-joined tag ids            | set non-empty         |
//! | `ku`      | `1`                             | Kindle Unlimited only |
//! | `gems`    | `1`                             | hidden gems only      |
//! | `sort`    | sort key                        | not `newest`          |
//!
//! Values are form-urlencoded, so commas travel as `%2C` and spaces as `+`.
//! Tag ids must not contain a comma: the list format cannot carry one, so
//! such ids are left out when serializing.
//! Parsing is total: absent, repeated-empty, or unknown values fall back to
//! defaults and unknown parameters are ignored. For a repeated parameter the
//! first occurrence wins.

use super::types::{FilterState, SortKey};
use std::collections::{BTreeSet, HashSet};
use url::{Url, form_urlencoded};

pub const PARAM_QUERY: &str = "q";
pub const PARAM_INCLUDE: &str = "include";
pub const PARAM_EXCLUDE: &str = "exclude";
pub const PARAM_SAFETY: &str = "safety";
pub const PARAM_KINDLE_UNLIMITED: &str = "ku";
pub const PARAM_HIDDEN_GEMS: &str = "gems";
pub const PARAM_SORT: &str = "sort";

/// Render the state as a query string (without the leading `?`)
#[must_use]
pub fn serialize(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if !state.query.is_empty() {
        out.append_pair(PARAM_QUERY, &state.query);
    }
    for (param, ids) in [
        (PARAM_INCLUDE, &state.include),
        (PARAM_EXCLUDE, &state.exclude),
        (PARAM_SAFETY, &state.safety),
    ] {
        let joined = join_ids(ids);
        if !joined.is_empty() {
            out.append_pair(param, &joined);
        }
    }
    if state.kindle_unlimited {
        out.append_pair(PARAM_KINDLE_UNLIMITED, "1");
    }
    if state.hidden_gems_only {
        out.append_pair(PARAM_HIDDEN_GEMS, "1");
    }
    if !state.sort.is_default() {
        out.append_pair(PARAM_SORT, state.sort.as_str());
    }

    out.finish()
}

/// Rebuild a state from a query string; a leading `?` is accepted
#[must_use]
pub fn parse(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    let mut seen = HashSet::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !seen.insert(key.clone()) {
            continue;
        }
        match key.as_ref() {
            PARAM_QUERY => state.query = value.into_owned(),
            PARAM_INCLUDE => state.include = split_ids(&value),
            PARAM_EXCLUDE => state.exclude = split_ids(&value),
            PARAM_SAFETY => state.safety = split_ids(&value),
            PARAM_KINDLE_UNLIMITED => state.kindle_unlimited = value == "1",
            PARAM_HIDDEN_GEMS => state.hidden_gems_only = value == "1",
            PARAM_SORT => state.sort = value.parse::<SortKey>().unwrap_or_default(),
            _ => {}
        }
    }

    state
}

/// Pull the query component out of whatever the user pasted
///
/// Accepts a full URL (`https://host/vault?include=...`), a bare query string
/// with or without `?`, or nothing at all.
#[must_use]
pub fn query_from_input(input: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => input.strip_prefix('?').unwrap_or(input).to_string(),
    }
}

fn join_ids(ids: &BTreeSet<String>) -> String {
    ids.iter()
        .map(String::as_str)
        .filter(|id| !id.contains(','))
        .collect::<Vec<_>>()
        .join(",")
}

fn split_ids(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
