pub(crate) mod metrics;
pub(crate) mod trace_root;

use once_cell::sync::Lazy;
use regex::Regex;

static OBJECT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[0-9a-fA-F]{24}(/|$)").expect("Invalid object id regex")
});

/// Collapses todo ids in a request path so metrics and spans group by route.
pub(crate) fn normalize_uri(path: &str) -> String {
    OBJECT_ID_REGEX.replace_all(path, "/{id}$1").to_string()
}
