mod key;
pub(crate) mod span_wrappers;
mod tree_scan;

pub(crate) use key::{Key, KeyPrefix, PrefixKind};
pub(crate) use tree_scan::TreeScan;
