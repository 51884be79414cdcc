//! Module name parsing.
//!
//! Bundlers name modules after the request that produced them, which can carry
//! a loader chain (`babel-loader!./src/a.js`) and, for concatenated modules, a
//! suffix such as ` + 3 modules`. These helpers reduce a name to the file path
//! it refers to and find the `node_modules` package that owns that path.

use regex::Regex;
use std::sync::LazyLock;

static AGGREGATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \+.+$").expect("aggregation suffix pattern is valid"));

/// Everything up to and including the innermost `node_modules/<pkg>` or
/// `node_modules/@scope/<pkg>` segment.
static PACKAGE_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*node_modules/(?:@[^/]+/)?[^/]+)").expect("package root pattern is valid")
});

/// Strip the loader chain and aggregation suffix from a module name.
pub fn normalize_module_path(name: &str) -> String {
    let last = name.rsplit('!').next().unwrap_or(name);
    AGGREGATION_SUFFIX.replace(last, "").into_owned()
}

/// The package key owning `filepath`, if it lives under `node_modules`.
pub fn package_root(filepath: &str) -> Option<&str> {
    PACKAGE_ROOT.captures(filepath).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn is_dependency_path(filepath: &str) -> bool {
    PACKAGE_ROOT.is_match(filepath)
}
