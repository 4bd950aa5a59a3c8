//! Cache Key Generation
//!
//! Builds deterministic string keys from a name prefix and request parameters.

// == Generate Key ==
/// Builds a cache key of the form `prefix:name1=value1&name2=value2`.
///
/// Parameter names are sorted lexicographically before joining, so two call
/// sites that assemble the same parameters in a different order produce the
/// same key. Pure function: same input always yields the same string.
///
/// # Arguments
/// * `prefix` - Logical name of the cache role (e.g. "air-quality")
/// * `params` - Parameter name/value pairs in any order
pub fn generate_key(prefix: &str, params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by_key(|(name, _)| *name);

    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}:{}", prefix, joined)
}
