//! Integration smoke tests for `transcript_analytics`

use transcript_analytics::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn version_matches_manifest() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}
