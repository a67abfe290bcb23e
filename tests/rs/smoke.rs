//! Integration smoke tests for `course_sat`

use course_sat::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}
