use poodle_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/home/user/poodle");
    let joined = base.join("definitions/github.toml");
    assert_eq!(joined.as_str(), "/home/user/poodle/definitions/github.toml");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("team/billing.toml");
    assert_eq!(path.file_name(), Some("billing.toml"));
    assert_eq!(path.extension(), Some("toml"));
}

#[test]
fn test_strip_prefix() {
    let base = NormalizedPath::new("/srv/definitions/");
    let file = NormalizedPath::new("/srv/definitions/team/billing.toml");
    assert_eq!(file.strip_prefix(&base).unwrap().as_str(), "team/billing.toml");
}

#[test]
fn test_strip_prefix_requires_component_boundary() {
    let base = NormalizedPath::new("/srv/def");
    let file = NormalizedPath::new("/srv/definitions/a.toml");
    assert!(file.strip_prefix(&base).is_none());
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}

#[rstest]
// Basic traversal
#[case("a/../b", "b")]
// Traversal at the beginning of a relative path is dropped
#[case("../a", "a")]
#[case("../../a/b", "a/b")]
// Traversal on absolute path
#[case("/a/b/../../c", "/c")]
// Mixed separators
#[case("a\\..\\b", "b")]
// Empty and dot components
#[case("a/./b//c", "a/b/c")]
fn test_path_traversal_sanitization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[rstest]
#[case("github.toml", true)]
#[case("team/github.toml", true)]
#[case("/etc/passwd", false)]
#[case("C:/Windows/win.ini", false)]
#[case("..", false)]
#[case("", false)]
fn test_is_safe_relative(#[case] input: &str, #[case] safe: bool) {
    assert_eq!(NormalizedPath::new(input).is_safe_relative(), safe);
}
