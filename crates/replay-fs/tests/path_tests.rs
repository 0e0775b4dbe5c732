use pretty_assertions::assert_eq;
use replay_fs::{relative_display, to_platform_separators, trim_leading_separators};
use rstest::rstest;
use std::path::{MAIN_SEPARATOR, PathBuf};

fn native(parts: &[&str]) -> String {
    parts.join(&MAIN_SEPARATOR.to_string())
}

#[rstest]
#[case("foo/bar/baz", &["foo", "bar", "baz"])]
#[case("foo\\bar\\baz", &["foo", "bar", "baz"])]
#[case("foo/bar\\baz", &["foo", "bar", "baz"])]
fn test_separators_normalized(#[case] input: &str, #[case] parts: &[&str]) {
    assert_eq!(to_platform_separators(input), native(parts));
}

#[test]
fn test_trim_leading_separators_keeps_inner() {
    assert_eq!(trim_leading_separators("//a/b"), "a/b");
    assert_eq!(trim_leading_separators(""), "");
}

fn root() -> PathBuf {
    std::env::temp_dir()
}

#[test]
fn test_relative_display_child() {
    let base = root().join("work");
    let target = base.join("dest").join("a.txt");
    assert_eq!(relative_display(&base, &target), native(&["dest", "a.txt"]));
}

#[test]
fn test_relative_display_sibling() {
    let base = root().join("work").join("bin");
    let target = root().join("work").join("dest").join("a.txt");
    assert_eq!(relative_display(&base, &target), native(&["..", "dest", "a.txt"]));
}

#[test]
fn test_relative_display_two_levels_up_still_relative() {
    let base = root().join("w").join("x").join("y");
    let target = root().join("w").join("a.txt");
    assert_eq!(relative_display(&base, &target), native(&["..", "..", "a.txt"]));
}

#[test]
fn test_relative_display_three_levels_up_falls_back_to_absolute() {
    let base = root().join("w").join("x").join("y").join("z");
    let target = root().join("w").join("a.txt");
    assert_eq!(relative_display(&base, &target), target.display().to_string());
}

#[test]
fn test_relative_display_same_path() {
    let base = root().join("w");
    assert_eq!(relative_display(&base, &base), ".");
}
