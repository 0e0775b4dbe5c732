//! Path string handling for replay destinations
//!
//! Source item paths arrive as server strings (`$/Project/src/a.txt`) and are
//! turned into platform paths here, before any filesystem access.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Number of leading `..` steps at which a relative display path is
/// abandoned in favor of the absolute one.
const MAX_PARENT_STEPS: usize = 3;

/// Replace both `/` and `\` with the platform separator.
pub fn to_platform_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Strip any leading separators (either style).
pub fn trim_leading_separators(path: &str) -> &str {
    path.trim_start_matches(['/', '\\'])
}

/// Render `target` relative to the directory `base` for operator output.
///
/// Falls back to the full `target` path when the two share no root, or when
/// the relative form would climb three or more directories.
pub fn relative_display(base: &Path, target: &Path) -> String {
    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let shares_root = matches!(
        (base_parts.first(), target_parts.first()),
        (Some(a), Some(b)) if a == b
    );
    if !shares_root {
        return target.display().to_string();
    }

    let parent_steps = base_parts.len() - common;
    if parent_steps >= MAX_PARENT_STEPS {
        return target.display().to_string();
    }

    let mut relative = PathBuf::new();
    for _ in 0..parent_steps {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        ".".to_string()
    } else {
        relative.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_become_native() {
        let expected: String = ["a", "b", "c.txt"].join(&MAIN_SEPARATOR.to_string());
        assert_eq!(to_platform_separators("a/b\\c.txt"), expected);
    }

    #[test]
    fn leading_separators_of_both_styles_are_trimmed() {
        assert_eq!(trim_leading_separators("\\/\\src/a"), "src/a");
        assert_eq!(trim_leading_separators("src"), "src");
    }
}
