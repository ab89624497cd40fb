//! Best-effort extraction of a numeric version token.

use std::sync::LazyLock;

use regex::Regex;

/// First `major[.minor[.patch]]` run of digits that is not glued to other digits.
///
/// Components are capped at 16 digits; a longer run never matches.
static COERCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{1,16})(?:\.([0-9]{1,16}))?(?:\.([0-9]{1,16}))?(?:$|[^0-9])")
        .expect("COERCE_REGEX must compile")
});

/// Scan `text` for the first recognizable version token and return its major.
///
/// Pre-release and build suffixes are ignored because only the leading
/// numeric components take part in the match.
///
/// ```
/// use check_node_types::version::coerce_major;
///
/// assert_eq!(coerce_major("^22.1.0"), Some(22));
/// assert_eq!(coerce_major("node v20.11.0-rc.1"), Some(20));
/// assert_eq!(coerce_major("lts/iron"), None);
/// ```
pub fn coerce_major(text: &str) -> Option<u64> {
    let captures = COERCE_REGEX.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}
