//! Filename sanitization for generated documents.
//!
//! Output filenames are a pure function of the entity identifier, so a rerun
//! overwrites the same files. Name components coming from the database may
//! contain anything; only a conservative character set survives into the
//! filename.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that are dropped from filename components.
///
/// Letters, digits, spaces, dashes and underscores are kept (letters and
/// digits in the Unicode sense, course names are not ASCII-only).
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N} _-]").expect("disallowed-characters pattern is valid")
});

/// Sanitizes one filename component.
///
/// Drops disallowed characters and trims trailing whitespace. The result can
/// be empty when the input contains nothing usable.
///
/// # Examples
///
/// ```
/// use clubhouse::utils::slug::sanitize_component;
///
/// assert_eq!(sanitize_component("Black Course"), "Black Course");
/// assert_eq!(sanitize_component("O'Brien's #1!"), "OBriens 1");
/// ```
pub fn sanitize_component(raw: &str) -> String {
    DISALLOWED.replace_all(raw, "").trim_end().to_string()
}

/// Builds the scorecard filename for a team/course pair.
pub fn scorecard_file_name(team_name: &str, course_name: &str) -> String {
    format!(
        "scorecard_{}_{}.pdf",
        sanitize_component(team_name),
        sanitize_component(course_name)
    )
}
