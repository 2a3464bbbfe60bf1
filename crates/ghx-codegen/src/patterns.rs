//! Compiled patterns shared by the resolver and the line transformer

use once_cell::sync::Lazy;
use regex::Regex;

/// `${{ inputs.<name> }}` / `${{ matrix.<name> }}`, scope matched without case
pub static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{\{\s*((?i:inputs|matrix))\s*\.\s*([A-Za-z0-9_-]+)\s*\}\}")
        .expect("placeholder pattern is valid")
});

/// Redirect into the hosted runner's step summary file
pub static STEP_SUMMARY_REDIRECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*>>?\s*\$GITHUB_STEP_SUMMARY").expect("step summary pattern is valid")
});

/// First `#` not preceded by a backslash, through end of line
pub static INLINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^\\])#.*$").expect("inline comment pattern is valid"));

/// Single-digit positional parameter
pub static DOLLAR_POSITIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([0-9])").expect("positional pattern is valid"));

/// A line that is only `sleep <seconds>`
pub static SLEEP_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*sleep\s+([0-9]+)\s*;?\s*$").expect("sleep pattern is valid")
});
