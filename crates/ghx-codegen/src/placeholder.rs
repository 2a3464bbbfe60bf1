//! Placeholder resolution
//!
//! Replaces `${{ inputs.<name> }}` and `${{ matrix.<name> }}` with the
//! input default or the value bound in the current matrix combination.
//! Any other text, including other `${{ ... }}` scopes, is left alone.

use crate::error::{Error, Result};
use crate::inputs::InputTable;
use crate::matrix::MatrixCombination;
use crate::patterns::PLACEHOLDER;

/// Resolve every placeholder in `text`.
///
/// Fails on the first placeholder that cannot be resolved; nothing is ever
/// substituted with an empty string in place of a missing value.
pub fn resolve(text: &str, inputs: &InputTable, matrix: &MatrixCombination) -> Result<String> {
    let mut resolved = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        resolved.push_str(&text[last..whole.start()]);
        resolved.push_str(&lookup(&caps[1], &caps[2], inputs, matrix)?);
        last = whole.end();
    }

    resolved.push_str(&text[last..]);
    Ok(resolved)
}

fn lookup(scope: &str, name: &str, inputs: &InputTable, matrix: &MatrixCombination) -> Result<String> {
    if scope.eq_ignore_ascii_case("inputs") {
        let input = inputs.get(name).ok_or_else(|| Error::UndefinedInput {
            name: name.to_string(),
        })?;
        if !input.has_default {
            return Err(Error::MissingInputDefault {
                name: name.to_string(),
            });
        }
        return Ok(input.default_value.clone().unwrap_or_default());
    }

    matrix
        .get(name)
        .map(str::to_string)
        .ok_or_else(|| Error::UndefinedMatrixValue {
            name: name.to_string(),
        })
}
