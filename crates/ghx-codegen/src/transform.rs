//! Line transformer
//!
//! Rewrites one `run:` fragment, line by line, into lines of the target
//! script. Each rewrite is a small pure function; [`LineTransformer`]
//! applies them in a fixed order:
//!
//! 1. strip the inline comment, then trailing whitespace
//! 2. elide blank and comment-only lines
//! 3. resolve placeholders
//! 4. strip a `>> $GITHUB_STEP_SUMMARY` redirect
//! 5. batch: `$1` → `%1`, trailing `\` → `^`
//! 6. whole-line `sleep N` → delegated (shell) or native (batch) wait
//! 7. a line emptied by 3–6 is emitted as an empty line
//! 8. batch: `CALL` prefix or continuation indent, error jump suffix
//! 9. reject any `$` left over
//!
//! The only state carried between lines is whether the previous batch line
//! ended in a continuation marker ([`ContinuationState`]).

use crate::compiler::ScriptTarget;
use crate::error::{Error, Result};
use crate::inputs::InputTable;
use crate::matrix::MatrixCombination;
use crate::patterns::{
    DOLLAR_POSITIONAL, INLINE_COMMENT, SLEEP_COMMAND, STEP_SUMMARY_REDIRECT,
};
use crate::placeholder;

/// Batch line continuation marker
pub const BATCH_CONTINUATION: char = '^';

/// Prefix that dispatches a batch command
pub const BATCH_DISPATCH: &str = "CALL ";

/// Indent for continued batch lines, aligned with [`BATCH_DISPATCH`]
pub const BATCH_CONTINUATION_INDENT: &str = "     ";

/// Suffix that jumps to the shared error handler when a command fails
pub const BATCH_ERROR_JUMP: &str = "  || CALL :ERROR";

/// Cross-line state of a batch fragment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContinuationState {
    /// The previous emitted line ended in [`BATCH_CONTINUATION`]
    pub continuing: bool,
}

/// Result of transforming one physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Blank or comment-only source line; produces nothing
    Elided,
    /// A line the rewrites emptied; produces an empty output line
    Blank,
    /// A script line
    Line(String),
}

/// Transforms fragments for one matrix combination and target
#[derive(Debug, Clone, Copy)]
pub struct LineTransformer<'a> {
    inputs: &'a InputTable,
    matrix: &'a MatrixCombination,
    target: ScriptTarget,
}

impl<'a> LineTransformer<'a> {
    /// Create a transformer for one combination
    pub fn new(inputs: &'a InputTable, matrix: &'a MatrixCombination, target: ScriptTarget) -> Self {
        Self {
            inputs,
            matrix,
            target,
        }
    }

    /// Transform a whole fragment. Yields at most one output line per
    /// physical input line.
    pub fn transform_step(&self, fragment: &str) -> Result<Vec<String>> {
        let mut state = ContinuationState::default();
        let mut lines = Vec::new();

        for raw in fragment.split('\n') {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let (emitted, next) = self.transform_line(raw, state)?;
            state = next;
            match emitted {
                Emitted::Elided => {}
                Emitted::Blank => lines.push(String::new()),
                Emitted::Line(line) => lines.push(line),
            }
        }

        Ok(lines)
    }

    /// Transform one physical line given the state left by the previous one
    pub fn transform_line(
        &self,
        raw: &str,
        state: ContinuationState,
    ) -> Result<(Emitted, ContinuationState)> {
        let batch = self.target == ScriptTarget::Batch;

        let line = strip_inline_comment(raw);
        if is_elided(&line) {
            return Ok((Emitted::Elided, state));
        }

        let line = placeholder::resolve(&line, self.inputs, self.matrix)?;
        let mut line = strip_step_summary(&line);

        if batch {
            line = rewrite_positional(&line);
            line = rewrite_trailing_backslash(&line);
        }

        let line = rewrite_sleep(&line, self.target);
        if line.trim().is_empty() {
            return Ok((Emitted::Blank, state));
        }

        let (line, state) = if batch {
            dispatch_batch(&line, state)
        } else {
            (line, state)
        };

        check_unresolved(&line)?;
        Ok((Emitted::Line(line), state))
    }
}

/// Remove everything from the first unescaped `#`, then trailing whitespace
pub fn strip_inline_comment(line: &str) -> String {
    INLINE_COMMENT.replace(line, "${1}").trim_end().to_string()
}

/// Blank lines and lines that are still a comment are dropped outright
pub fn is_elided(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Remove a redirect into the step summary file
pub fn strip_step_summary(line: &str) -> String {
    STEP_SUMMARY_REDIRECT
        .replace_all(line, "")
        .trim_end()
        .to_string()
}

/// `$1`..`$9` → `%1`..`%9`
pub fn rewrite_positional(line: &str) -> String {
    DOLLAR_POSITIONAL.replace_all(line, "%${1}").into_owned()
}

/// A trailing unescaped `\` becomes the batch continuation marker
pub fn rewrite_trailing_backslash(line: &str) -> String {
    match line.strip_suffix('\\') {
        Some(head) if !head.ends_with('\\') => format!("{head}{BATCH_CONTINUATION}"),
        _ => line.to_string(),
    }
}

/// Rewrite a line that is exactly `sleep <seconds>`.
///
/// The shell target delegates to `ghx sleep`; the batch target uses the
/// native timed wait. Both count seconds.
pub fn rewrite_sleep(line: &str, target: ScriptTarget) -> String {
    let replacement = match target {
        ScriptTarget::Shell => "ghx sleep ${1}",
        ScriptTarget::Batch => "TIMEOUT /T ${1} /NOBREAK >nul",
    };
    SLEEP_COMMAND.replace(line, replacement).into_owned()
}

/// Prefix with `CALL` or indent under a continued line, and append the
/// error jump once the command is complete.
pub fn dispatch_batch(line: &str, state: ContinuationState) -> (String, ContinuationState) {
    let mut out = if state.continuing {
        format!("{BATCH_CONTINUATION_INDENT}{line}")
    } else {
        format!("{BATCH_DISPATCH}{line}")
    };

    let continuing = out.ends_with(BATCH_CONTINUATION);
    if !continuing {
        out.push_str(BATCH_ERROR_JUMP);
    }

    (out, ContinuationState { continuing })
}

/// Reject a line that still contains `$` once positional markers are
/// discounted.
pub fn check_unresolved(line: &str) -> Result<()> {
    if !line.contains('$') {
        return Ok(());
    }

    let remainder = DOLLAR_POSITIONAL.replace_all(line, "");
    if remainder.contains('$') {
        return Err(Error::UnsupportedExpression {
            line: remainder.into_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputDefinition;
    use rstest::rstest;

    fn inputs() -> InputTable {
        let mut table = InputTable::new();
        table.insert("config", InputDefinition::with_default("Release"));
        table.insert("token", InputDefinition::required());
        table
    }

    fn transform(fragment: &str, target: ScriptTarget) -> Result<Vec<String>> {
        let inputs = inputs();
        let matrix = MatrixCombination::from_pairs([("os", "linux")]);
        LineTransformer::new(&inputs, &matrix, target).transform_step(fragment)
    }

    #[rstest]
    #[case("echo hi # trailing", "echo hi")]
    #[case("echo hi   ", "echo hi")]
    #[case(r"echo \#literal", r"echo \#literal")]
    #[case("# whole line", "")]
    #[case("echo a#b", "echo a")]
    fn test_strip_inline_comment(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_inline_comment(input), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("    ", true)]
    #[case("  # note", true)]
    #[case("echo", false)]
    fn test_is_elided(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_elided(input), expected);
    }

    #[rstest]
    #[case("echo ok >> $GITHUB_STEP_SUMMARY", "echo ok")]
    #[case("echo ok>$GITHUB_STEP_SUMMARY", "echo ok")]
    #[case("echo ok", "echo ok")]
    fn test_strip_step_summary(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_step_summary(input), expected);
    }

    #[rstest]
    #[case("copy $1 $2", "copy %1 %2")]
    #[case("echo $10", "echo %10")]
    #[case("echo none", "echo none")]
    fn test_rewrite_positional(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite_positional(input), expected);
    }

    #[rstest]
    #[case(r"dotnet build \", "dotnet build ^")]
    #[case(r"echo \\", r"echo \\")]
    #[case("echo done", "echo done")]
    fn test_rewrite_trailing_backslash(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite_trailing_backslash(input), expected);
    }

    #[rstest]
    #[case("sleep 5;", ScriptTarget::Shell, "ghx sleep 5")]
    #[case("  sleep 10  ", ScriptTarget::Shell, "ghx sleep 10")]
    #[case("sleep 5;", ScriptTarget::Batch, "TIMEOUT /T 5 /NOBREAK >nul")]
    #[case("sleep 5 && echo", ScriptTarget::Batch, "sleep 5 && echo")]
    fn test_rewrite_sleep(#[case] input: &str, #[case] target: ScriptTarget, #[case] expected: &str) {
        assert_eq!(rewrite_sleep(input, target), expected);
    }

    #[test]
    fn test_dispatch_batch_threads_continuation() {
        let (first, state) = dispatch_batch("dotnet build ^", ContinuationState::default());
        assert_eq!(first, "CALL dotnet build ^");
        assert!(state.continuing);

        let (second, state) = dispatch_batch("-c Release", state);
        assert_eq!(second, "     -c Release  || CALL :ERROR");
        assert!(!state.continuing);
    }

    #[test]
    fn test_check_unresolved() {
        assert!(check_unresolved("echo %1").is_ok());
        assert!(check_unresolved("echo $1").is_ok());
        let err = check_unresolved("echo $HOME").unwrap_err();
        assert!(matches!(err, Error::UnsupportedExpression { .. }));
        assert!(check_unresolved("echo ${{ github.sha }}").is_err());
    }

    #[test]
    fn test_shell_fragment() {
        let lines = transform(
            "# setup\necho ${{ inputs.config }}   # build config\n\n  echo ${{ matrix.os }}\nsleep 2\n",
            ScriptTarget::Shell,
        )
        .unwrap();
        assert_eq!(lines, vec!["echo Release", "  echo linux", "ghx sleep 2"]);
    }

    #[test]
    fn test_batch_fragment_with_continuation() {
        let lines = transform(
            "dotnet build \\\n  -c ${{ inputs.config }} \\\n  --nologo\necho $1\n",
            ScriptTarget::Batch,
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "CALL dotnet build ^",
                "       -c Release ^",
                "       --nologo  || CALL :ERROR",
                "CALL echo %1  || CALL :ERROR",
            ]
        );
    }

    #[test]
    fn test_batch_sleep() {
        let lines = transform("sleep 5;", ScriptTarget::Batch).unwrap();
        assert_eq!(lines, vec!["CALL TIMEOUT /T 5 /NOBREAK >nul  || CALL :ERROR"]);
    }

    #[test]
    fn test_line_emptied_by_rewrite_is_blank() {
        let lines = transform("echo a\n>> $GITHUB_STEP_SUMMARY\necho b", ScriptTarget::Shell).unwrap();
        assert_eq!(lines, vec!["echo a", "", "echo b"]);
    }

    #[test]
    fn test_crlf_fragment() {
        let lines = transform("echo a\r\necho b\r\n", ScriptTarget::Shell).unwrap();
        assert_eq!(lines, vec!["echo a", "echo b"]);
    }

    #[test]
    fn test_unresolved_variable_aborts() {
        let err = transform("echo $HOME", ScriptTarget::Shell).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported template expression found: echo $HOME"
        );
    }

    #[test]
    fn test_input_without_default_aborts() {
        let err = transform("echo ${{ inputs.token }}", ScriptTarget::Shell).unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}
