//! Script assembler
//!
//! Walks every job and matrix combination and stitches the transformed
//! steps into one script, with echo banners between sections.

use ghx_core::DocumentNode;

use crate::compiler::{CompileOptions, ScriptTarget};
use crate::error::Result;
use crate::inputs::InputTable;
use crate::jobs::{JobDefinition, JobTable};
use crate::matrix;
use crate::runner;
use crate::steps;
use crate::transform::LineTransformer;

const BANNER_WIDTH: usize = 76;

/// Exit status of a batch script that hit a failing command
pub const BATCH_ERROR_EXIT_CODE: i32 = 310;

/// Assembles one script from the input and job tables
pub struct ScriptAssembler<'a, 'doc, N> {
    inputs: &'a InputTable,
    jobs: &'a JobTable<'doc, N>,
    options: &'a CompileOptions,
}

impl<'a, 'doc, N: DocumentNode> ScriptAssembler<'a, 'doc, N> {
    /// Create an assembler
    pub fn new(
        inputs: &'a InputTable,
        jobs: &'a JobTable<'doc, N>,
        options: &'a CompileOptions,
    ) -> Self {
        Self {
            inputs,
            jobs,
            options,
        }
    }

    /// Produce the full script text
    pub fn assemble(&self) -> Result<String> {
        let mut lines = Vec::new();

        self.push_preamble(&mut lines);
        self.push_inputs(&mut lines);

        for (_, job) in self.jobs.iter() {
            self.push_job(job, &mut lines)?;
        }

        self.push_footer(&mut lines);

        Ok(lines.join(self.options.target.line_ending()))
    }

    fn push_preamble(&self, lines: &mut Vec<String>) {
        match self.options.target {
            ScriptTarget::Batch => {
                lines.push("@ECHO OFF".to_string());
                lines.push(String::new());
            }
            ScriptTarget::Shell if self.options.fail_fast => {
                lines.push("set -e".to_string());
                lines.push(String::new());
            }
            ScriptTarget::Shell => {}
        }
    }

    fn push_inputs(&self, lines: &mut Vec<String>) {
        if self.inputs.is_empty() {
            return;
        }

        lines.push("echo inputs:".to_string());
        for (name, input) in self.inputs.iter_sorted() {
            let value = input.default_value.as_deref().unwrap_or_default();
            lines.push(format!("echo   {name}={value}"));
        }
    }

    fn push_job(&self, job: &JobDefinition<'doc, N>, lines: &mut Vec<String>) -> Result<()> {
        let mut combinations = matrix::expand(job)?;
        let matrix_count = combinations.len();
        if self.options.once_only && combinations.len() > 1 {
            combinations.truncate(1);
        }

        let runs = steps::extract_run_steps(job)?;
        if runs.is_empty() {
            tracing::debug!("Skipping job '{}': no run steps", job.name());
            return Ok(());
        }

        lines.push(String::new());
        lines.push(String::new());
        lines.push(rule('='));
        lines.push(format!(
            "echo job '{}': matrix count={}",
            job.name(),
            matrix_count
        ));
        lines.push(rule('='));

        for combination in &combinations {
            let runner = runner::resolve_runner(job, combination, self.inputs)?;

            lines.push(String::new());
            lines.push(String::new());
            lines.push(rule('-'));
            lines.push(format!("echo {}: {}", job.name(), combination));
            lines.push(rule('-'));
            lines.push(String::new());

            if !runner::is_supported(&runner) {
                tracing::warn!(
                    "Job '{}' ({}): unsupported runner '{}', skipping",
                    job.name(),
                    combination,
                    runner
                );
                lines.push(format!("echo Unsupported runner: {runner}"));
                continue;
            }

            let transformer = LineTransformer::new(self.inputs, combination, self.options.target);
            for run in &runs {
                lines.extend(trim_block(transformer.transform_step(run)?));
            }
        }

        Ok(())
    }

    fn push_footer(&self, lines: &mut Vec<String>) {
        if self.options.target != ScriptTarget::Batch {
            return;
        }

        lines.push(String::new());
        lines.push(String::new());
        lines.push("GOTO :EOF".to_string());
        lines.push(String::new());
        lines.push(":ERROR".to_string());
        lines.push("  ECHO.".to_string());
        lines.push("  ECHO ======= ERROR OCCURRED =======".to_string());
        lines.push("  ECHO.".to_string());
        lines.push(format!("  EXIT {BATCH_ERROR_EXIT_CODE}"));
    }
}

/// Assemble a script in one call
pub fn assemble<N: DocumentNode>(
    inputs: &InputTable,
    jobs: &JobTable<'_, N>,
    options: &CompileOptions,
) -> Result<String> {
    ScriptAssembler::new(inputs, jobs, options).assemble()
}

fn rule(ch: char) -> String {
    format!("echo {}", ch.to_string().repeat(BANNER_WIDTH))
}

/// Trim a fragment's lines as one block: drop surrounding blank lines, the
/// first line's leading whitespace and the last line's trailing whitespace.
/// An all-blank block still takes up one empty line.
fn trim_block(lines: Vec<String>) -> Vec<String> {
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return vec![String::new()];
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);

    let count = last - first + 1;
    lines
        .into_iter()
        .skip(first)
        .take(count)
        .enumerate()
        .map(|(i, line)| {
            let line = if i == 0 { line.trim_start() } else { line.as_str() };
            let line = if i + 1 == count { line.trim_end() } else { line };
            line.to_string()
        })
        .collect()
}
