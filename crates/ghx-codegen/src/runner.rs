//! Runner validation
//!
//! Resolves a job's `runs-on` for one matrix combination and decides
//! whether ghx can stand in for it locally.

use ghx_core::{DocumentNode, NodeKind};

use crate::error::{Error, Result};
use crate::inputs::InputTable;
use crate::jobs::JobDefinition;
use crate::matrix::MatrixCombination;
use crate::placeholder;

/// The one hosted runner label a local run can emulate
pub const SUPPORTED_RUNNER: &str = "ubuntu-latest";

/// Resolve `runs-on` to a single label string.
///
/// A scalar is resolved and trimmed. A list has each entry resolved and
/// trimmed, blanks dropped, and the rest joined with single spaces.
pub fn resolve_runner<N: DocumentNode>(
    job: &JobDefinition<'_, N>,
    matrix: &MatrixCombination,
    inputs: &InputTable,
) -> Result<String> {
    let runs_on = job
        .runs_on()
        .ok_or_else(|| Error::structural(job.name(), "must specify runs-on"))?;

    let resolve = |text: &str| -> Result<String> {
        Ok(placeholder::resolve(text, inputs, matrix)?.trim().to_string())
    };

    match runs_on.kind() {
        NodeKind::Scalar => resolve(&runs_on.scalar_text().unwrap_or_default()),
        NodeKind::Sequence => {
            let mut labels = Vec::new();
            for entry in runs_on.sequence_items().unwrap_or_default() {
                let text = entry.scalar_text().ok_or_else(|| {
                    Error::structural(job.name(), "runs-on entries must be scalars")
                })?;
                let label = resolve(&text)?;
                if !label.is_empty() {
                    labels.push(label);
                }
            }
            Ok(labels.join(" "))
        }
        NodeKind::Mapping | NodeKind::Null => Err(Error::structural(
            job.name(),
            "has invalid runs-on definition",
        )),
    }
}

/// True when the resolved runner is the supported label (case-insensitive)
pub fn is_supported(runner: &str) -> bool {
    runner.eq_ignore_ascii_case(SUPPORTED_RUNNER)
}
