//! Step extraction
//!
//! Collects the `run:` fragments of a job in order. Steps without `run`
//! (action references) are skipped; a step that asks for its own shell
//! stops the compilation.

use ghx_core::DocumentNode;

use crate::error::{Error, Result};
use crate::jobs::JobDefinition;

/// The parts of a step the compiler reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepDefinition {
    /// `name:`
    pub name: Option<String>,
    /// `run:`, verbatim including embedded newlines
    pub run: Option<String>,
    /// `shell:` when present and not null; a non-scalar value reads as empty
    pub shell: Option<String>,
}

impl StepDefinition {
    /// Read a step node; `None` when the node is not a mapping
    pub fn from_node<N: DocumentNode>(node: &N) -> Option<Self> {
        node.mapping_entries()?;
        let text = |key: &str| node.child(key).and_then(|n| n.scalar_text());
        Some(Self {
            name: text("name"),
            run: text("run"),
            shell: node
                .child("shell")
                .filter(|n| !n.is_null())
                .map(|n| n.scalar_text().unwrap_or_default()),
        })
    }

    /// True when the step sets `shell` to anything but null
    pub fn has_custom_shell(&self) -> bool {
        self.shell.is_some()
    }
}

/// Extract the ordered `run:` fragments of a job.
pub fn extract_run_steps<N: DocumentNode>(job: &JobDefinition<'_, N>) -> Result<Vec<String>> {
    let Some(steps) = job.steps() else {
        return Ok(Vec::new());
    };

    let mut runs = Vec::new();
    for (index, node) in steps.into_iter().enumerate() {
        let Some(step) = StepDefinition::from_node(node) else {
            continue;
        };

        if step.has_custom_shell() {
            return Err(Error::UnsupportedShell {
                job: job.name().to_string(),
                step: step.name.unwrap_or_else(|| format!("#{}", index + 1)),
            });
        }

        if let Some(run) = step.run {
            runs.push(run);
        }
    }

    Ok(runs)
}
