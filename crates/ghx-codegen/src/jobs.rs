//! Job table
//!
//! Jobs are looked up without regard to case but iterated in declaration
//! order so the emitted script is deterministic.

use ghx_core::{DocumentNode, NodeKind};

use crate::error::{Error, Result};
use crate::table::NameTable;

/// A job declared under `jobs:`.
///
/// Holds a reference into the document; the individual sections are read
/// (and validated) by the component that needs them.
#[derive(Debug)]
pub struct JobDefinition<'doc, N> {
    name: String,
    node: &'doc N,
}

impl<N> Clone for JobDefinition<'_, N> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            node: self.node,
        }
    }
}

impl<'doc, N: DocumentNode> JobDefinition<'doc, N> {
    /// Wrap a job node
    pub fn new(name: impl Into<String>, node: &'doc N) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }

    /// Job name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `runs-on`, if present and not null
    pub fn runs_on(&self) -> Option<&'doc N> {
        self.node.child("runs-on").filter(|n| !n.is_null())
    }

    /// `strategy.matrix`, when it is a mapping of axes
    pub fn matrix(&self) -> Option<&'doc N> {
        self.node
            .at_path(&["strategy", "matrix"])
            .filter(|n| n.kind() == NodeKind::Mapping)
    }

    /// Items of `steps`, when it is a sequence
    pub fn steps(&self) -> Option<Vec<&'doc N>> {
        self.node.child("steps")?.sequence_items()
    }
}

/// Declared jobs, keyed by name without regard to case
pub type JobTable<'doc, N> = NameTable<JobDefinition<'doc, N>>;

/// Build the job table from a workflow root.
///
/// Entries under `jobs:` that are not mappings are ignored. Two job names
/// that differ only by case cannot both be addressed and are rejected.
pub fn build_job_table<N: DocumentNode>(root: &N) -> Result<JobTable<'_, N>> {
    let mut table = JobTable::new();

    let Some(entries) = root.child("jobs").and_then(|jobs| jobs.mapping_entries()) else {
        return Ok(table);
    };

    for (name, node) in entries {
        if node.kind() != NodeKind::Mapping {
            tracing::debug!("Ignoring job '{}': not a mapping", name);
            continue;
        }

        if table.contains(&name) {
            return Err(Error::structural(
                &name,
                "is declared more than once (job names are not case sensitive)",
            ));
        }

        table.insert(name.clone(), JobDefinition::new(name, node));
    }

    Ok(table)
}
