//! Matrix expansion
//!
//! Turns a job's `strategy.matrix` axes into the full cartesian product of
//! concrete combinations. The first declared axis varies slowest; within an
//! axis, values keep their declared order.

use std::fmt;

use ghx_core::DocumentNode;

use crate::error::{Error, Result};
use crate::inputs::quote_if_needed;
use crate::jobs::JobDefinition;
use crate::table::NameTable;

/// One binding of every matrix axis to a single value.
///
/// The empty combination stands for "no matrix".
#[derive(Debug, Clone, Default)]
pub struct MatrixCombination {
    values: NameTable<String>,
}

impl MatrixCombination {
    /// The combination of a job without a matrix
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a combination from `(axis, value)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut values = NameTable::new();
        for (axis, value) in pairs {
            values.insert(axis, value.to_string());
        }
        Self { values }
    }

    /// Value bound to an axis, ignoring case
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.values.get(axis).map(String::as_str)
    }

    /// Number of bound axes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for the "no matrix" combination
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(axis, value)` pairs in axis declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    fn bind(&mut self, axis: &str, value: &str) {
        self.values.insert(axis, value.to_string());
    }
}

impl fmt::Display for MatrixCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no matrix");
        }
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        f.write_str(&pairs.join(" "))
    }
}

/// Expand a job's matrix into its ordered list of combinations.
///
/// A job without a matrix yields exactly one empty combination. Axis values
/// containing a space are quoted here, once, so consumers never re-quote.
pub fn expand<N: DocumentNode>(job: &JobDefinition<'_, N>) -> Result<Vec<MatrixCombination>> {
    let Some(matrix) = job.matrix() else {
        return Ok(vec![MatrixCombination::empty()]);
    };

    let mut axes: NameTable<Vec<String>> = NameTable::new();
    for (axis, node) in matrix.mapping_entries().unwrap_or_default() {
        let items = node.sequence_items().ok_or_else(|| {
            Error::structural(job.name(), format!("matrix '{axis}' must be a sequence"))
        })?;

        let values = items
            .into_iter()
            .map(|item| item.scalar_text().map(|v| quote_if_needed(&v)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                Error::structural(job.name(), format!("matrix '{axis}' values must be scalars"))
            })?;

        if values.is_empty() {
            return Err(Error::structural(
                job.name(),
                format!("matrix '{axis}' must not be empty"),
            ));
        }

        axes.insert(axis, values);
    }

    let axes: Vec<(&str, &[String])> = axes.iter().map(|(k, v)| (k, v.as_slice())).collect();
    let mut combinations = Vec::new();
    combine(&axes, &mut MatrixCombination::empty(), &mut combinations);

    tracing::debug!(
        "Job '{}': {} axes, {} combinations",
        job.name(),
        axes.len(),
        combinations.len()
    );
    Ok(combinations)
}

fn combine(
    axes: &[(&str, &[String])],
    current: &mut MatrixCombination,
    out: &mut Vec<MatrixCombination>,
) {
    let Some(((axis, values), rest)) = axes.split_first() else {
        out.push(current.clone());
        return;
    };

    for value in values.iter() {
        current.bind(axis, value);
        combine(rest, current, out);
    }
}
