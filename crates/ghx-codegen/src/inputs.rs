//! Call-input table
//!
//! Reads `on.workflow_call.inputs` into a case-insensitive table of
//! declared inputs and their defaults.

use ghx_core::DocumentNode;

use crate::table::NameTable;

/// A declared call-input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDefinition {
    /// Default value, already quoted if it contains a space
    pub default_value: Option<String>,
    /// Whether a non-null `default` was declared
    pub has_default: bool,
}

impl InputDefinition {
    /// An input with the given (unquoted) default
    pub fn with_default(value: &str) -> Self {
        Self {
            default_value: Some(quote_if_needed(value)),
            has_default: true,
        }
    }

    /// An input that must be supplied by the caller
    pub fn required() -> Self {
        Self {
            default_value: None,
            has_default: false,
        }
    }
}

/// Declared inputs, keyed by name without regard to case
pub type InputTable = NameTable<InputDefinition>;

/// Build the input table from a workflow root.
///
/// A workflow that is not callable (no `on.workflow_call.inputs` mapping)
/// has an empty table. Input entries that are not mappings are ignored.
pub fn build_input_table<N: DocumentNode>(root: &N) -> InputTable {
    let mut table = InputTable::new();

    let Some(entries) = root
        .at_path(&["on", "workflow_call", "inputs"])
        .and_then(|node| node.mapping_entries())
    else {
        return table;
    };

    for (name, node) in entries {
        if node.mapping_entries().is_none() {
            tracing::debug!("Ignoring input '{}': not a mapping", name);
            continue;
        }

        let definition = match node.child("default").and_then(|d| d.scalar_text()) {
            Some(value) => InputDefinition::with_default(&value),
            None => InputDefinition::required(),
        };
        table.insert(name, definition);
    }

    table
}

/// Wrap a value in double quotes when it contains a space, so it survives
/// word splitting once substituted into a command line. Embedded quotes are
/// not escaped.
pub fn quote_if_needed(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
