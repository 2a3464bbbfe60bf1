//! Workflow loading
//!
//! A [`Workflow`] is a validated root node: a document whose top level is a
//! mapping. Everything below the root is interpreted lazily by the compiler.

use std::path::Path;

use serde_yaml::Value;

use crate::document::{DocumentNode, NodeKind};
use crate::error::{Error, Result};

/// A loaded workflow document
#[derive(Debug, Clone)]
pub struct Workflow<N = Value> {
    root: N,
}

impl Workflow<Value> {
    /// Load and parse a workflow file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::WorkflowNotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading workflow: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a workflow from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        Self::from_root(root)
    }
}

impl<N: DocumentNode> Workflow<N> {
    /// Wrap an already-deserialized root node
    pub fn from_root(root: N) -> Result<Self> {
        if root.kind() != NodeKind::Mapping {
            return Err(Error::MalformedWorkflow);
        }
        Ok(Self { root })
    }

    /// Root mapping of the document
    pub fn root(&self) -> &N {
        &self.root
    }
}
