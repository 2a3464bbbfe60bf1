//! Workspace layout
//!
//! ghx works relative to a repository root. Workflows live under
//! `.github/workflows`, and an optional scaffolding template may sit at
//! `.github/ghx_template.yml` (or `.yaml`).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORKFLOW_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Repository-relative locations ghx reads and writes
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Repository root
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl WorkspaceConfig {
    /// Create a workspace rooted at `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `.github/workflows` under the root
    pub fn workflows_dir(&self) -> PathBuf {
        self.root.join(".github").join("workflows")
    }

    /// Candidate scaffolding templates, in lookup order
    pub fn template_candidates(&self) -> Vec<PathBuf> {
        WORKFLOW_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(".github").join(format!("ghx_template.{ext}")))
            .collect()
    }

    /// First template candidate that exists on disk
    pub fn find_template(&self) -> Option<PathBuf> {
        self.template_candidates().into_iter().find(|p| p.is_file())
    }

    /// Resolve a workflow name to a path under `.github/workflows`.
    ///
    /// With an explicit `.yml`/`.yaml` extension the name is used as-is.
    /// Without one, an existing `<name>.yml` wins over `<name>.yaml`; when
    /// neither exists the `.yml` path is returned so callers can create it.
    pub fn resolve_workflow(&self, name: &str) -> Result<PathBuf> {
        validate_workflow_name(name)?;

        let dir = self.workflows_dir();
        if workflow_extension(name).is_some() {
            return Ok(dir.join(name));
        }

        let resolved = WORKFLOW_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .find(|p| p.is_file())
            .unwrap_or_else(|| dir.join(format!("{name}.yml")));

        tracing::debug!("Resolved workflow '{}' to {}", name, resolved.display());
        Ok(resolved)
    }
}

/// Check that a workflow name is a bare file name with an optional
/// `.yml`/`.yaml` extension.
pub fn validate_workflow_name(name: &str) -> Result<()> {
    let invalid = |message: &str| Error::InvalidWorkflowName {
        name: name.to_string(),
        message: message.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("workflow name is required"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(invalid(
            "workflow name must be a file name without any path separators",
        ));
    }

    if let Some(ext) = Path::new(name).extension() {
        let ext = ext.to_string_lossy();
        if workflow_extension(name).is_none() {
            return Err(invalid(&format!(
                "extension '.{ext}' is not allowed, use .yml or .yaml"
            )));
        }
    }

    Ok(())
}

fn workflow_extension(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_string_lossy().to_lowercase();
    WORKFLOW_EXTENSIONS.iter().copied().find(|e| *e == ext)
}
