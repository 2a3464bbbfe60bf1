//! Scaffold a new workflow

use std::path::Path;

use anyhow::{Context, Result};
use ghx_core::WorkspaceConfig;

/// Run the new command
pub async fn run(workspace: &WorkspaceConfig, workflow: &str) -> Result<()> {
    let path = workspace.resolve_workflow(workflow)?;
    create(workspace, &path)
}

/// Create the workflow file at `path` from the workspace template, or from
/// the built-in starter when there is none. An existing file is left alone.
pub fn create(workspace: &WorkspaceConfig, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .context("Failed to resolve target directory")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let file_name = super::file_name(path);
    if path.exists() {
        println!("Workflow '{file_name}' already exists. Skipping creation.");
        return Ok(());
    }

    match workspace.find_template() {
        Some(template) => {
            tracing::info!("Using template {}", template.display());
            std::fs::copy(&template, path)
                .with_context(|| format!("Failed to copy template: {}", template.display()))?;
        }
        None => {
            let job = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.clone());
            std::fs::write(path, starter_workflow(&job))
                .with_context(|| format!("Failed to write: {}", path.display()))?;
        }
    }

    println!("Created workflow template at '{}'", path.display());
    Ok(())
}

/// Built-in starter workflow with a single job named `job`
fn starter_workflow(job: &str) -> String {
    format!(
        r#"name: {job}

on:
  # push:
  #   branches: [ "main" ]
  workflow_dispatch:

jobs:

  {job}:
    # strategy:
    #   matrix:
    #     configuration: [Debug, Release]

    runs-on: ubuntu-latest   # may use ${{{{ matrix.<name> }}}}

    steps:
      - uses: actions/checkout@v4

      - run: |
          echo Hello from {job}
"#
    )
}
