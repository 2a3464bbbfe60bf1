//! Print the generated script

use anyhow::Result;
use ghx_core::WorkspaceConfig;

/// Run the dry command
pub async fn run(workspace: &WorkspaceConfig, workflow: &str, use_cmd: bool, once: bool) -> Result<()> {
    let path = super::locate_workflow(workspace, workflow).await?;
    let script = super::compile(&path, use_cmd, once)?;

    println!("{}", script.body);
    Ok(())
}
