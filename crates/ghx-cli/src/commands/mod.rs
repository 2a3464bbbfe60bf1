//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ghx_codegen::{CompileOptions, CompiledScript, Compiler, ScriptTarget};
use ghx_core::WorkspaceConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub mod dry;
pub mod new;
pub mod run;
pub mod sleep;

/// Resolve a workflow for `dry`/`run`, offering to scaffold it when missing
pub async fn locate_workflow(workspace: &WorkspaceConfig, workflow: &str) -> Result<PathBuf> {
    let path = workspace.resolve_workflow(workflow)?;
    if path.is_file() {
        return Ok(path);
    }

    let file_name = file_name(&path);
    let question = format!("Workflow '{file_name}' not found. Create new? [y/N]: ");
    if !confirm(&question).await? {
        anyhow::bail!("Workflow '{}' not found and creation declined.", file_name);
    }

    new::create(workspace, &path)
        .with_context(|| format!("Workflow '{}' could not be created", file_name))?;
    Ok(path)
}

/// Compile a workflow file for the chosen dialect
pub fn compile(path: &Path, use_cmd: bool, once: bool) -> Result<CompiledScript> {
    let target = if use_cmd {
        ScriptTarget::Batch
    } else {
        ScriptTarget::Shell
    };
    let options = CompileOptions::for_target(target).with_once_only(once);

    let script = Compiler::new(options).compile_file(path)?;
    tracing::info!(
        "Compiled {} ({} lines)",
        path.display(),
        script.lines().count()
    );
    Ok(script)
}

/// Ask a yes/no question on stdout and read the answer from stdin
async fn confirm(question: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("Failed to read answer")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
