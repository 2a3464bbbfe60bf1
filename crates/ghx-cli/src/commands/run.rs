//! Generate the script into a temp file and execute it

use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ghx_codegen::ScriptTarget;
use ghx_core::WorkspaceConfig;

const RULE_WIDTH: usize = 76;

/// Run the run command, returning the script's exit code
pub async fn run(
    workspace: &WorkspaceConfig,
    workflow: &str,
    use_cmd: bool,
    use_wsl: bool,
    once: bool,
) -> Result<i32> {
    if use_cmd && !cfg!(windows) {
        anyhow::bail!("--cmd is only supported on Windows.");
    }

    let path = super::locate_workflow(workspace, workflow).await?;
    let script = super::compile(&path, use_cmd, once)?;

    let mut file = tempfile::Builder::new()
        .prefix("ghx-")
        .suffix(script.file_extension())
        .tempfile()
        .context("Failed to create script file")?;
    file.write_all(script.body.as_bytes())
        .context("Failed to write script file")?;

    // Close the handle so the interpreter can open the file on every host;
    // the path is still removed when `script_path` drops.
    let script_path = file.into_temp_path();

    let invocation = Invocation::new(&script_path, script.target, use_wsl, cfg!(windows))?;
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("{invocation}");
    println!("{rule}");

    let status = tokio::process::Command::new(&invocation.program)
        .args(&invocation.args)
        .status()
        .await
        .with_context(|| format!("Failed to run generated script: {invocation}"))?;

    if let Err(e) = script_path.close() {
        tracing::debug!("Failed to remove script file: {}", e);
    }

    let code = status.code().unwrap_or(1);
    tracing::info!("Script exited with code {}", code);
    Ok(code)
}

/// Interpreter command line for a generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to launch
    pub program: String,
    /// Arguments, ending with the script path
    pub args: Vec<String>,
}

impl Invocation {
    /// Choose the interpreter for a script on this kind of host
    pub fn new(script: &Path, target: ScriptTarget, use_wsl: bool, windows_host: bool) -> Result<Self> {
        let script = script.display().to_string();

        let (program, args) = match target {
            ScriptTarget::Batch => ("cmd.exe", vec!["/c".to_string(), script]),
            ScriptTarget::Shell if windows_host && use_wsl => (
                "wsl",
                vec!["bash".to_string(), "-el".to_string(), to_wsl_path(&script)],
            ),
            ScriptTarget::Shell if windows_host => {
                anyhow::bail!("On Windows, specify --cmd or --wsl.")
            }
            ScriptTarget::Shell => (
                "/usr/bin/env",
                vec!["bash".to_string(), "-el".to_string(), script],
            ),
        };

        Ok(Self {
            program: program.to_string(),
            args,
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        if let Some((script, flags)) = self.args.split_last() {
            for flag in flags {
                write!(f, " {flag}")?;
            }
            write!(f, " \"{script}\"")?;
        }
        Ok(())
    }
}

/// `C:\dir\file.sh` → `/mnt/c/dir/file.sh`; paths without a drive only
/// get their separators flipped
pub fn to_wsl_path(path: &str) -> String {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            let rest = path[2..].replace('\\', "/");
            let rest = if rest.starts_with('/') {
                rest
            } else {
                format!("/{rest}")
            };
            format!("/mnt/{}{}", drive.to_ascii_lowercase(), rest)
        }
        _ => path.replace('\\', "/"),
    }
}
