//! Workflow compiler
//!
//! Entry point tying the tables, the expander and the assembler together.

use std::path::Path;

use ghx_core::{DocumentNode, Workflow};

use crate::assembler::assemble;
use crate::error::{Error, Result};
use crate::inputs::build_input_table;
use crate::jobs::build_job_table;

/// Script dialect to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTarget {
    /// POSIX shell (bash)
    Shell,
    /// Windows batch (cmd.exe)
    Batch,
}

impl ScriptTarget {
    /// Batch on Windows hosts, shell everywhere else
    pub fn host_default() -> Self {
        if cfg!(windows) {
            ScriptTarget::Batch
        } else {
            ScriptTarget::Shell
        }
    }

    /// Line separator of the emitted script. Shell scripts always use a
    /// bare line feed so they also run under a Linux subsystem.
    pub fn line_ending(self) -> &'static str {
        match self {
            ScriptTarget::Shell => "\n",
            ScriptTarget::Batch => "\r\n",
        }
    }

    /// File extension for the generated script
    pub fn file_extension(self) -> &'static str {
        match self {
            ScriptTarget::Shell => ".sh",
            ScriptTarget::Batch => ".bat",
        }
    }
}

/// Options for the compiler
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Dialect to emit
    pub target: ScriptTarget,

    /// Keep only the first matrix combination of each job
    pub once_only: bool,

    /// Emit `set -e` at the top of shell scripts
    pub fail_fast: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::for_target(ScriptTarget::host_default())
    }
}

impl CompileOptions {
    /// Defaults for a target.
    ///
    /// `fail_fast` depends on the compiling host: shell scripts compiled on
    /// Windows start without `set -e`.
    pub fn for_target(target: ScriptTarget) -> Self {
        Self {
            target,
            once_only: false,
            fail_fast: !cfg!(windows),
        }
    }

    /// Set `once_only`
    pub fn with_once_only(mut self, once_only: bool) -> Self {
        self.once_only = once_only;
        self
    }

    /// Set `fail_fast`
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Workflow to script compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Options this compiler was built with
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Load a workflow file and compile it
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<CompiledScript> {
        let path = path.as_ref();
        tracing::debug!("Compiling workflow: {}", path.display());
        let workflow = Workflow::load(path)?;
        self.compile(&workflow)
    }

    /// Compile a loaded workflow
    pub fn compile<N: DocumentNode>(&self, workflow: &Workflow<N>) -> Result<CompiledScript> {
        let inputs = build_input_table(workflow.root());
        let jobs = build_job_table(workflow.root())?;
        if jobs.is_empty() {
            return Err(Error::NoJobs);
        }

        tracing::debug!(
            "Assembling {:?} script: {} inputs, {} jobs",
            self.options.target,
            inputs.len(),
            jobs.len()
        );

        let body = assemble(&inputs, &jobs, &self.options)?;

        Ok(CompiledScript {
            body,
            target: self.options.target,
            once_only: self.options.once_only,
        })
    }
}

/// A compiled script ready to print or execute
#[derive(Debug, Clone)]
pub struct CompiledScript {
    /// Full script text
    pub body: String,

    /// Dialect of `body`
    pub target: ScriptTarget,

    /// Whether matrices were cut to their first combination
    pub once_only: bool,
}

impl CompiledScript {
    /// File extension matching the dialect
    pub fn file_extension(&self) -> &'static str {
        self.target.file_extension()
    }

    /// Lines of the script
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.split(self.target.line_ending())
    }
}
