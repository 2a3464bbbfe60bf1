//! ghx Code Generation
//!
//! This crate turns a CI workflow into one linear script that can be read
//! or run locally.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐
//! │ Workflow │────▶│  Tables  │────▶│  Matrix  │────▶│  Script  │
//! │  (YAML)  │     │ (inputs, │     │  × steps │     │ (sh/bat) │
//! └──────────┘     │   jobs)  │     └──────────┘     └──────────┘
//!                  └──────────┘
//! ```
//!
//! For every job, in declaration order, the matrix is expanded, the `run:`
//! steps are collected, and each combination whose runner resolves to
//! `ubuntu-latest` gets its steps rewritten line by line for the target
//! dialect.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghx_codegen::{CompileOptions, Compiler, ScriptTarget};
//!
//! let compiler = Compiler::new(CompileOptions::for_target(ScriptTarget::Shell));
//! let script = compiler.compile_file(".github/workflows/ci.yml")?;
//! println!("{}", script.body);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assembler;
pub mod compiler;
pub mod error;
pub mod inputs;
pub mod jobs;
pub mod matrix;
pub mod patterns;
pub mod placeholder;
pub mod runner;
pub mod steps;
pub mod table;
pub mod transform;

pub use compiler::{CompileOptions, CompiledScript, Compiler, ScriptTarget};
pub use error::{Error, Result};
pub use inputs::{InputDefinition, InputTable};
pub use jobs::{JobDefinition, JobTable};
pub use matrix::MatrixCombination;
