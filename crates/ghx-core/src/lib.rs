//! ghx Core Library
//!
//! This crate provides the pieces of ghx that sit below the compiler:
//! - The document model boundary ([`DocumentNode`]) and its `serde_yaml` backing
//! - Workflow file loading
//! - Workspace layout (where workflows and templates live)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Workflow   │────▶│  Document   │────▶│  Compiler   │
//! │   (YAML)    │     │    Node     │     │  (codegen)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ghx_core::{WorkspaceConfig, Workflow};
//!
//! let workspace = WorkspaceConfig::new(".");
//! let path = workspace.resolve_workflow("build")?;
//! let workflow = Workflow::load(&path)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod error;
pub mod workflow;

pub use config::WorkspaceConfig;
pub use document::{DocumentNode, NodeKind};
pub use error::{Error, Result};
pub use workflow::Workflow;
