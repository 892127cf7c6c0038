//! Module template tree rendering.
//!
//! Resolves a logical `module/sub/path` reference against an ordered module
//! search path, walks the matching `module/templates/sub/path` directory, renders
//! every file as a template and describes the files and directories that
//! should exist under a destination directory.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]** — search path, template variables and the invocation request
//! - **[`resolver`]** — first-match lookup of a [`source::SourceReference`]
//! - **[`walker`]** — lazy, deterministic traversal of the resolved tree
//! - **[`template`]** — the [`template::TemplateEngine`] seam and its `tera` backend
//! - **[`resources`]** — file/directory descriptors and their defaulting rules
//! - **[`operations`]** — the `recurse_directory` fold tying it all together
//! - **[`commands`]** — command-line orchestration and JSON output
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod resolver;
pub mod resources;
pub mod source;
pub mod template;
pub mod walker;
