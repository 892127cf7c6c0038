//! Command orchestration: turn parsed arguments into a printed mapping.
use anyhow::{Context as _, Result, bail};
use std::io::Write;

use crate::cli::Cli;
use crate::config::{SearchPath, Variables};
use crate::operations;
use crate::resources::OutputMapping;
use crate::template::TeraEngine;

/// Load variables, resolve the module path, render the tree and write the
/// mapping as JSON to `out`.
///
/// # Errors
///
/// Returns an error if the variables cannot be loaded, rendering fails, or
/// the mapping cannot be written.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let variables = load_variables(cli)?;
    tracing::debug!("{} template variables", variables.len());

    let search = SearchPath::from_args(cli.modulepath.as_deref())?;
    tracing::debug!("module path has {} entries", search.len());

    let request = cli.request();
    let engine = TeraEngine::new(&variables);
    let mapping = operations::recurse_directory(&request, &search, &engine)
        .with_context(|| format!("rendering {} into {}", request.source_dir, request.destination_dir))?;

    write_mapping(&mapping, cli.compact, out)
}

/// Merge the `--vars` file with `--var` assignments, the latter winning.
fn load_variables(cli: &Cli) -> Result<Variables> {
    let mut variables = match &cli.vars_file {
        Some(path) if !path.exists() => {
            bail!("template variables file {} does not exist", path.display())
        }
        Some(path) => Variables::load(path)
            .with_context(|| format!("loading template variables from {}", path.display()))?,
        None => Variables::new(),
    };
    for assignment in &cli.vars {
        variables.assign(assignment)?;
    }
    Ok(variables)
}

/// Serialize `mapping` as JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_mapping(mapping: &OutputMapping, compact: bool, out: &mut impl Write) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, mapping)
    } else {
        serde_json::to_writer_pretty(&mut *out, mapping)
    }
    .context("serializing resource mapping")?;
    writeln!(out).context("writing resource mapping")?;
    Ok(())
}
