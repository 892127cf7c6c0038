//! The `recurse_directory` operation.
//!
//! Resolves the request's source reference, walks the template tree once and
//! folds every entry into an [`OutputMapping`]. Any failure aborts the fold,
//! so callers get either the complete mapping or an error, never a partial
//! result.
use crate::config::{Request, SearchPath};
use crate::error::RecurseError;
use crate::resolver;
use crate::resources::{self, OutputMapping};
use crate::source::SourceReference;
use crate::template::{self, TemplateEngine};
use crate::walker::{self, EntryKind};

/// Render the template tree named by `request` into resource descriptors.
///
/// When two entries map to the same destination (for example `app.conf`
/// next to `app.conf.erb`) the one walked later wins and a warning is logged.
///
/// # Errors
///
/// Returns a [`RecurseError`] if the reference is malformed or cannot be
/// resolved, the tree cannot be walked, or any template fails to render.
pub fn recurse_directory(
    request: &Request,
    search: &SearchPath,
    engine: &dyn TemplateEngine,
) -> Result<OutputMapping, RecurseError> {
    let reference = SourceReference::parse(&request.source_dir)?;
    let root = resolver::resolve(&reference, search)?;
    let attrs = request.attributes();

    let mapping = walker::walk(root.path()).try_fold(
        OutputMapping::new(),
        |mut mapping, entry| -> Result<OutputMapping, RecurseError> {
            let entry = entry?;
            let content = match entry.kind() {
                EntryKind::File => {
                    tracing::debug!("file in loop {entry}");
                    Some(template::render(entry.path(), engine)?)
                }
                EntryKind::Directory => {
                    tracing::debug!("directory in loop {entry}");
                    None
                }
            };

            let (key, descriptor) =
                resources::assemble(&entry, content, &request.destination_dir, &attrs);
            tracing::debug!("{} {key}", descriptor.ensure());
            if mapping.insert(key.clone(), descriptor).is_some() {
                tracing::warn!("{entry} overwrites an earlier resource for {key}");
            }
            Ok(mapping)
        },
    )?;

    tracing::debug!("source dir {}", request.source_dir);
    tracing::debug!("destination dir {}", request.destination_dir);
    tracing::debug!("module dir {}", root.base().display());
    tracing::debug!("file path {}", root.path().display());
    tracing::debug!("{} resources", mapping.len());
    Ok(mapping)
}
