//! Hard-link maintenance between the config source and build outputs

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the link step did for one target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    /// No file occupied the target path; a fresh hard link was created.
    Created,
    /// A stale single-link file occupied the target; it was removed and
    /// replaced with a hard link to the source.
    Healed,
    /// The target already had more than one link, i.e. it is a live hard
    /// link. Left untouched.
    AlreadyPresent,
    /// The target exists but link counts cannot be inspected on this
    /// platform. Left untouched.
    LeftInPlace,
}

/// Create an output directory (and parents) if absent. Idempotent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))
}

/// Ensure `target` is a hard link to `source`.
///
/// A target with exactly one link is a disconnected copy (edits to the
/// source no longer show through it), so it is purged and relinked. A
/// target with more links is assumed to be the link we want and is left
/// alone, as is any pre-existing target on platforms where the link count
/// is unavailable.
pub fn ensure_config_link(source: &Path, target: &Path) -> Result<LinkOutcome> {
    if !source.exists() {
        return Err(anyhow!("config source missing: {}", source.display()));
    }

    if target.exists() {
        match link_count(target)? {
            Some(1) => {
                debug!(target = %target.display(), "purging stale single-link config");
                fs::remove_file(target)
                    .with_context(|| format!("removing stale config {}", target.display()))?;
            }
            Some(_) => return Ok(LinkOutcome::AlreadyPresent),
            None => return Ok(LinkOutcome::LeftInPlace),
        }

        link(source, target)?;
        return Ok(LinkOutcome::Healed);
    }

    link(source, target)?;
    Ok(LinkOutcome::Created)
}

fn link(source: &Path, target: &Path) -> Result<()> {
    fs::hard_link(source, target).with_context(|| {
        format!(
            "linking {} -> {}",
            target.display(),
            source.display()
        )
    })
}

#[cfg(unix)]
fn link_count(path: &Path) -> Result<Option<u64>> {
    use std::os::unix::fs::MetadataExt;

    let meta = fs::metadata(path)
        .with_context(|| format!("inspecting link count of {}", path.display()))?;
    Ok(Some(meta.nlink()))
}

#[cfg(not(unix))]
fn link_count(_path: &Path) -> Result<Option<u64>> {
    Ok(None)
}
