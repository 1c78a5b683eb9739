//! The release pipeline: terminate, prepare outputs, link config, build

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::invoke::BuildCommand;
use crate::layout::ProjectLayout;
use crate::links::{ensure_config_link, ensure_dir, LinkOutcome};
use crate::terminate::ProcessTerminator;

/// Per-target result of the link step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkReport {
    pub target: PathBuf,
    pub outcome: LinkOutcome,
}

/// Summary of one completed release run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseReport {
    pub app_name: String,
    pub terminated: usize,
    pub links: Vec<LinkReport>,
    pub build_command: String,
}

/// Run the four release steps in order.
///
/// The terminate step is best-effort and never fails the run. Directory and
/// link maintenance errors are fatal, as is a non-zero exit from the build
/// command. Nothing is rolled back on failure.
pub fn release(
    layout: &ProjectLayout,
    terminator: &dyn ProcessTerminator,
    build: &BuildCommand,
) -> Result<ReleaseReport> {
    let terminated = terminator.terminate_by_name(layout.app_name());

    let source = layout.config_source();
    let mut links = Vec::new();

    for dir in layout.output_dirs() {
        ensure_dir(&dir)?;

        let target = layout.link_target(&dir);
        let outcome = ensure_config_link(&source, &target)?;
        debug!(target = %target.display(), ?outcome, "config link ensured");
        links.push(LinkReport { target, outcome });
    }

    build.run()?;

    info!(app = layout.app_name(), "release prepared");
    Ok(ReleaseReport {
        app_name: layout.app_name().to_owned(),
        terminated,
        links,
        build_command: build.rendered(),
    })
}
