//! relup-core: release preparation for a locally-built application
//!
//! The release flow is four steps, run in order with no retries:
//!
//! 1. **Terminate**: stop any running instance of the application so its
//!    binary and config can be replaced. Best-effort; never fails the run.
//! 2. **Prepare**: create the build output directories if absent.
//! 3. **Link**: ensure the project's config file is hard-linked into each
//!    output directory, so edits to the source are immediately visible at
//!    every output location without file duplication. A stale single-link
//!    copy at a target path is purged and relinked.
//! 4. **Build**: invoke the external build tool and propagate its exit
//!    status. A non-zero exit aborts the run.
//!
//! [`release::release`] drives the pipeline over a [`layout::ProjectLayout`],
//! with process termination behind the [`terminate::ProcessTerminator`]
//! capability so platforms and tests can substitute their own.

pub mod invoke;
pub mod layout;
pub mod links;
pub mod output;
pub mod release;
pub mod terminate;
