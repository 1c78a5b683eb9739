//! Best-effort process termination for relup-core

use std::ffi::OsStr;

use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

/// Capability seam for stopping a running instance of the application
/// before its binary and config are replaced.
///
/// Implementations are best-effort: a missing process, a name with no
/// matches, or a kill the OS refuses must all fold into the returned count
/// rather than an error. The release never aborts here.
pub trait ProcessTerminator {
    /// Force-terminate every running process matching `name`; returns how
    /// many processes were signalled.
    fn terminate_by_name(&self, name: &str) -> usize;
}

/// Default terminator backed by the system process table.
///
/// Matches the bare executable name as well as the Windows `<name>.exe`
/// convention, ignoring ASCII case.
#[derive(Debug, Default)]
pub struct SystemTerminator;

impl ProcessTerminator for SystemTerminator {
    fn terminate_by_name(&self, name: &str) -> usize {
        let mut system = System::new_all();
        system.refresh_processes(ProcessesToUpdate::All, true);

        let mut killed = 0;
        for process in system.processes().values() {
            if matches_name(process.name(), name) && process.kill() {
                killed += 1;
            }
        }

        debug!(app = name, killed, "terminate step finished");
        killed
    }
}

/// Terminator that leaves every process alone. Used when the caller asks to
/// keep the running instance, and by tests.
#[derive(Debug, Default)]
pub struct NoopTerminator;

impl ProcessTerminator for NoopTerminator {
    fn terminate_by_name(&self, _name: &str) -> usize {
        0
    }
}

fn matches_name(process_name: &OsStr, app: &str) -> bool {
    let Some(name) = process_name.to_str() else {
        return false;
    };

    let lowered = name.to_ascii_lowercase();
    let stem = lowered.strip_suffix(".exe").unwrap_or(&lowered);
    stem.eq_ignore_ascii_case(app)
}

#[cfg(test)]
mod tests {
    use super::{matches_name, NoopTerminator, ProcessTerminator};
    use std::ffi::OsStr;

    #[test]
    fn matches_bare_and_exe_names() {
        assert!(matches_name(OsStr::new("sticks"), "sticks"));
        assert!(matches_name(OsStr::new("sticks.exe"), "sticks"));
        assert!(matches_name(OsStr::new("Sticks.EXE"), "sticks"));
        assert!(!matches_name(OsStr::new("sticks-helper"), "sticks"));
        assert!(!matches_name(OsStr::new("exe"), "sticks"));
    }

    #[test]
    fn exe_suffix_alone_is_not_a_match() {
        assert!(!matches_name(OsStr::new(".exe"), "sticks"));
    }

    #[test]
    fn noop_terminator_reports_zero() {
        assert_eq!(NoopTerminator.terminate_by_name("anything"), 0);
    }
}
