use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::tempdir;

use relup_core::invoke::BuildCommand;
use relup_core::layout::ProjectLayout;
use relup_core::links::LinkOutcome;
use relup_core::release::release;
use relup_core::terminate::{NoopTerminator, ProcessTerminator};

/// Terminator that records the names it was asked to stop.
#[derive(Default)]
struct RecordingTerminator {
    seen: Mutex<Vec<String>>,
}

impl ProcessTerminator for RecordingTerminator {
    fn terminate_by_name(&self, name: &str) -> usize {
        self.seen.lock().expect("lock").push(name.to_owned());
        2
    }
}

fn scaffold_project(root: &Path, app: &str) -> PathBuf {
    let project = root.join(app);
    fs::create_dir_all(project.join("config")).expect("config dir");
    fs::write(
        project.join("config").join(format!("{app}.toml")),
        b"greeting = \"hi\"\n",
    )
    .expect("config file");
    project
}

#[cfg(unix)]
#[test]
fn full_run_links_config_and_reports() {
    let tmp = tempdir().expect("tempdir");
    let project = scaffold_project(tmp.path(), "sticks");

    let layout = ProjectLayout::discover(&project).expect("layout");
    let build = BuildCommand::parse("true", layout.root()).expect("build cmd");
    let terminator = RecordingTerminator::default();

    let report = release(&layout, &terminator, &build).expect("release");

    assert_eq!(report.app_name, "sticks");
    assert_eq!(report.terminated, 2);
    assert_eq!(report.links.len(), 1);
    assert_eq!(report.links[0].outcome, LinkOutcome::Created);
    assert_eq!(terminator.seen.lock().expect("lock").as_slice(), ["sticks"]);

    let linked = project.join("out/release/sticks.toml");
    assert_eq!(
        fs::read(&linked).expect("read link"),
        b"greeting = \"hi\"\n"
    );
}

#[cfg(unix)]
#[test]
fn missing_output_directories_are_created_in_full() {
    let tmp = tempdir().expect("tempdir");
    let project = scaffold_project(tmp.path(), "sticks");

    let layout = ProjectLayout::discover(&project)
        .expect("layout")
        .with_output_dirs(vec![PathBuf::from("deep/nested/stage")]);
    let build = BuildCommand::parse("true", layout.root()).expect("build cmd");

    release(&layout, &NoopTerminator, &build).expect("release");

    assert!(project.join("deep/nested/stage/sticks.toml").is_file());
}

#[cfg(unix)]
#[test]
fn second_run_is_idempotent() {
    let tmp = tempdir().expect("tempdir");
    let project = scaffold_project(tmp.path(), "sticks");

    let layout = ProjectLayout::discover(&project).expect("layout");
    let build = BuildCommand::parse("true", layout.root()).expect("build cmd");

    let first = release(&layout, &NoopTerminator, &build).expect("first run");
    let second = release(&layout, &NoopTerminator, &build).expect("second run");

    assert_eq!(first.links[0].outcome, LinkOutcome::Created);
    assert_eq!(second.links[0].outcome, LinkOutcome::AlreadyPresent);
}

#[cfg(unix)]
#[test]
fn stale_copy_in_output_is_replaced() {
    use std::os::unix::fs::MetadataExt;

    let tmp = tempdir().expect("tempdir");
    let project = scaffold_project(tmp.path(), "sticks");

    let stale = project.join("out/release/sticks.toml");
    fs::create_dir_all(stale.parent().expect("parent")).expect("out dir");
    fs::write(&stale, b"stale\n").expect("stale copy");

    let layout = ProjectLayout::discover(&project).expect("layout");
    let build = BuildCommand::parse("true", layout.root()).expect("build cmd");

    let report = release(&layout, &NoopTerminator, &build).expect("release");

    assert_eq!(report.links[0].outcome, LinkOutcome::Healed);

    let source_ino = fs::metadata(layout.config_source()).expect("source meta").ino();
    let target_ino = fs::metadata(&stale).expect("target meta").ino();
    assert_eq!(source_ino, target_ino);
}

#[cfg(unix)]
#[test]
fn build_failure_aborts_the_run() {
    let tmp = tempdir().expect("tempdir");
    let project = scaffold_project(tmp.path(), "sticks");

    let layout = ProjectLayout::discover(&project).expect("layout");
    let build = BuildCommand::parse("false", layout.root()).expect("build cmd");

    let err = release(&layout, &NoopTerminator, &build).unwrap_err();
    assert!(err.to_string().contains("exited with status 1"));

    // Earlier steps are not compensated: the link survives the failure.
    assert!(project.join("out/release/sticks.toml").is_file());
}

#[cfg(unix)]
#[test]
fn missing_config_source_fails_before_the_build() {
    let tmp = tempdir().expect("tempdir");
    let project = tmp.path().join("sticks");
    fs::create_dir_all(&project).expect("project dir");

    let layout = ProjectLayout::discover(&project).expect("layout");
    // A build command that would fail loudly if it ever ran.
    let build = BuildCommand::parse("false", layout.root()).expect("build cmd");

    let err = release(&layout, &NoopTerminator, &build).unwrap_err();
    assert!(err.to_string().contains("config source missing"));
}
