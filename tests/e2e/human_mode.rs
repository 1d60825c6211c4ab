//! Human-mode end-to-end tests.

use crate::common::cli::CliRunner;
use crate::common::fixtures::RingDir;
use crate::common::init_test_logging;

#[test]
fn bare_invocation_rotates_and_prints_done() {
    init_test_logging();
    let ring = RingDir::new();
    let cam = ring.capture(30);

    CliRunner::new()
        .with_working_dir(ring.path())
        .run(&[])
        .assert_success()
        .assert_stdout_contains("done");

    assert_eq!(ring.slot(1), Some(cam));
}

#[test]
fn dir_flag_targets_other_directory() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"remote");
    let dir = ring.path().to_str().unwrap();

    CliRunner::new()
        .run(&["rotate", "--dir", dir])
        .assert_success();

    assert_eq!(ring.slot(1).as_deref(), Some(&b"remote"[..]));
}

#[test]
fn dir_from_environment() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"env");

    CliRunner::new()
        .with_env("SNAPRING_DIR", ring.path().to_str().unwrap())
        .run(&["rotate"])
        .assert_success();

    assert_eq!(ring.slot(1).as_deref(), Some(&b"env"[..]));
}

#[test]
fn no_color_env_convention_still_rotates() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"cam");

    CliRunner::new()
        .with_working_dir(ring.path())
        .with_env("NO_COLOR", "1")
        .run(&["rotate"])
        .assert_success()
        .assert_stdout_contains("done");

    assert_eq!(ring.slot(1).as_deref(), Some(&b"cam"[..]));
}

#[test]
fn quiet_rotation_prints_nothing() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"cam");

    CliRunner::new()
        .with_working_dir(ring.path())
        .run(&["-q", "rotate"])
        .assert_success()
        .assert_stdout_is_empty();
}

#[test]
fn dry_run_lists_steps_and_changes_nothing() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"cam");
    ring.write_slot(4, b"four");
    ring.write_slot(1, b"one");

    CliRunner::new()
        .with_working_dir(ring.path())
        .run(&["--no-color", "rotate", "--dry-run"])
        .assert_success()
        .assert_stdout_contains("DRY RUN")
        .assert_stdout_contains("delete")
        .assert_stdout_contains("snap1.jpg -> ")
        .assert_stdout_contains("cam.jpg -> ");

    assert_eq!(ring.snap_files(), vec!["snap1.jpg", "snap4.jpg"]);
}

#[test]
fn missing_camera_image_exits_with_hint() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_slot(1, b"one");

    CliRunner::new()
        .with_working_dir(ring.path())
        .run(&["--no-color"])
        .assert_exit_code(1)
        .assert_stderr_contains("Source image not found")
        .assert_stderr_contains("Hint");

    assert_eq!(ring.snap_files(), vec!["snap1.jpg"]);
}

#[test]
fn status_lists_every_slot() {
    init_test_logging();
    let ring = RingDir::new();
    ring.write_cam(b"cam");
    ring.write_slot(2, b"two");

    CliRunner::new()
        .with_working_dir(ring.path())
        .run(&["--no-color", "status"])
        .assert_success()
        .assert_stdout_contains("1/4 slots")
        .assert_stdout_contains("snap2.jpg")
        .assert_stdout_contains("(empty)");
}

#[test]
fn version_prints_package_version() {
    init_test_logging();
    CliRunner::new()
        .run(&["version"])
        .assert_success()
        .assert_stdout_contains(env!("CARGO_PKG_VERSION"));
}
