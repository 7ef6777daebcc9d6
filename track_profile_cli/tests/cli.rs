use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const TRACK: &str = "\
1000 0
1000 5
semaphores:
900 Ch1
stations:
50 200 North Yard
";

fn track_file() -> assert_fs::NamedTempFile {
    let file = assert_fs::NamedTempFile::new("track.txt").unwrap();
    file.write_str(TRACK).unwrap();
    file
}

fn cli() -> Command {
    Command::cargo_bin("track_profile_cli").unwrap()
}

#[test]
fn info_command() {
    let file = track_file();
    cli()
        .args(["info", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Length: 2000"))
        .stdout(predicate::str::contains("Segments: 2"))
        .stdout(predicate::str::contains("Signals: 1"))
        .stdout(predicate::str::contains("Stations: 1"))
        .stdout(predicate::str::contains("Four-digit blocking: no"));
}

#[test]
fn slope_command_smooth_and_raw() {
    let file = track_file();
    let path = file.path().to_str().unwrap();
    cli()
        .args(["slope", path, "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at 500.000: 0.000"));
    cli()
        .args(["slope", path, "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at 1000.000: 2.500"));
    cli()
        .args(["slope", path, "999", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at 999.000: 0.000"));
}

#[test]
fn negative_distance_wraps_on_cyclic_track() {
    let file = track_file();
    cli()
        .args(["slope", file.path().to_str().unwrap(), "-100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at -100.000: 5.000"));
}

#[test]
fn reverse_flag_flips_track() {
    let file = track_file();
    cli()
        .args(["--reverse", "slope", file.path().to_str().unwrap(), "10", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at 10.000: 5.000"));
}

#[test]
fn elevation_command_respects_cyclic_flag() {
    let file = track_file();
    let path = file.path().to_str().unwrap();
    cli()
        .args(["--no-cyclic", "elevation", path, "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elevation at 2000.000: 5.02"));
    cli()
        .args(["elevation", path, "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elevation at 2000.000: 0.000"));
}

#[test]
fn sample_command_covers_whole_track() {
    let file = track_file();
    let assert = cli()
        .args(["--no-cyclic", "sample", file.path().to_str().unwrap(), "--step", "500"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.000,0.000,0.000\n"))
        .stdout(predicate::str::contains("2000.000,5.000,5.02"));
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(out.lines().count(), 5);
}

#[test]
fn signals_and_stations_commands() {
    let file = track_file();
    let path = file.path().to_str().unwrap();
    cli()
        .args(["signals", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("900,Ch1"));
    cli()
        .args(["stations", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("50,200,North Yard"));
}

#[test]
fn missing_profile_is_not_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let missing = dir.child("missing.txt");
    cli()
        .args(["info", missing.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile loaded"));
    cli()
        .args(["slope", missing.path().to_str().unwrap(), "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Slope at 10.000: 0.000"));
}

#[test]
fn corrupt_profile_fails() {
    let file = assert_fs::NamedTempFile::new("bad.txt").unwrap();
    file.write_str("1000 up\n").unwrap();
    cli()
        .args(["info", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1: invalid grade `up`"));
}

#[test]
fn list_command_uses_data_dir() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("ex1.txt").write_str(TRACK).unwrap();
    cli()
        .args(["--data-dir", dir.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slope1"))
        .stdout(predicate::str::is_match(r"slope2\t.*ex2\.txt \(missing\)").unwrap())
        .stdout(predicate::str::contains("MSK_BOLOGOE"));
}

#[test]
fn catalogue_name_resolves_in_data_dir() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("ex1.txt").write_str(TRACK).unwrap();
    cli()
        .args(["--data-dir", dir.path().to_str().unwrap(), "info", "slope1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source='slope1'"))
        .stdout(predicate::str::contains("Length: 2000"));
}

#[test]
fn export_command_writes_reversed_profile() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("in.txt");
    input.write_str(TRACK).unwrap();
    let output = dir.child("out.txt");
    cli()
        .args([
            "--reverse",
            "export",
            input.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 segments"));
    output.assert(predicate::str::starts_with("1000 5\n1000 0\nsemaphores:\n"));
    dir.close().unwrap();
}

#[test]
fn config_file_supplies_options() {
    let dir = assert_fs::TempDir::new().unwrap();
    let track = dir.child("track.txt");
    track.write_str(TRACK).unwrap();
    let config = dir.child("profile.json");
    config
        .write_str(r#"{ "source": "unused", "cyclic": false, "sample_step": 5.0 }"#)
        .unwrap();
    cli()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "elevation",
            track.path().to_str().unwrap(),
            "2000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elevation at 2000.000: 5.0"));
}

#[test]
fn sample_command_rejects_bad_step() {
    let file = track_file();
    let path = file.path().to_str().unwrap();
    for step in ["0", "-5", "NaN"] {
        cli()
            .args(["sample", path, "--step", step])
            .assert()
            .failure()
            .stderr(predicate::str::contains("sample step"));
    }
}
