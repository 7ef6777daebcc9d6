use assert_fs::prelude::*;
use track_profile::config::{read_config_json, write_config_json};
use track_profile::{ProfileConfig, ProfileError, SlopeModel};

#[test]
fn write_then_read_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = dir.child("profile.json");
    let mut config = ProfileConfig::new("BOLOGOE_OSTASHKOV");
    config.options.reverse = true;
    config.options.sample_step = 2.0;
    write_config_json(path.path(), &config).unwrap();
    assert_eq!(read_config_json(path.path()).unwrap(), config);
}

#[test]
fn missing_config_is_io_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let err = read_config_json(dir.child("none.json").path()).unwrap_err();
    assert!(matches!(err, ProfileError::Io { .. }));
}

#[test]
fn configured_model_uses_options() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("ex4.txt").write_str("300 1\n700 -1\n").unwrap();
    dir.child("profile.json")
        .write_str(&format!(
            r#"{{ "source": "slope4", "data_dir": {:?}, "reverse": true, "cyclic": false }}"#,
            dir.path().to_str().unwrap()
        ))
        .unwrap();
    let config = read_config_json(dir.child("profile.json").path()).unwrap();
    let model = SlopeModel::load(&config).unwrap();
    assert!(!model.is_cyclic());
    assert_eq!(model.slope_at(10.0), -1.0);
    assert_eq!(model.slope_at(-10.0), 0.0);
    assert_eq!(model.total_length(), 1000);
}
