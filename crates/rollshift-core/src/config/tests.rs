//! Tests for config loading

use super::*;
use crate::models::{GammaSetting, PipelineMode, WhiteBalanceMethod};

#[test]
fn test_default_yaml_round_trips() {
    let yaml = default_config_yaml().unwrap();
    assert!(yaml.starts_with("# rollshift pipeline configuration"));

    let parsed: PipelineConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, PipelineConfig::default());
}

#[test]
fn test_read_config_file_partial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(
        &path,
        "mode: manual\nwhite_balance: lab\ngamma: adaptive\nclahe:\n  tile_grid: 4\n",
    )
    .unwrap();

    let config = read_config_file(&path).unwrap();
    assert_eq!(config.mode, PipelineMode::Manual);
    assert_eq!(config.white_balance, WhiteBalanceMethod::Lab);
    assert_eq!(config.gamma, GammaSetting::Adaptive);
    assert_eq!(config.clahe.tile_grid, 4);
    assert_eq!(config.clahe.clip_limit, 2.0);
    assert_eq!(config.manual_gamma, 0.5);
}

#[test]
fn test_read_config_file_rejects_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, "gamma: 7.0\n").unwrap();

    match read_config_file(&path) {
        Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "gamma"),
        other => panic!("expected out of range, got {:?}", other),
    }
}

#[test]
fn test_read_config_file_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.yml");
    fs::write(&path, "mode: [not, a, mode]\n").unwrap();

    assert!(matches!(
        read_config_file(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_read_config_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_config_file(&dir.path().join("absent.yml")),
        Err(ConfigError::Read { .. })
    ));
}

#[test]
fn test_load_prefers_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.yml");
    fs::write(&path, "sharpen_amount: 0.75\n").unwrap();

    let handle = load_pipeline_config(Some(&path));
    assert_eq!(handle.config.sharpen_amount, 0.75);
    assert_eq!(handle.source, Some(fs::canonicalize(&path).unwrap()));
    assert!(handle.warnings.is_empty());
}

#[test]
fn test_load_invalid_explicit_path_warns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "denoise_strength: -1\n").unwrap();

    let handle = load_pipeline_config(Some(&path));
    assert!(handle.source.as_deref() != Some(path.as_path()));
    assert!(handle.warnings[0].contains("denoise_strength"));
}

#[test]
fn test_load_missing_explicit_path_warns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yml");

    let handle = load_pipeline_config(Some(&path));
    assert!(handle.warnings[0].contains("does not exist"));
}

#[test]
fn test_save_config_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("pipeline.yml");
    let config = PipelineConfig {
        denoise_strength: 4.0,
        ..PipelineConfig::default()
    };

    save_config(&path, &config).unwrap();
    assert_eq!(read_config_file(&path).unwrap(), config);
}

#[test]
fn test_candidates_start_with_explicit_path() {
    let explicit = Path::new("/tmp/explicit.yml");
    let candidates = config_candidates(Some(explicit));
    assert_eq!(candidates[0], explicit);
    assert!(candidates
        .iter()
        .any(|c| c.ends_with(Path::new("config").join("pipeline.yml"))));
}
