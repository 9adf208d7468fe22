use std::fs;
use std::io::Write as _;

use taglog::config::{ConfigError, TagValueConfig, load_config};

#[test]
fn test_full_config_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taglog.toml");
    fs::write(
        &path,
        r#"
console = true

[file]
path = "logs/application.log"
max_size = 10000000
rollover_count = 5

[[default_tag]]
key = "log_level"
value = "info"

[[default_tag]]
key = "cache_hit"
value = false
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert!(config.console);
    let file = config.file.expect("file sink configured");
    assert_eq!(file.path, "logs/application.log");
    assert_eq!(file.max_size, Some(10_000_000));
    assert_eq!(file.rollover_count, 5);
    assert_eq!(config.default_tags.len(), 2);
    assert_eq!(config.default_tags[0].key, "log_level");
    assert!(matches!(
        config.default_tags[1].value,
        TagValueConfig::Bool(false)
    ));
}

#[test]
fn test_empty_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = load_config(&path).unwrap();
    assert!(!config.console);
    assert!(config.file.is_none());
    assert!(config.default_tags.is_empty());
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    match load_config(&path) {
        Err(ConfigError::Read { path: reported, .. }) => {
            assert!(reported.contains("does-not-exist.toml"));
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "console = [not toml").unwrap();

    assert!(matches!(
        load_config(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_built_logger_carries_sinks_and_default_tags() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("built.log");
    let config_path = dir.path().join("taglog.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[file]
path = "{}"

[[default_tag]]
key = "log_level"
value = "info"

[[default_tag]]
key = "count"
value = 3
"#,
            log_path.display()
        ),
    )
    .unwrap();

    let logger = load_config(&config_path).unwrap().build();
    logger.log(&[]).append("configured");

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("log_level=\"info\""));
    assert!(content.contains("count=3"));
    assert!(content.contains("configured"));
}
