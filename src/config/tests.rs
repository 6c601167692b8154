use super::{ApiConfig, Config, ConfigError};

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

#[test]
fn test_missing_sections_fall_back_to_defaults() -> Result<()> {
    let config = Config::from_toml("")?;

    assert_eq!(config.api, ApiConfig::default());

    Ok(())
}

#[test]
fn test_file_values_replace_defaults() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "[api]")?;
    writeln!(file, "base_url = \"https://admin.example.test\"")?;
    writeln!(file, "menu = \"water\"")?;
    writeln!(file, "token = \"secret\"")?;

    let config = Config::from_file(file.path())?;

    assert_eq!(config.api.base_url, "https://admin.example.test");
    assert_eq!(config.api.menu, "water");
    assert_eq!(config.api.token.as_deref(), Some("secret"));
    assert_eq!(config.api.commit_path, ApiConfig::default().commit_path);

    Ok(())
}

#[test]
fn test_empty_base_url_is_rejected() {
    let result = Config::from_toml("[api]\nbase_url = \" \"\n");

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_malformed_toml_is_reported() {
    assert!(matches!(Config::from_toml("[api\n"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_unreadable_file_is_reported() {
    let result = Config::from_file(std::path::Path::new("does/not/exist.toml"));

    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_overrides_ignore_blank_values() -> Result<()> {
    let mut config = Config::from_toml("")?;
    config.apply_overrides(Some("https://override.test".to_string()), Some("  ".to_string()));

    assert_eq!(config.api.base_url, "https://override.test");
    assert!(config.api.token.is_none());

    Ok(())
}
