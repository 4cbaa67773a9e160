#[cfg(test)]
mod tests {
    use notewise_config::ConfigLoader;
    use notewise_config::schema::*;
    use std::io::Write;
    use std::path::PathBuf;

    // ── Default tests ──────────────────────────────────────────

    #[test]
    fn test_notewise_config_defaults() {
        let config = NotewiseConfig::default();
        assert_eq!(config.extract.notes_path, PathBuf::from("meeting_notes.txt"));
        assert_eq!(config.extract.model, "gemini-pro");
        assert_eq!(config.extract.max_output_tokens, 2048);
        assert_eq!(config.extract.temperature, 0.2);
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
    }

    #[test]
    fn test_services_config_defaults() {
        let config = ServicesConfig::default();
        assert!(config.google_api_key.is_none());
    }

    // ── TOML roundtrip tests ───────────────────────────────────

    #[test]
    fn test_config_toml_roundtrip() {
        let config = NotewiseConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: NotewiseConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored.extract.model, config.extract.model);
        assert_eq!(restored.extract.notes_path, config.extract.notes_path);
        assert_eq!(restored.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml_str = r#"
[extract]
model = "gemini-1.5-flash"
"#;
        let config: NotewiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.extract.model, "gemini-1.5-flash");
        // Defaults should fill in
        assert_eq!(config.extract.notes_path, PathBuf::from("meeting_notes.txt"));
        assert_eq!(config.extract.max_output_tokens, 2048);
        assert_eq!(config.logging.format, "pretty");
    }

    // ── Validation tests ───────────────────────────────────────

    #[test]
    fn test_validate_defaults_pass() {
        let config = NotewiseConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model_is_error() {
        let mut config = NotewiseConfig::default();
        config.extract.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = NotewiseConfig::default();
        config.extract.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_key_is_only_a_warning() {
        let config = NotewiseConfig::default();
        let warnings = config.validate().unwrap();
        assert!(
            warnings
                .iter()
                .any(|w| w.field == "services.google_api_key"
                    && w.severity == WarningSeverity::Warning)
        );
    }

    // ── ConfigLoader tests ─────────────────────────────────────

    #[test]
    fn test_config_loader_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("notewise.toml");
        let mut f = std::fs::File::create(&config_path).unwrap();
        writeln!(
            f,
            r#"
[extract]
notes_path = "standup.txt"
model = "gemini-1.5-pro"
max_output_tokens = 512

[services]
google_api_key = "test-key"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        let config = loader.get();
        assert_eq!(config.extract.notes_path, PathBuf::from("standup.txt"));
        assert_eq!(config.extract.model, "gemini-1.5-pro");
        assert_eq!(config.extract.max_output_tokens, 512);
        assert_eq!(config.services.google_api_key.as_deref(), Some("test-key"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_loader_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        let config = loader.get();
        assert_eq!(config.extract.model, "gemini-pro");
        assert_eq!(loader.path(), config_path.as_path());
    }

    #[test]
    fn test_config_loader_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("notewise.toml");
        std::fs::write(
            &config_path,
            r#"
[extract]
model = ""
"#,
        )
        .unwrap();

        assert!(ConfigLoader::load(Some(config_path.as_path())).is_err());
    }

    #[test]
    fn test_config_file_key_beats_env() {
        // apply_env_overrides only fills the key when the file left it unset;
        // a file-provided key must survive.
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("notewise.toml");
        std::fs::write(
            &config_path,
            r#"
[services]
google_api_key = "from-file"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        assert_eq!(
            loader.get().services.google_api_key.as_deref(),
            Some("from-file")
        );
    }
}
