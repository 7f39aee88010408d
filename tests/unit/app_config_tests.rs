/*!
 * Tests for application configuration functionality
 */

use yatt::app_config::{Config, LogLevel, TranslationProvider};
use yatt::language_utils::Language;

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, Language::Russian);
    assert_eq!(config.target_language, Language::English);
    assert_eq!(config.max_symbols, 3100);
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.timeout_secs, 30);
    assert!(config.database_path.is_none());
    assert!(config.speech.stt_command.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.translation.timeout_secs = 0;
    assert!(config.validate().is_err());
    config.translation.timeout_secs = 30;

    // The mock provider ignores the endpoint
    config.translation.provider = TranslationProvider::Mock;
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_ok());

    config.translation.provider = TranslationProvider::Google;
    assert!(config.validate().is_err());
}

/// Test that the same language on both sides is accepted
#[test]
fn test_configValidation_withSameLanguages_shouldOnlyWarn() {
    let config = Config {
        source_language: Language::German,
        target_language: Language::German,
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_saveAndLoad_shouldPreserveValues() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = common::test_config(temp_dir.path());
    config.source_language = Language::Japanese;
    config.max_symbols = 500;
    config.speech.stt_command = Some("whisper-cli".to_string());
    config.speech.stt_args = vec!["--language".to_string(), "{lang}".to_string()];
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.source_language, Language::Japanese);
    assert_eq!(loaded.max_symbols, 500);
    assert_eq!(loaded.translation.provider, TranslationProvider::Mock);
    assert_eq!(loaded.database_path, config.database_path);
    assert_eq!(loaded.speech.stt_command.as_deref(), Some("whisper-cli"));
    assert_eq!(loaded.speech.stt_args, config.speech.stt_args);
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_fromFile_withUnsupportedLanguage_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"source_language": "fr"}"#,
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_databasePath_withExplicitPath_shouldUseIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::test_config(temp_dir.path());

    assert_eq!(config.database_path().unwrap(), temp_dir.path().join("history.db"));
}
