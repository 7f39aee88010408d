/*!
 * Tests for language utilities
 */

use yatt::language_utils::{Language, get_language_name, normalize_to_part1};

#[test]
fn test_code_shouldMatchPersistedCodes() {
    let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
    assert_eq!(codes, vec!["ru", "en", "ja", "de"]);
}

#[test]
fn test_fromStr_withNamesAndPart2Codes_shouldParse() {
    assert_eq!("German".parse::<Language>().unwrap(), Language::German);
    assert_eq!("ger".parse::<Language>().unwrap(), Language::German);
    assert_eq!("deu".parse::<Language>().unwrap(), Language::German);
    assert_eq!(" JA ".parse::<Language>().unwrap(), Language::Japanese);
    assert_eq!("rus".parse::<Language>().unwrap(), Language::Russian);
}

#[test]
fn test_fromStr_withUnsupportedLanguage_shouldFail() {
    // Valid ISO code, but not offered by the translator
    assert!("fr".parse::<Language>().is_err());
    assert!("xx".parse::<Language>().is_err());
}

#[test]
fn test_recognitionTag_shouldUseUpperAndLowerCode() {
    assert_eq!(Language::English.recognition_tag(), "EN-en");
    assert_eq!(Language::Russian.recognition_tag(), "RU-ru");
}

#[test]
fn test_normalizeToPart1_withBibliographicCode_shouldConvert() {
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert!(normalize_to_part1("zz").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(Language::German.display_name(), "German");
}

#[test]
fn test_serde_shouldUseCodes() {
    let json = serde_json::to_string(&Language::Japanese).unwrap();
    assert_eq!(json, "\"ja\"");
    let parsed: Language = serde_json::from_str("\"de\"").unwrap();
    assert_eq!(parsed, Language::German);
}
