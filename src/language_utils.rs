use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language utilities for the fixed set of supported languages
///
/// The translator only offers a closed list of languages. Codes are stored
/// in the history table in their ISO 639-1 form ("ru", "en", ...), while
/// user input may use ISO 639-1, ISO 639-2 or the English language name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Russian
    #[serde(rename = "ru")]
    Russian,
    /// English
    #[serde(rename = "en")]
    English,
    /// Japanese
    #[serde(rename = "ja")]
    Japanese,
    /// German
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// All supported languages in the order they are offered to the user
    pub const ALL: [Language; 4] = [
        Language::Russian,
        Language::English,
        Language::Japanese,
        Language::German,
    ];

    /// ISO 639-1 code as persisted in the store
    pub fn code(&self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English => "en",
            Self::Japanese => "ja",
            Self::German => "de",
        }
    }

    /// English display name
    pub fn display_name(&self) -> String {
        get_language_name(self.code()).unwrap_or_else(|_| self.code().to_string())
    }

    /// Tag handed to the speech recognizer, e.g. "EN-en"
    pub fn recognition_tag(&self) -> String {
        format!("{}-{}", self.code().to_uppercase(), self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();

        // Exact code or English name first
        if let Some(lang) = Self::ALL.iter().find(|l| {
            l.code() == normalized || l.display_name().to_lowercase() == normalized
        }) {
            return Ok(*lang);
        }

        // Fall back to ISO 639-2 forms such as "eng" or "ger"
        let part1 = normalize_to_part1(&normalized)?;
        Self::ALL
            .iter()
            .find(|l| l.code() == part1)
            .copied()
            .ok_or_else(|| anyhow!("Unsupported language: {}", s))
    }
}

/// Normalize an ISO 639-1 or ISO 639-2 code to its ISO 639-1 form
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if IsoLanguage::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        // ISO 639-2/B codes that differ from ISO 639-2/T
        let part2t = match normalized_code.as_str() {
            "ger" => "deu",
            "fre" => "fra",
            "dut" => "nld",
            "chi" => "zho",
            _ => normalized_code.as_str(),
        };

        if let Some(lang) = IsoLanguage::from_639_3(part2t) {
            if let Some(code_639_1) = lang.to_639_1() {
                return Ok(code_639_1.to_string());
            }
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let part1 = normalize_to_part1(code)?;
    let lang = IsoLanguage::from_639_1(&part1)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", part1))?;

    Ok(lang.to_name().to_string())
}
