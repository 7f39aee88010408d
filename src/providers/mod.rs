/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the external translator:
 * - Google: the public Google Translate web endpoint
 * - Mock: deterministic offline translator for tests and demos
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils::Language;

/// Common trait for all translation providers
///
/// The orchestrator only sees this interface, so providers can be used
/// interchangeably.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` from `source` to `target`
    ///
    /// # Returns
    /// * `Result<String, TranslationError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, TranslationError>;

    /// Short provider name for logging
    fn name(&self) -> &str;
}

/// Build the translator selected in the configuration
pub fn create_translator(config: &TranslationConfig) -> Box<dyn Translator> {
    match config.provider {
        TranslationProvider::Google => Box::new(google::GoogleTranslator::new(
            config.get_endpoint(),
            config.timeout_secs,
        )),
        TranslationProvider::Mock => Box::new(mock::MockTranslator::working()),
    }
}

pub mod google;
pub mod mock;
