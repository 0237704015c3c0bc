//! Translation backend trait
//!
//! This module defines the `TranslationBackend` trait for provider
//! abstraction, so the pipeline can run against the HTTP backend in
//! production and a deterministic mock in tests without coupling the
//! service layer to either.

use crate::language::Language;
use crate::pipeline::error::TranslateResult;
use async_trait::async_trait;

/// Generic trait for translation backends
///
/// Implementations handle the actual translation work, whether through a
/// network round trip ([`crate::pipeline::HttpBackend`]) or deterministic
/// logic ([`crate::pipeline::MockBackend`]).
///
/// All methods are async to support I/O-bound implementations.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate a single text into the target language.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(TranslateError)` - If translation fails
    async fn translate(&self, text: &str, target: Language) -> TranslateResult<String>;

    /// Translate multiple texts in one operation.
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    /// - Each translation is independent
    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> TranslateResult<Vec<String>>;

    /// Name of this backend, used for logging and debugging.
    fn backend_name(&self) -> &str;
}
