//! Translation service
//!
//! The policy layer tying backend, cache and fallback table together.
//! Its operations are total: a network failure, a malformed response, or a
//! phrase missing from the fallback table all degrade to the best available
//! text — the table's translation, else the untranslated input. A reader
//! always sees some text; nothing here surfaces an error to the rendering
//! layer.

use crate::language::Language;
use crate::pipeline::cache::TranslationCache;
use crate::pipeline::fallback::FallbackTable;
use crate::pipeline::translator::TranslationBackend;
use std::sync::Arc;
use tracing::{debug, warn};

/// Memoizing, never-failing front to a [`TranslationBackend`]
///
/// Repeated calls with the same arguments return the same result (subject
/// to cache) and never mutate the input. Degraded results are not cached,
/// so a backend that recovers serves real translations on the next request.
pub struct TranslationService {
    backend: Arc<dyn TranslationBackend>,
    cache: TranslationCache,
    fallback: FallbackTable,
}

impl TranslationService {
    /// Service with the built-in textbook fallback table.
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::with_fallback(backend, FallbackTable::builtin())
    }

    pub fn with_fallback(backend: Arc<dyn TranslationBackend>, fallback: FallbackTable) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
            fallback,
        }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Translate one text. Total: always returns a string.
    ///
    /// Identity for the source language and for blank input; cached results
    /// are served without a round trip; backend failures degrade to the
    /// fallback table or the input itself.
    pub async fn translate(&self, text: &str, target: Language) -> String {
        if target.is_source() || text.trim().is_empty() {
            return text.to_string();
        }

        if let Some(cached) = self.cache.get(text, target) {
            debug!(target_lang = target.code(), "cache hit");
            return cached;
        }

        match self.backend.translate(text, target).await {
            Ok(translated) => {
                self.cache.put(text, target, translated.clone());
                translated
            }
            Err(err) => {
                warn!(
                    backend = self.backend.backend_name(),
                    %err,
                    "translation degraded to fallback table"
                );
                self.fallback.resolve(text)
            }
        }
    }

    /// Translate many texts, preserving input order.
    ///
    /// Cache hits are served locally; only the misses travel in a single
    /// bulk request. On backend failure every miss resolves through the
    /// fallback table individually.
    pub async fn translate_batch(&self, texts: &[String], target: Language) -> Vec<String> {
        if target.is_source() {
            return texts.to_vec();
        }

        let mut results: Vec<Option<String>> = Vec::with_capacity(texts.len());
        let mut miss_indices = Vec::new();
        let mut miss_texts = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                results.push(Some(text.clone()));
            } else if let Some(cached) = self.cache.get(text, target) {
                results.push(Some(cached));
            } else {
                results.push(None);
                miss_indices.push(i);
                miss_texts.push(text.clone());
            }
        }

        if !miss_texts.is_empty() {
            match self.backend.translate_batch(&miss_texts, target).await {
                Ok(translated) if translated.len() == miss_texts.len() => {
                    for (slot, (text, value)) in miss_indices
                        .iter()
                        .zip(miss_texts.iter().zip(translated.into_iter()))
                    {
                        self.cache.put(text, target, value.clone());
                        results[*slot] = Some(value);
                    }
                }
                Ok(translated) => {
                    warn!(
                        backend = self.backend.backend_name(),
                        sent = miss_texts.len(),
                        received = translated.len(),
                        "bulk response length mismatch, degrading to fallback table"
                    );
                    for (slot, text) in miss_indices.iter().zip(&miss_texts) {
                        results[*slot] = Some(self.fallback.resolve(text));
                    }
                }
                Err(err) => {
                    warn!(
                        backend = self.backend.backend_name(),
                        %err,
                        "bulk translation degraded to fallback table"
                    );
                    for (slot, text) in miss_indices.iter().zip(&miss_texts) {
                        results[*slot] = Some(self.fallback.resolve(text));
                    }
                }
            }
        }

        results
            .into_iter()
            .map(|r| r.unwrap_or_default())
            .collect()
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("backend", &self.backend.backend_name())
            .field("cached_entries", &self.cache.len())
            .field("fallback_entries", &self.fallback.len())
            .finish()
    }
}
