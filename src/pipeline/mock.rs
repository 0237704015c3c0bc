//! Mock translation backend for testing
//!
//! Deterministic, network-free backend for exercising the pipeline without
//! a running translation API. Besides the translation modes it records how
//! many backend requests were issued, which the cache and identity tests
//! rely on, and supports per-text delays so sibling translations can be
//! forced to complete out of submission order.

use crate::language::Language;
use crate::pipeline::error::{TranslateError, TranslateResult};
use crate::pipeline::translator::TranslationBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "hello" → "hello_ur"
    Suffix,
    /// Predefined (text, target) → translation; unknown pairs fall back
    /// to suffix behavior
    Mappings(HashMap<(String, Language), String>),
    /// Every request fails with this message
    Error(String),
    /// Return input unchanged
    NoOp,
}

/// Mock backend simulating translation scenarios
#[derive(Debug)]
pub struct MockBackend {
    mode: MockMode,
    /// Uniform simulated delay per request
    delay: Duration,
    /// Extra delay per specific text, for out-of-order completion tests
    text_delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl MockBackend {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
            text_delays: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock with a uniform simulated network delay per request.
    pub fn with_delay(mode: MockMode, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(mode)
        }
    }

    /// Attach per-text delays. Texts without an entry use the uniform delay.
    pub fn with_text_delays<I>(mut self, delays: I) -> Self
    where
        I: IntoIterator<Item = (String, Duration)>,
    {
        self.text_delays.extend(delays);
        self
    }

    /// Number of backend requests issued so far (single or batch each
    /// count as one).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self, text: &str) {
        let delay = self
            .text_delays
            .get(text)
            .copied()
            .unwrap_or(self.delay);
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
    }

    fn apply_translation(&self, text: &str, target: Language) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target.code())),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target);
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target.code())))
            }
            MockMode::Error(msg) => Err(TranslateError::Translation(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(&self, text: &str, target: Language) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay(text).await;
        self.apply_translation(text, target)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> TranslateResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Delay per batch, not per string
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }

        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.apply_translation(text, target)?);
        }
        Ok(results)
    }

    fn backend_name(&self) -> &str {
        "Mock Backend"
    }
}
