//! Session translation cache
//!
//! Pure memoization of `(source text, target language)` → translated text.
//! No TTL, no size bound: the corpus is a single page view's static
//! content, and the cache lives only as long as the service owning it.
//! Keys are exact strings; texts differing by whitespace are distinct
//! entries.

use crate::language::Language;
use std::collections::HashMap;
use std::sync::Mutex;

/// Unbounded in-memory memo of completed translations
///
/// Concurrent leaf translations may race on the same key: both miss, both
/// ask the backend, both store the same value. That duplicate work is
/// accepted; the entry converges either way.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: Mutex<HashMap<(String, Language), String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock degrades to a miss rather than panicking.
    pub fn get(&self, text: &str, target: Language) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries.get(&(text.to_string(), target)).cloned()
    }

    pub fn put(&self, text: &str, target: Language, translated: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert((text.to_string(), target), translated);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
