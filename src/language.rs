use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The two languages of the pipeline. English is the source language the
/// content is authored in; Urdu is the translation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Urdu,
}

/// Text direction for rendered layout. Derived from [`Language`] so the
/// language flag and the direction attribute can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// The value rendered into a document-level `dir` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Language {
    /// The language code used on the wire ("en" / "ur").
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "en" => Some(Language::English),
            "ur" => Some(Language::Urdu),
            _ => None,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Language::English => Direction::Ltr,
            Language::Urdu => Direction::Rtl,
        }
    }

    /// True for the language content is authored in.
    pub fn is_source(self) -> bool {
        self == Language::English
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Urdu,
            Language::Urdu => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Session-scoped current-language flag with explicit setters and a typed
/// observable contract.
///
/// All setters are synchronous and total; every subscriber observes each
/// change. The flag is memory-only: a new store starts at English, matching
/// a fresh page view. Several independent stores may coexist, each with its
/// own subscribers.
#[derive(Debug)]
pub struct LanguageStore {
    tx: watch::Sender<Language>,
}

impl LanguageStore {
    pub fn new() -> Self {
        Self {
            tx: watch::channel(Language::default()).0,
        }
    }

    pub fn current(&self) -> Language {
        *self.tx.borrow()
    }

    pub fn set(&self, language: Language) {
        // send_replace never fails, even with no live subscribers
        self.tx.send_replace(language);
    }

    pub fn set_source(&self) {
        self.set(Language::English);
    }

    pub fn set_target(&self) {
        self.set(Language::Urdu);
    }

    pub fn toggle(&self) -> Language {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Current text direction; kept consistent with the flag by derivation.
    pub fn direction(&self) -> Direction {
        self.current().direction()
    }

    /// Subscribe to language changes. The receiver observes the value at
    /// subscription time and every change thereafter.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.tx.subscribe()
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Urdu.code(), "ur");
        assert_eq!(Language::from_code("ur"), Some(Language::Urdu));
        assert_eq!(Language::from_code("UR"), Some(Language::Urdu));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_direction_follows_language() {
        assert_eq!(Language::English.direction().as_attr(), "ltr");
        assert_eq!(Language::Urdu.direction().as_attr(), "rtl");
    }

    #[test]
    fn test_store_starts_at_source() {
        let store = LanguageStore::new();
        assert_eq!(store.current(), Language::English);
        assert_eq!(store.direction(), Direction::Ltr);
    }

    #[test]
    fn test_setters_and_toggle() {
        let store = LanguageStore::new();
        store.set_target();
        assert_eq!(store.current(), Language::Urdu);
        assert_eq!(store.direction(), Direction::Rtl);
        store.set_source();
        assert_eq!(store.current(), Language::English);
        assert_eq!(store.toggle(), Language::Urdu);
        assert_eq!(store.toggle(), Language::English);
    }

    #[test]
    fn test_set_without_subscribers_is_total() {
        let store = LanguageStore::new();
        // No receiver exists; setters must still succeed
        store.set_target();
        assert_eq!(store.current(), Language::Urdu);
    }

    #[tokio::test]
    async fn test_subscribers_observe_every_change() {
        let store = LanguageStore::new();
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow_and_update(), Language::English);

        store.set_target();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Language::Urdu);
    }
}
