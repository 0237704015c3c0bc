//! Presentation wrapper
//!
//! Owns what a page view displays: the original English tree or its Urdu
//! translation, plus the transient phase shown while a translation is in
//! flight. Supersession is last-request-wins: every language change bumps
//! an epoch, and a translation result is applied only if its ticket still
//! matches the current epoch. A result arriving after a newer change is
//! discarded, never rendered.

use crate::content::ContentNode;
use crate::language::{Direction, Language, LanguageStore};
use crate::pipeline::TranslationService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Display phase of a translated page view.
///
/// `Idle` and `Error` show the source tree, `Translated` the target tree,
/// `Translating` whatever was shown before the switch. There is no
/// terminal phase; the view lives as long as the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Translating,
    Translated,
    Error,
}

/// Proof that a translation was started for a specific epoch.
///
/// Returned by [`TranslatedView::language_changed`]; required by
/// [`TranslatedView::complete`] and [`TranslatedView::fail`] so stale
/// in-flight work cannot overwrite a newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    epoch: u64,
    target: Language,
}

impl RenderTicket {
    pub fn target(&self) -> Language {
        self.target
    }
}

/// State machine wrapping one page's content
pub struct TranslatedView {
    service: Arc<TranslationService>,
    original: ContentNode,
    displayed: ContentNode,
    phase: ViewPhase,
    language: Language,
    epoch: u64,
    last_error: Option<String>,
}

impl TranslatedView {
    pub fn new(service: Arc<TranslationService>, original: ContentNode) -> Self {
        let displayed = original.clone();
        Self {
            service,
            original,
            displayed,
            phase: ViewPhase::Idle,
            language: Language::English,
            epoch: 0,
            last_error: None,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn displayed(&self) -> &ContentNode {
        &self.displayed
    }

    pub fn original(&self) -> &ContentNode {
        &self.original
    }

    /// Direction the displayed tree should be laid out in.
    pub fn direction(&self) -> Direction {
        self.language.direction()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn service(&self) -> &Arc<TranslationService> {
        &self.service
    }

    /// Replace the page content; resets to the untranslated Idle state and
    /// invalidates any in-flight ticket.
    pub fn set_content(&mut self, original: ContentNode) {
        self.epoch += 1;
        self.displayed = original.clone();
        self.original = original;
        self.phase = ViewPhase::Idle;
        self.language = Language::English;
        self.last_error = None;
    }

    /// React to a language change.
    ///
    /// Switching to the source language restores the original tree
    /// instantly and returns `None` — no backend work. Switching to the
    /// target enters `Translating` and returns a ticket the caller must
    /// redeem via [`complete`](Self::complete) or [`fail`](Self::fail).
    /// Either way any older ticket is superseded.
    pub fn language_changed(&mut self, language: Language) -> Option<RenderTicket> {
        self.epoch += 1;
        self.language = language;
        if language.is_source() {
            self.displayed = self.original.clone();
            self.phase = ViewPhase::Idle;
            self.last_error = None;
            None
        } else {
            self.phase = ViewPhase::Translating;
            Some(RenderTicket {
                epoch: self.epoch,
                target: language,
            })
        }
    }

    /// Apply a finished translation. Returns false (and changes nothing)
    /// if the ticket was superseded.
    pub fn complete(&mut self, ticket: RenderTicket, tree: ContentNode) -> bool {
        if ticket.epoch != self.epoch {
            debug!("discarding superseded translation result");
            return false;
        }
        self.displayed = tree;
        self.phase = ViewPhase::Translated;
        self.last_error = None;
        true
    }

    /// Record an abnormal failure (e.g. a timeout). The source tree is
    /// shown and the note kept for the status surface. Returns false if
    /// the ticket was superseded.
    pub fn fail(&mut self, ticket: RenderTicket, note: impl Into<String>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.displayed = self.original.clone();
        self.phase = ViewPhase::Error;
        self.last_error = Some(note.into());
        true
    }

    /// Retry after an error: re-enters `Translating` for the current
    /// target language. No-op unless the view is in `Error`.
    pub fn retry(&mut self) -> Option<RenderTicket> {
        if self.phase != ViewPhase::Error {
            return None;
        }
        self.language_changed(self.language)
    }
}

impl std::fmt::Debug for TranslatedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatedView")
            .field("phase", &self.phase)
            .field("language", &self.language)
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// Drives a [`TranslatedView`] from a [`LanguageStore`] subscription.
///
/// One translation at most is in flight; a new language change supersedes
/// it rather than queueing behind it. Each translation runs under a
/// timeout so the view cannot sit in `Translating` forever.
pub struct ViewDriver {
    view: TranslatedView,
    rx: watch::Receiver<Language>,
    timeout: Duration,
}

impl ViewDriver {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(view: TranslatedView, store: &LanguageStore) -> Self {
        Self {
            view,
            rx: store.subscribe(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn view(&self) -> &TranslatedView {
        &self.view
    }

    /// Run until the language store is dropped; returns the view in its
    /// final state.
    pub async fn run(mut self) -> TranslatedView {
        enum Step {
            Finished(Option<ContentNode>),
            Superseded,
            StoreClosed,
        }

        loop {
            let language = *self.rx.borrow_and_update();
            if let Some(ticket) = self.view.language_changed(language) {
                let service = self.view.service.clone();
                let original = self.view.original.clone();
                let target = ticket.target();
                let translation = async move {
                    service.translate_tree(&original, target).await
                };

                let step = tokio::select! {
                    outcome = tokio::time::timeout(self.timeout, translation) => {
                        Step::Finished(outcome.ok())
                    }
                    changed = self.rx.changed() => {
                        // New language request wins; the in-flight future is
                        // dropped and its result never rendered
                        if changed.is_ok() {
                            Step::Superseded
                        } else {
                            Step::StoreClosed
                        }
                    }
                };

                match step {
                    Step::Finished(Some(tree)) => {
                        self.view.complete(ticket, tree);
                    }
                    Step::Finished(None) => {
                        warn!(timeout = ?self.timeout, "translation timed out");
                        self.view.fail(ticket, "translation timed out");
                    }
                    Step::Superseded => continue,
                    Step::StoreClosed => return self.view,
                }
            }

            if self.rx.changed().await.is_err() {
                return self.view;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{MockBackend, MockMode};

    fn sample_tree() -> ContentNode {
        ContentNode::sequence(vec![
            ContentNode::text("Summary"),
            ContentNode::text("Next Steps"),
        ])
    }

    fn view_with(backend: MockBackend) -> TranslatedView {
        let service = Arc::new(TranslationService::new(Arc::new(backend)));
        TranslatedView::new(service, sample_tree())
    }

    #[test]
    fn test_initial_state_shows_source() {
        let view = view_with(MockBackend::new(MockMode::Suffix));
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.displayed(), view.original());
        assert_eq!(view.direction(), Direction::Ltr);
    }

    #[tokio::test]
    async fn test_translate_then_complete() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let ticket = view.language_changed(Language::Urdu).unwrap();
        assert_eq!(view.phase(), ViewPhase::Translating);
        assert_eq!(view.direction(), Direction::Rtl);

        let tree = view
            .service()
            .clone()
            .translate_tree(view.original(), ticket.target())
            .await;
        assert!(view.complete(ticket, tree));
        assert_eq!(view.phase(), ViewPhase::Translated);
        assert_eq!(
            view.displayed(),
            &ContentNode::sequence(vec![
                ContentNode::text("Summary_ur"),
                ContentNode::text("Next Steps_ur"),
            ])
        );
    }

    #[test]
    fn test_switch_back_to_source_is_instant() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let _ = view.language_changed(Language::Urdu);
        assert!(view.language_changed(Language::English).is_none());
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.displayed(), view.original());
        assert_eq!(view.direction(), Direction::Ltr);
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let stale = view.language_changed(Language::Urdu).unwrap();
        let stale_tree = view
            .service()
            .clone()
            .translate_tree(view.original(), stale.target())
            .await;

        // User flips back before the translation lands
        assert!(view.language_changed(Language::English).is_none());
        assert!(!view.complete(stale, stale_tree));
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.displayed(), view.original());
    }

    #[test]
    fn test_fail_then_retry() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let ticket = view.language_changed(Language::Urdu).unwrap();
        assert!(view.fail(ticket, "translation timed out"));
        assert_eq!(view.phase(), ViewPhase::Error);
        assert_eq!(view.displayed(), view.original());
        assert_eq!(view.last_error(), Some("translation timed out"));

        let retry = view.retry().unwrap();
        assert_eq!(view.phase(), ViewPhase::Translating);
        assert_eq!(retry.target(), Language::Urdu);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let stale = view.language_changed(Language::Urdu).unwrap();
        let _ = view.language_changed(Language::English);
        assert!(!view.fail(stale, "too late"));
        assert_eq!(view.phase(), ViewPhase::Idle);
    }

    #[test]
    fn test_set_content_resets_and_supersedes() {
        let mut view = view_with(MockBackend::new(MockMode::Suffix));
        let stale = view.language_changed(Language::Urdu).unwrap();
        let replacement = ContentNode::text("fresh page");
        view.set_content(replacement.clone());
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.displayed(), &replacement);
        assert!(!view.complete(stale, ContentNode::text("old result")));
        assert_eq!(view.displayed(), &replacement);
    }

    #[tokio::test]
    async fn test_driver_translates_on_language_change() {
        let store = LanguageStore::new();
        let view = view_with(MockBackend::new(MockMode::Suffix));
        let driver = ViewDriver::new(view, &store);
        let handle = tokio::spawn(driver.run());

        store.set_target();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(store);

        let view = handle.await.unwrap();
        assert_eq!(view.phase(), ViewPhase::Translated);
        assert_eq!(view.direction(), Direction::Rtl);
    }

    #[tokio::test]
    async fn test_driver_supersedes_in_flight_translation() {
        let store = LanguageStore::new();
        let backend = MockBackend::with_delay(MockMode::Suffix, Duration::from_millis(80));
        let view = view_with(backend);
        let driver = ViewDriver::new(view, &store);
        let handle = tokio::spawn(driver.run());

        store.set_target();
        tokio::time::sleep(Duration::from_millis(20)).await;
        // Flip back before the Urdu translation resolves
        store.set_source();
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(store);

        let view = handle.await.unwrap();
        assert_eq!(view.phase(), ViewPhase::Idle);
        assert_eq!(view.displayed(), view.original());
    }

    #[tokio::test]
    async fn test_driver_times_out_into_error() {
        let store = LanguageStore::new();
        let backend = MockBackend::with_delay(MockMode::Suffix, Duration::from_millis(200));
        let view = view_with(backend);
        let driver = ViewDriver::new(view, &store).with_timeout(Duration::from_millis(30));
        let handle = tokio::spawn(driver.run());

        store.set_target();
        tokio::time::sleep(Duration::from_millis(120)).await;
        drop(store);

        let view = handle.await.unwrap();
        assert_eq!(view.phase(), ViewPhase::Error);
        assert_eq!(view.displayed(), view.original());
        assert!(view.last_error().is_some());
    }
}
