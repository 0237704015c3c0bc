//! # tarjuma
//!
//! English↔Urdu content translation pipeline for a documentation site:
//! an observable session [`Language`] flag, a memoizing
//! [`TranslationService`] over a pluggable HTTP backend with a compiled-in
//! fallback table, a shape-preserving [`ContentNode`] tree translator, and
//! a presentation [`view`] that applies results last-request-wins.
//!
//! Translation never fails visibly: the worst outcome of a dead backend is
//! the original English text, laid out left-to-right.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tarjuma::{ContentNode, HttpBackend, Language, TranslationService};
//!
//! # async fn demo() -> Result<(), tarjuma::TranslateError> {
//! let backend = Arc::new(HttpBackend::new("http://localhost:8000")?);
//! let service = TranslationService::new(backend);
//!
//! let page = ContentNode::sequence(vec![
//!     ContentNode::text("Summary"),
//!     ContentNode::element("code", vec![ContentNode::text("ros2 node list")]),
//! ]);
//! let urdu = service.translate_tree(&page, Language::Urdu).await;
//! assert!(page.same_shape(&urdu));
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod content;
pub mod language;
pub mod pipeline;
pub mod view;

pub use chat::ChatClient;
pub use content::{ContentNode, PROTECTED_KINDS, kind_is_protected};
pub use language::{Direction, Language, LanguageStore};
pub use pipeline::{
    FallbackTable, HttpBackend, MockBackend, MockMode, TranslateError, TranslateResult,
    TranslationBackend, TranslationCache, TranslationService,
};
pub use view::{RenderTicket, TranslatedView, ViewDriver, ViewPhase};
