//! Translation pipeline
//!
//! Everything between a language change and a translated page:
//!
//! 1. **Backend trait & clients** - [`TranslationBackend`] with the HTTP
//!    client used in production and a deterministic mock for tests
//! 2. **Cache** - exact-key memoization of completed translations for the
//!    session
//! 3. **Fallback table** - compiled-in phrase table used when the live
//!    backend is unreachable
//! 4. **Service** - the never-fail policy layer: identity for the source
//!    language, cache, backend, degrade to fallback
//! 5. **Tree walker** - shape-preserving recursive translation of content
//!    trees with concurrently resolving leaves
//!
//! The service's operations are total by design: a reader always gets some
//! text back, original-language at worst.

pub mod cache;
pub mod error;
pub mod fallback;
pub mod http;
pub mod mock;
pub mod service;
pub mod translator;
pub mod walker;

#[cfg(test)]
mod integration_tests;

pub use cache::TranslationCache;
pub use error::{TranslateError, TranslateResult};
pub use fallback::FallbackTable;
pub use http::HttpBackend;
pub use mock::{MockBackend, MockMode};
pub use service::TranslationService;
pub use translator::TranslationBackend;
