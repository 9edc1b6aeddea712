//! Localization seam for toolbar labels and tooltips.
//!
//! The toolbar subsystem never formats user-visible strings directly; it
//! routes them through a [`TranslationBundle`] obtained from a
//! [`Translator`]. Translation has no effect on merge or ordering logic -
//! it is a display concern only.
//!
//! The default [`NullTranslator`] passes strings through unchanged, which is
//! also the correct behavior for tests.

use std::sync::Arc;

/// A domain-scoped string catalog.
pub trait TranslationBundle: Send + Sync {
    /// Look up the translation for `msgid`, falling back to `msgid` itself.
    fn gettext(&self, msgid: &str) -> String;
}

/// Produces translation bundles per text domain.
pub trait Translator: Send + Sync {
    /// Load the bundle for a text domain, e.g. `"cellarium"`.
    fn load(&self, domain: &str) -> Arc<dyn TranslationBundle>;
}

/// Identity translator: every lookup returns the message id unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

struct NullBundle;

impl TranslationBundle for NullBundle {
    fn gettext(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

impl Translator for NullTranslator {
    fn load(&self, _domain: &str) -> Arc<dyn TranslationBundle> {
        Arc::new(NullBundle)
    }
}

/// The text domain used by this crate's built-in controls.
pub const TEXT_DOMAIN: &str = "cellarium";
