//! Fluent bundles for the dashboard chrome (`en-US` fallback, `es-ES`).
//!
//! Components look strings up with [`t!`](crate::t); the bundles under
//! `i18n/<lang>/propdash-ui.ftl` are embedded at compile time. Chart panel
//! messages stay English and live in `analytics::presenter`.

use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::I18nEmbedError;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

#[doc(hidden)]
pub use i18n_embed_fl::fl;

/// Look up a message in the shared loader, e.g.
/// `t!("highlights-latest", label = "Jun 15")`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

#[derive(Embed)]
#[folder = "i18n"]
struct Bundles;

pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new("propdash-ui", langid!("en-US")));

static SELECT_SYSTEM_LANGUAGE: Once = Once::new();

/// Pick the best bundle for the OS or browser languages. Later calls are no-ops.
pub fn init() {
    SELECT_SYSTEM_LANGUAGE.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        let requested = i18n_embed::WebLanguageRequester::requested_languages();
        #[cfg(not(target_arch = "wasm32"))]
        let requested = i18n_embed::DesktopLanguageRequester::requested_languages();

        match i18n_embed::select(&*LOADER, &Bundles, &requested) {
            Ok(selected) => tracing::debug!(?selected, "selected ui language"),
            Err(err) => tracing::warn!(%err, "language selection failed, using en-US"),
        }
    });
}

/// Switch the active bundle from the navbar picker. Tags that do not parse
/// leave the current language in place.
pub fn set_language(tag: &str) -> Result<(), I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring malformed language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Bundles, &[lang])?;
    Ok(())
}

/// Embedded language tags, sorted, for the navbar picker.
pub fn available_languages() -> Vec<String> {
    let mut tags: Vec<String> = Bundles::iter()
        .filter_map(|path| path.split_once('/').map(|(lang, _)| lang.to_string()))
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_bundles_are_embedded() {
        assert_eq!(available_languages(), ["en-US", "es-ES"]);
    }

    #[test]
    fn fallback_bundle_resolves_navigation_labels() {
        init();
        let loader = FluentLanguageLoader::new("propdash-ui", langid!("en-US"));
        i18n_embed::select(&loader, &Bundles, &[langid!("en-US")]).unwrap();
        assert_eq!(fl!(&loader, "nav-overview"), "Overview");
        assert_eq!(fl!(&loader, "nav-analytics"), "Analytics");
    }

    #[test]
    fn malformed_tags_are_ignored() {
        assert!(set_language("not a tag!").is_ok());
    }
}
