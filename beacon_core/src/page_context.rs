//! Ambient page metadata merged into the properties of `page` calls.

use url::Url;

use crate::{Error, Properties, Result};

/// Read-only provider of ambient page metadata.
///
/// The SDK treats the hosting environment as a read-only source of page metadata. Implement this
/// trait to describe where the current page lives; the dispatch engine resolves it into a
/// [`PageContext`] on every `page` call, so a provider backed by live state (e.g., a routing
/// layer) always reflects the current page.
pub trait PageMetadata: Send + Sync {
    /// URL declared as the page's canonical reference, if the page declares one.
    fn canonical_url(&self) -> Option<Url>;

    /// URL the page is currently being served from.
    fn current_url(&self) -> Option<Url>;

    /// Document title.
    fn title(&self) -> Option<String>;

    /// URL of the page that linked to this one.
    fn referrer(&self) -> Option<String>;
}

/// Ambient page metadata resolved for a single `page` call. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    /// Canonical URL of the page, falling back to the current location.
    pub url: Option<Url>,
    /// Document title.
    pub title: Option<String>,
    /// URL of the linking page.
    pub referrer: Option<String>,
    /// Path component of the current location.
    pub path: Option<String>,
}

impl PageContext {
    /// Resolve the page context from `provider`.
    ///
    /// The canonical URL is preferred over the current location for `url`. `path` always comes
    /// from the current location, even when the canonical URL wins.
    pub fn resolve(provider: &dyn PageMetadata) -> PageContext {
        let current = provider.current_url();
        let url = provider.canonical_url().or_else(|| current.clone());
        let path = current.as_ref().map(|url| url.path().to_owned());

        PageContext {
            url,
            title: provider.title(),
            referrer: provider.referrer(),
            path,
        }
    }

    /// Merge this context under `properties`.
    ///
    /// Context fields are defaults; caller-supplied properties win on key collision.
    pub fn merged_into(&self, properties: Option<&Properties>) -> Properties {
        let mut merged = Properties::new();
        if let Some(url) = &self.url {
            merged.insert("url".to_owned(), url.to_string().into());
        }
        if let Some(title) = &self.title {
            merged.insert("title".to_owned(), title.clone().into());
        }
        if let Some(referrer) = &self.referrer {
            merged.insert("referrer".to_owned(), referrer.clone().into());
        }
        if let Some(path) = &self.path {
            merged.insert("path".to_owned(), path.clone().into());
        }
        if let Some(properties) = properties {
            for (key, value) in properties {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Fixed page metadata, for server-side rendering and tests.
///
/// # Examples
/// ```
/// # use beacon_core::page_context::StaticPageMetadata;
/// # fn main() -> beacon_core::Result<()> {
/// let metadata = StaticPageMetadata::new()
///     .with_current_url("https://example.com/docs/intro")?
///     .with_title("Introduction");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPageMetadata {
    canonical_url: Option<Url>,
    current_url: Option<Url>,
    title: Option<String>,
    referrer: Option<String>,
}

impl StaticPageMetadata {
    /// Create metadata with no fields set.
    pub fn new() -> StaticPageMetadata {
        StaticPageMetadata::default()
    }

    /// Set the URL the page is served from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageUrl`] if `url` does not parse.
    pub fn with_current_url(mut self, url: &str) -> Result<StaticPageMetadata> {
        self.current_url = Some(Url::parse(url).map_err(Error::InvalidPageUrl)?);
        Ok(self)
    }

    /// Set the page's declared canonical URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPageUrl`] if `url` does not parse.
    pub fn with_canonical_url(mut self, url: &str) -> Result<StaticPageMetadata> {
        self.canonical_url = Some(Url::parse(url).map_err(Error::InvalidPageUrl)?);
        Ok(self)
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> StaticPageMetadata {
        self.title = Some(title.into());
        self
    }

    /// Set the referrer.
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> StaticPageMetadata {
        self.referrer = Some(referrer.into());
        self
    }
}

impl PageMetadata for StaticPageMetadata {
    fn canonical_url(&self) -> Option<Url> {
        self.canonical_url.clone()
    }

    fn current_url(&self) -> Option<Url> {
        self.current_url.clone()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }
}
