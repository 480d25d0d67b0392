use crate::error::Result;
use crate::locale::Locale;
use crate::url_params;
use url::Url;

/// The URL of the page the pricing block is rendered on. Read-only.
#[derive(Debug, Clone)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    pub fn new(page_url: &str) -> Result<Self> {
        Ok(Self {
            url: url_params::parse(page_url)?,
        })
    }

    pub fn param(&self, name: &str) -> Option<String> {
        url_params::get(&self.url, name)
    }

    /// Offer country override (`?country=`).
    pub fn country_override(&self) -> Option<String> {
        self.param("country").filter(|c| !c.is_empty())
    }

    /// Locale from the first path segment, `us` when there is no known prefix.
    pub fn locale(&self) -> &'static Locale {
        let segment = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default();
        Locale::from_prefix(segment)
    }
}
