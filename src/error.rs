#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot set hostname '{host}' on '{url}'")]
    InvalidHost { url: String, host: String },
}

impl PricingError {
    pub fn invalid_url(url: &str, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
