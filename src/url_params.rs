//! Query-string helpers with browser `URLSearchParams` semantics.
//!
//! `set` replaces the first pair with the given name and drops any later ones,
//! appending when the name is absent. The query is re-serialized as
//! `application/x-www-form-urlencoded`, same as the browser does on `set`.

use crate::error::{PricingError, Result};
use url::Url;

pub fn parse(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| PricingError::invalid_url(url, e))
}

/// First value for `name`, decoded.
pub fn get(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

pub fn set(url: &mut Url, name: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = vec![];
    let mut found = false;
    for (k, v) in url.query_pairs() {
        if k != name {
            pairs.push((k.into_owned(), v.into_owned()));
        } else if !found {
            pairs.push((name.to_string(), value.to_string()));
            found = true;
        }
    }
    if !found {
        pairs.push((name.to_string(), value.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// Replaces the hostname only. A `host:port` value is rejected rather than
/// having its port dropped.
pub fn set_hostname(url: &mut Url, host: &str) -> Result<()> {
    let has_port = host.contains(':') && !host.starts_with('[');
    if has_port || url.set_host(Some(host)).is_err() {
        return Err(PricingError::InvalidHost {
            url: url.to_string(),
            host: host.to_string(),
        });
    }
    Ok(())
}
