use crate::locale::{Currency, Locale};
use crate::utility::Utility;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const OFFERS_SHEET_PATH: &str = "/express/system/offers.json";

/// A localized price for one offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub country: String,
    pub currency: String,
    pub symbol: String,
    pub lang: String,
    pub unit_price: String,
    pub unit_price_currency_formatted: String,
}

#[async_trait]
pub trait OfferLookup: Send + Sync {
    /// `Ok(None)` when there is no price for the offer.
    async fn get_offer(
        &self,
        offer_id: &str,
        country_override: Option<&str>,
        locale: &Locale,
    ) -> Result<Option<Offer>>;
}

#[derive(Debug, Clone, Deserialize)]
struct OfferRow {
    #[serde(rename = "o")]
    offer_id: String,
    #[serde(rename = "c")]
    country: String,
    #[serde(rename = "p")]
    price: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OfferSheet {
    #[serde(default)]
    data: Vec<OfferRow>,
}

impl OfferSheet {
    fn find(&self, offer_id: &str, country: &str) -> Option<&OfferRow> {
        let country = country.to_uppercase();
        self.data
            .iter()
            .find(|row| row.offer_id == offer_id && row.country == country)
    }
}

/// Reads prices from the published offers sheet.
#[derive(Debug, Clone)]
pub struct HttpOfferLookup {
    base_url: String,
    client: reqwest::Client,
}

impl HttpOfferLookup {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Utility::get_reqwest_client()?,
        })
    }

    pub fn sheet_url(&self) -> String {
        format!("{}{OFFERS_SHEET_PATH}", self.base_url)
    }

    async fn load_sheet(&self) -> Result<OfferSheet> {
        Utility::get_json(&self.client, &self.sheet_url()).await
    }
}

#[async_trait]
impl OfferLookup for HttpOfferLookup {
    async fn get_offer(
        &self,
        offer_id: &str,
        country_override: Option<&str>,
        locale: &Locale,
    ) -> Result<Option<Offer>> {
        let mut country = country_override
            .unwrap_or(locale.country())
            .to_lowercase();
        let mut currency = match Currency::for_country(&country) {
            Some(currency) => currency,
            None => {
                tracing::debug!("no currency for country '{country}', using us");
                country = "us".to_string();
                us_dollar()?
            }
        };

        let sheet = self.load_sheet().await?;
        let row = match sheet.find(offer_id, &country) {
            Some(row) => row,
            None => match sheet.find(offer_id, "us") {
                Some(row) => {
                    country = "us".to_string();
                    currency = us_dollar()?;
                    row
                }
                None => {
                    tracing::info!("no offer '{offer_id}' in {}", self.sheet_url());
                    return Ok(None);
                }
            },
        };

        Ok(Some(Offer {
            country,
            currency: currency.code().to_string(),
            symbol: currency.symbol().to_string(),
            // Priced for the resolved country, worded in the page's language.
            lang: locale.language().to_string(),
            unit_price: row.price.to_owned(),
            unit_price_currency_formatted: currency.format(&row.price),
        }))
    }
}

fn us_dollar() -> Result<&'static Currency> {
    Currency::from_code("USD").ok_or_else(|| anyhow::anyhow!("USD missing from currency table"))
}
