use crate::environment::EnvironmentMap;
use crate::error::Result;
use crate::locale::format_price;
use crate::offer::{Offer, OfferLookup};
use crate::page_context::PageContext;
use crate::purchase_link::PurchaseLinkBuilder;
use crate::url_params;
use regex::Regex;
use serde::Serialize;

pub const OFFER_ID_PARAM: &str = "items[0][id]";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_PRICE: &str = "9.99";
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_SYMBOL: &str = "$";

lazy_static! {
    static ref RE_PRICE_NUMBER: Regex = Regex::new(r"[\d,.eE+]+").expect("Regexp error");
}

/// One purchasable option of a pricing column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub url: String,
    pub offer_id: Option<String>,
    pub country: String,
    pub language: String,
    pub price: String,
    pub currency: String,
    pub symbol: String,
    pub formatted: String,
}

impl Plan {
    /// A plan priced at the defaults until an offer is applied.
    pub fn new(plan_url: &str) -> Result<Self> {
        let url = url_params::parse(plan_url)?;
        Ok(Self {
            url: plan_url.to_string(),
            offer_id: url_params::get(&url, OFFER_ID_PARAM).filter(|id| !id.is_empty()),
            country: DEFAULT_COUNTRY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            price: DEFAULT_PRICE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            formatted: format_price(DEFAULT_PRICE, DEFAULT_CURRENCY),
        })
    }

    pub fn apply_offer(&mut self, offer: Offer) {
        self.country = offer.country;
        self.language = offer.lang;
        self.price = offer.unit_price;
        self.currency = offer.currency;
        self.symbol = offer.symbol;
        self.formatted = offer.unit_price_currency_formatted;
    }

    /// The formatted price with its numeric part in bold.
    pub fn price_html(&self) -> String {
        match RE_PRICE_NUMBER.find(&self.formatted) {
            Some(m) => {
                let raw = m.as_str();
                self.formatted
                    .replacen(raw, &format!("<strong>{raw}</strong>"), 1)
            }
            None => self.formatted.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedPlan {
    #[serde(flatten)]
    pub plan: Plan,
    pub price_html: String,
    pub cta_href: String,
}

/// Prices `plan_url` for the page and computes its CTA href.
///
/// A missing offer or a failed lookup leaves the default price in place. If
/// the href cannot be built the plan URL is used as is.
pub async fn select_plan(
    lookup: &dyn OfferLookup,
    page: &PageContext,
    env: &EnvironmentMap,
    plan_url: &str,
) -> Result<SelectedPlan> {
    let mut plan = Plan::new(plan_url)?;

    if let Some(offer_id) = plan.offer_id.to_owned() {
        let country_override = page.country_override();
        match lookup
            .get_offer(&offer_id, country_override.as_deref(), page.locale())
            .await
        {
            Ok(Some(offer)) => plan.apply_offer(offer),
            Ok(None) => tracing::info!("no offer for '{offer_id}', using default price"),
            Err(e) => tracing::warn!("offer lookup for '{offer_id}' failed: {e}"),
        }
    }

    let cta_href = match PurchaseLinkBuilder::new(page, env).build_url(
        &plan.url,
        &plan.country,
        &plan.language,
    ) {
        Ok(href) => href,
        Err(e) => {
            tracing::warn!("keeping plan url as cta: {e}");
            plan.url.to_owned()
        }
    };

    Ok(SelectedPlan {
        price_html: plan.price_html(),
        cta_href,
        plan,
    })
}
