#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod environment;
pub mod error;
pub mod host_rule;
pub mod locale;
pub mod offer;
pub mod page_context;
pub mod plan;
pub mod purchase_link;
pub mod server;
pub mod url_params;
pub mod utility;

pub use error::PricingError;
pub use purchase_link::PurchaseLinkBuilder;
