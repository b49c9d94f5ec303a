//! Public delivery URL resolution.
//!
//! Routing from (section, asset type) to a delivery endpoint is an
//! explicit ordered rule table evaluated top-to-bottom with a mandatory
//! no-match failure. Base URLs are injected configuration; only the
//! precedence order is fixed.

mod config;
mod error;
mod resolver;

pub use config::{DeliveryConfig, DeliveryEndpoints, RouteRule};
pub use error::DeliveryError;
pub use resolver::CdnUrlResolver;
