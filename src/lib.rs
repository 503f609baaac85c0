//! Google Analytics Measurement Protocol (Universal Analytics) client.
//!
//! Maps typed tracking calls (pageview, event, transaction, …) onto the
//! protocol's short-key wire format, merges them with client-wide fields and
//! custom parameters, posts them to the collector and normalizes the
//! response into a result keyed by the client identifier.
//!
//! ```no_run
//! use universal_analytics_rs::{Analytics, AnalyticsOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let analytics = Analytics::new(AnalyticsOptions::new("UA-XXXXXXX-1"))?;
//! let response = analytics
//!     .pageview("example.com", "/landing", "Landing", None, None)
//!     .await?;
//! println!("delivered as {}", response.client_id);
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod constants;
pub mod error;
mod hit;
mod params;
mod transport;

pub use api::Analytics;
pub use config::{AnalyticsOptions, Endpoint};
pub use error::{AnalyticsError, AnalyticsErrorKind, AnalyticsResult};
pub use hit::{
    CheckoutProduct, EventExtras, Hit, HitType, ItemExtras, PromotionExtras, PurchaseExtras,
    RefundProduct, TimingExtras, TransactionExtras,
};
pub use params::{ParamValue, Params};
pub use transport::HitResponse;
