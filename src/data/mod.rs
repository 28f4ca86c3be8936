//! Data sources for the dashboards.
//!
//! - currency code table (`currencies`)
//! - live rate provider (`rates`)
//! - synthetic trend derived from a live rate (`trend`)

pub mod currencies;
pub mod rates;
pub mod trend;

pub use currencies::{CURRENCIES, currency_name, dropdown_label, validate_code};
pub use rates::{OpenRatesClient, RateProvider};
pub use trend::synthetic_trend;
