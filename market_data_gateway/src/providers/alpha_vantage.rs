//! HTTP data source for the Alpha Vantage query API.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::AlphaVantageProvider;
