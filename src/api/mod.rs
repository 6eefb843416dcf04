//! Typed resource API modules
//!
//! One module per backend resource. These are declarative wrappers:
//! URL and parameter construction only, all transport behavior lives in
//! [`HttpClient`](crate::http::HttpClient).

pub mod auth;
pub mod backtest;
pub mod group;
pub mod instrument;
pub mod portfolio;
pub mod transaction;
pub mod valuation;

pub use auth::AuthApi;
pub use backtest::BacktestApi;
pub use group::GroupApi;
pub use instrument::InstrumentApi;
pub use portfolio::PortfolioApi;
pub use transaction::TransactionApi;
pub use valuation::ValuationApi;
