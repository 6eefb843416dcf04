//! Wire types for the backend API
//!
//! Every response body follows the `{ data, meta, error }` envelope;
//! field names are camelCase on the wire. Timestamps arrive without an
//! offset (backend-local time), dates as `YYYY-MM-DD`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Response envelope
// ============================================================================

/// Standard response envelope wrapping every backend reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub error: Option<crate::error::ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub tokens: AuthTokens,
}

// ============================================================================
// Portfolio
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortfolioType {
    Real,
    Hypothetical,
    BacktestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Equity,
    Bond,
    Commodity,
    Cash,
    Alt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub workspace_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_currency: String,
    #[serde(rename = "type")]
    pub portfolio_type: PortfolioType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub archived_at: Option<NaiveDateTime>,
}

/// One target-weight entry for a portfolio. `target_weight` is a
/// fraction in `[0, 1]` once normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTarget {
    pub id: String,
    #[serde(default)]
    pub instrument_id: Option<String>,
    pub asset_class: AssetClass,
    #[serde(default)]
    pub currency: Option<String>,
    pub target_weight: f64,
    #[serde(default)]
    pub min_weight: Option<f64>,
    #[serde(default)]
    pub max_weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioWithTargets {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    #[serde(default)]
    pub targets: Vec<PortfolioTarget>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioGroup {
    pub id: String,
    pub name: String,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
}

// ============================================================================
// Instruments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    Stock,
    Etf,
    Etn,
    Bond,
    CommodityIndex,
    CashProxy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentStatus {
    Active,
    Delisted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub instrument_type: InstrumentType,
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub exchange_id: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub country: Option<String>,
    pub asset_class: AssetClass,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub expense_ratio: Option<f64>,
    pub status: InstrumentStatus,
}

/// Paged search result (Spring `Page` shape).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPage {
    pub content: Vec<Instrument>,
    pub total_elements: i64,
    pub total_pages: i32,
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub size: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
    #[serde(default)]
    pub adj_close: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    pub as_of: NaiveDateTime,
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Interest,
    Fee,
    Tax,
    Deposit,
    Withdraw,
    FxConvert,
    Split,
    Merger,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Posted,
    Void,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegType {
    Asset,
    Cash,
    Fee,
    Tax,
    Income,
    Fx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub leg_type: LegType,
    #[serde(default)]
    pub instrument_id: Option<String>,
    pub currency: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    pub amount: f64,
    #[serde(default)]
    pub fx_rate_to_base: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub portfolio_id: String,
    pub occurred_at: NaiveDateTime,
    #[serde(default)]
    pub settle_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub legs: Vec<TransactionLeg>,
}

// ============================================================================
// Valuation & performance
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationMode {
    Realtime,
    Eod,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPosition {
    pub instrument_id: String,
    #[serde(default)]
    pub instrument_name: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub asset_class: Option<AssetClass>,
    pub quantity: f64,
    #[serde(default)]
    pub avg_cost: Option<f64>,
    pub market_price: f64,
    pub market_value_base: f64,
    pub unrealized_pnl_base: f64,
    pub realized_pnl_base: f64,
    pub weight: f64,
    #[serde(default)]
    pub day_pnl_base: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub portfolio_id: String,
    pub as_of: NaiveDateTime,
    pub mode: ValuationMode,
    pub total_value_base: f64,
    pub cash_value_base: f64,
    pub day_pnl_base: f64,
    pub total_pnl_base: f64,
    pub positions: Vec<ValuationPosition>,
    #[serde(default)]
    pub fx_used: HashMap<String, f64>,
    #[serde(default)]
    pub price_timestamp: HashMap<String, NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Twr,
    Mwr,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyType {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrencyMode {
    Base,
    Native,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub total_return: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub mdd: f64,
    pub sharpe: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSeries {
    pub id: String,
    pub label: String,
    pub data_points: Vec<PerformanceDataPoint>,
    pub stats: RiskMetrics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceData {
    pub portfolio_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub metric: String,
    pub frequency: String,
    pub data_points: Vec<PerformanceDataPoint>,
    pub stats: RiskMetrics,
    #[serde(default)]
    pub benchmarks: Option<Vec<BenchmarkSeries>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub cagr: Option<f64>,
    #[serde(default)]
    pub vol: Option<f64>,
    #[serde(default)]
    pub mdd: Option<f64>,
    #[serde(default)]
    pub sharpe: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub tracking_error: Option<f64>,
    #[serde(default)]
    pub total_invested: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareCurvePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareCurve {
    pub id: String,
    pub label: String,
    pub metric: String,
    pub points: Vec<CompareCurvePoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareStatRow {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub total_return: Option<f64>,
    #[serde(default)]
    pub cagr: Option<f64>,
    #[serde(default)]
    pub vol: Option<f64>,
    #[serde(default)]
    pub mdd: Option<f64>,
    #[serde(default)]
    pub sharpe: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub curves: Vec<CompareCurve>,
    pub stats_table: Vec<CompareStatRow>,
}

// ============================================================================
// Backtests
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceType {
    None,
    Periodic,
    Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalancePeriod {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    AdjClose,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentType {
    LumpSum,
    Dca,
}

/// Backtest run status. A run is terminal once it has succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BacktestStatus {
    Running,
    Succeeded,
    Failed,
}

impl BacktestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BacktestStatus::Succeeded | BacktestStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital_base: f64,
    pub rebalance_type: RebalanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebalance_period: Option<RebalancePeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_threshold: Option<f64>,
    pub dividend_reinvest: bool,
    pub price_mode: PriceMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_model: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<InvestmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dca_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dca_frequency: Option<RebalancePeriod>,
    pub targets: Vec<PortfolioTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestRun {
    pub id: String,
    pub config_id: String,
    pub status: BacktestStatus,
    pub started_at: NaiveDateTime,
    #[serde(default)]
    pub finished_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResultPoint {
    pub ts: NaiveDateTime,
    pub equity_curve_base: f64,
    pub drawdown: f64,
    pub cash_base: f64,
    #[serde(default)]
    pub total_invested: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestTradeLog {
    pub ts: NaiveDateTime,
    pub instrument_id: String,
    pub action: String,
    pub quantity: f64,
    pub price: f64,
    pub fee: f64,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub run: BacktestRun,
    pub series: Vec<BacktestResultPoint>,
    pub stats: PerformanceStats,
    #[serde(default)]
    pub trade_logs: Vec<BacktestTradeLog>,
}
