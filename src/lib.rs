//! # Accounting Calculators
//!
//! Pure, stateless accounting calculators for a form-driven assistant: depreciation,
//! profit margin, tax breakdown, payroll, balance-sheet ratios, budget variance,
//! cash-flow projection, DRE (income statement) analysis and financial indicators.
//!
//! ## Core Concepts
//!
//! - **Calculator**: a closed enumeration, one variant per menu option
//! - **CalculationRequest**: the typed inputs of exactly one calculator
//! - **CalculationResponse**: ordered metrics, an optional table, an optional chart and
//!   qualitative assessments, ready for any presentation layer
//! - **Zero denominators** never fail: ratios fall back to 0, and a margin over a zero
//!   price is reported as not computable
//!
//! With the `llm` feature the crate also provides the chat assistant used by the
//! free-text menu options (statement analysis, account classification, questions).
//!
//! ## Example
//!
//! ```rust
//! use accounting_calculators::*;
//!
//! let request = CalculationRequest::CashFlow(CashFlowInput {
//!     months: 3,
//!     opening_balance: 1000.0,
//!     inflows: CashInflows { sales: 500.0, ..Default::default() },
//!     outflows: CashOutflows { fixed_costs: 300.0, ..Default::default() },
//!     start_date: None,
//! });
//!
//! let response = calculate(&request).unwrap();
//! assert_eq!(response.value("closing_balance"), Some(1600.0));
//! ```

pub mod balance_sheet;
pub mod budget;
pub mod calculator;
pub mod cash_flow;
pub mod config;
pub mod depreciation;
pub mod error;
pub mod income_statement;
pub mod indicators;
pub mod payroll;
pub mod profit_margin;
pub mod report;
pub mod schema;
pub mod statement;
pub mod taxes;
pub mod utils;

#[cfg(feature = "llm")]
pub mod llm;

pub use balance_sheet::{BalanceSheetRatios, BalanceSheetReport};
pub use budget::{BudgetLine, BudgetReport, VarianceDirection};
pub use calculator::{calculate, CalculationRequest, Calculator};
pub use cash_flow::{CashFlowMonth, CashFlowProjection};
pub use config::AssistantConfig;
pub use depreciation::{DepreciationReport, DepreciationYear};
pub use error::{AccountingError, Result};
pub use income_statement::{IncomeStatementReport, VerticalAnalysisLine};
pub use indicators::IndicatorReport;
pub use payroll::PayrollReport;
pub use profit_margin::ProfitMarginReport;
pub use report::*;
pub use schema::*;
pub use statement::StatementTable;
pub use taxes::TaxBreakdownReport;
