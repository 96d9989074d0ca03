use crate::error::{AccountingError, Result};
use crate::utils::{ensure_finite, ensure_non_negative};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_PROJECTION_MONTHS: u32 = 12;
pub const MAX_USEFUL_LIFE_YEARS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DepreciationInput {
    #[schemars(description = "Acquisition value of the asset (R$). Must be non-negative.")]
    pub asset_value: f64,

    #[schemars(
        description = "Useful life of the asset in whole years, between 1 and 100. Straight-line depreciation is spread evenly over these years."
    )]
    pub useful_life_years: u32,
}

impl Default for DepreciationInput {
    fn default() -> Self {
        Self {
            asset_value: 0.0,
            useful_life_years: 1,
        }
    }
}

impl DepreciationInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("asset_value", self.asset_value)?;
        if !(1..=MAX_USEFUL_LIFE_YEARS).contains(&self.useful_life_years) {
            return Err(AccountingError::InvalidInput {
                field: "useful_life_years".to_string(),
                details: format!(
                    "useful life must be between 1 and {} years, got {}",
                    MAX_USEFUL_LIFE_YEARS, self.useful_life_years
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProfitMarginInput {
    #[schemars(description = "Total cost of the item (R$)")]
    pub total_cost: f64,

    #[schemars(description = "Sale price of the item (R$). A price of zero makes the margin not computable.")]
    pub sale_price: f64,
}

impl ProfitMarginInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("total_cost", self.total_cost)?;
        ensure_non_negative("sale_price", self.sale_price)
    }
}

/// Tax rates in percent (0.65 means 0.65%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TaxRates {
    #[schemars(description = "PIS rate in percent. Defaults to 0.65.")]
    pub pis: f64,

    #[schemars(description = "COFINS rate in percent. Defaults to 3.0.")]
    pub cofins: f64,

    #[schemars(description = "ISS rate in percent. Defaults to 5.0.")]
    pub iss: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            pis: 0.65,
            cofins: 3.0,
            iss: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TaxBreakdownInput {
    #[schemars(description = "Taxable base value (R$)")]
    pub base_value: f64,
    pub rates: TaxRates,
}

impl TaxBreakdownInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("base_value", self.base_value)?;
        ensure_non_negative("rates.pis", self.rates.pis)?;
        ensure_non_negative("rates.cofins", self.rates.cofins)?;
        ensure_non_negative("rates.iss", self.rates.iss)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PayrollInput {
    #[schemars(description = "Monthly base salary (R$). Also selects the social-security withholding bracket.")]
    pub base_salary: f64,

    #[schemars(description = "Number of overtime hours worked in the month")]
    pub overtime_hours: f64,

    #[schemars(description = "Amount paid per overtime hour (R$)")]
    pub overtime_hourly_rate: f64,

    #[schemars(description = "Meal allowance paid in the month (R$). Counted as earnings.")]
    pub meal_allowance: f64,

    #[schemars(
        description = "Whether the employee receives a transportation allowance. When set, 6% of the base salary is deducted."
    )]
    pub transportation_allowance: bool,
}

impl PayrollInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("base_salary", self.base_salary)?;
        ensure_non_negative("overtime_hours", self.overtime_hours)?;
        ensure_non_negative("overtime_hourly_rate", self.overtime_hourly_rate)?;
        ensure_non_negative("meal_allowance", self.meal_allowance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BalanceSheetInput {
    pub current_assets: f64,

    #[schemars(description = "Cash and cash equivalents available immediately (R$)")]
    pub available: f64,

    pub inventory: f64,
    pub total_assets: f64,
    pub current_liabilities: f64,
    pub total_liabilities: f64,

    #[schemars(description = "Shareholders' equity (R$)")]
    pub equity: f64,

    pub net_profit: f64,
    pub net_sales: f64,
}

impl BalanceSheetInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("current_assets", self.current_assets)?;
        ensure_non_negative("available", self.available)?;
        ensure_non_negative("inventory", self.inventory)?;
        ensure_non_negative("total_assets", self.total_assets)?;
        ensure_non_negative("current_liabilities", self.current_liabilities)?;
        ensure_non_negative("total_liabilities", self.total_liabilities)?;
        ensure_non_negative("equity", self.equity)?;
        ensure_non_negative("net_profit", self.net_profit)?;
        ensure_non_negative("net_sales", self.net_sales)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum BudgetCategory {
    Sales,
    Services,
    OperatingCosts,
    AdministrativeExpenses,
    PersonnelExpenses,
    Marketing,
    Other,
}

impl BudgetCategory {
    /// Display order of the budget table.
    pub const ALL: [BudgetCategory; 7] = [
        BudgetCategory::Sales,
        BudgetCategory::Services,
        BudgetCategory::OperatingCosts,
        BudgetCategory::AdministrativeExpenses,
        BudgetCategory::PersonnelExpenses,
        BudgetCategory::Marketing,
        BudgetCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BudgetCategory::Sales => "Sales",
            BudgetCategory::Services => "Services",
            BudgetCategory::OperatingCosts => "Operating Costs",
            BudgetCategory::AdministrativeExpenses => "Administrative Expenses",
            BudgetCategory::PersonnelExpenses => "Personnel Expenses",
            BudgetCategory::Marketing => "Marketing",
            BudgetCategory::Other => "Other",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl BudgetPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Quarterly => "Quarterly",
            BudgetPeriod::Annual => "Annual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetEntry {
    pub category: BudgetCategory,
    #[serde(default)]
    pub planned: f64,
    #[serde(default)]
    pub actual: f64,
}

impl BudgetEntry {
    pub fn new(category: BudgetCategory, planned: f64, actual: f64) -> Self {
        Self {
            category,
            planned,
            actual,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BudgetInput {
    #[schemars(description = "Period the amounts refer to. Informational only; it does not change the arithmetic.")]
    pub period: BudgetPeriod,

    #[schemars(
        description = "Planned and actual amounts per category. Each category may appear at most once; omitted categories count as zero planned and zero actual."
    )]
    pub entries: Vec<BudgetEntry>,
}

impl BudgetInput {
    pub fn validate(&self) -> Result<()> {
        let mut seen = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if seen.contains(&entry.category) {
                return Err(AccountingError::DuplicateBudgetCategory(
                    entry.category.label().to_string(),
                ));
            }
            seen.push(entry.category);

            ensure_non_negative(&format!("{}.planned", entry.category), entry.planned)?;
            ensure_non_negative(&format!("{}.actual", entry.category), entry.actual)?;
        }
        Ok(())
    }

    /// Planned and actual amounts for `category`, zero when it was not provided.
    pub fn amounts_for(&self, category: BudgetCategory) -> (f64, f64) {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| (e.planned, e.actual))
            .unwrap_or((0.0, 0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CashInflows {
    pub sales: f64,
    pub services: f64,
    pub other: f64,
}

impl CashInflows {
    pub fn total(&self) -> f64 {
        self.sales + self.services + self.other
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CashOutflows {
    pub fixed_costs: f64,
    pub payroll: f64,
    pub taxes: f64,
    pub other: f64,
}

impl CashOutflows {
    pub fn total(&self) -> f64 {
        self.fixed_costs + self.payroll + self.taxes + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CashFlowInput {
    #[schemars(description = "Number of months to project, between 1 and 12")]
    pub months: u32,

    #[schemars(description = "Cash balance before the first projected month (R$). May be negative.")]
    pub opening_balance: f64,

    #[schemars(description = "Recurring monthly inflows, identical for every projected month")]
    pub inflows: CashInflows,

    #[schemars(description = "Recurring monthly outflows, identical for every projected month")]
    pub outflows: CashOutflows,

    #[schemars(
        description = "Optional date inside the first projected month. When present, months are labelled with their month-end date instead of 'Month N'."
    )]
    pub start_date: Option<NaiveDate>,
}

impl Default for CashFlowInput {
    fn default() -> Self {
        Self {
            months: 3,
            opening_balance: 0.0,
            inflows: CashInflows::default(),
            outflows: CashOutflows::default(),
            start_date: None,
        }
    }
}

impl CashFlowInput {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PROJECTION_MONTHS).contains(&self.months) {
            return Err(AccountingError::InvalidInput {
                field: "months".to_string(),
                details: format!(
                    "must be between 1 and {}, got {}",
                    MAX_PROJECTION_MONTHS, self.months
                ),
            });
        }
        ensure_finite("opening_balance", self.opening_balance)?;
        ensure_non_negative("inflows.sales", self.inflows.sales)?;
        ensure_non_negative("inflows.services", self.inflows.services)?;
        ensure_non_negative("inflows.other", self.inflows.other)?;
        ensure_non_negative("outflows.fixed_costs", self.outflows.fixed_costs)?;
        ensure_non_negative("outflows.payroll", self.outflows.payroll)?;
        ensure_non_negative("outflows.taxes", self.outflows.taxes)?;
        ensure_non_negative("outflows.other", self.outflows.other)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IncomeStatementInput {
    pub gross_revenue: f64,

    #[schemars(description = "Deductions from gross revenue such as sales taxes, returns and discounts (R$)")]
    pub deductions: f64,

    pub cost_of_goods_sold: f64,
    pub selling_expenses: f64,
    pub administrative_expenses: f64,
    pub financial_expenses: f64,
}

impl IncomeStatementInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("gross_revenue", self.gross_revenue)?;
        ensure_non_negative("deductions", self.deductions)?;
        ensure_non_negative("cost_of_goods_sold", self.cost_of_goods_sold)?;
        ensure_non_negative("selling_expenses", self.selling_expenses)?;
        ensure_non_negative("administrative_expenses", self.administrative_expenses)?;
        ensure_non_negative("financial_expenses", self.financial_expenses)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IndicatorInput {
    pub revenue: f64,
    pub net_profit: f64,
    pub total_assets: f64,
    pub equity: f64,

    #[schemars(description = "Average number of days to receive payment from customers")]
    pub collection_period_days: f64,

    #[schemars(description = "Average number of days taken to pay suppliers")]
    pub payment_period_days: f64,

    #[schemars(description = "How many times inventory turns over per year. Zero means no inventory component in the operating cycle.")]
    pub inventory_turnover: f64,
}

impl IndicatorInput {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("revenue", self.revenue)?;
        ensure_non_negative("net_profit", self.net_profit)?;
        ensure_non_negative("total_assets", self.total_assets)?;
        ensure_non_negative("equity", self.equity)?;
        ensure_non_negative("collection_period_days", self.collection_period_days)?;
        ensure_non_negative("payment_period_days", self.payment_period_days)?;
        ensure_non_negative("inventory_turnover", self.inventory_turnover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depreciation_rejects_zero_life() {
        let input = DepreciationInput {
            asset_value: 1000.0,
            useful_life_years: 0,
        };
        assert!(matches!(
            input.validate(),
            Err(AccountingError::InvalidInput { ref field, .. }) if field == "useful_life_years"
        ));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let input = PayrollInput {
            base_salary: -1.0,
            ..Default::default()
        };
        assert!(input.validate().is_err());

        let input = CashFlowInput {
            opening_balance: -5000.0,
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_useful_life_bounds() {
        for years in [0, MAX_USEFUL_LIFE_YEARS + 1, u32::MAX] {
            let input = DepreciationInput {
                asset_value: 1000.0,
                useful_life_years: years,
            };
            assert!(input.validate().is_err(), "years={} should fail", years);
        }
        for years in [1, MAX_USEFUL_LIFE_YEARS] {
            let input = DepreciationInput {
                asset_value: 1000.0,
                useful_life_years: years,
            };
            assert!(input.validate().is_ok(), "years={} should pass", years);
        }
    }

    #[test]
    fn test_cash_flow_month_bounds() {
        for months in [0, 13] {
            let input = CashFlowInput {
                months,
                ..Default::default()
            };
            assert!(input.validate().is_err(), "months={} should fail", months);
        }
        for months in [1, 12] {
            let input = CashFlowInput {
                months,
                ..Default::default()
            };
            assert!(input.validate().is_ok(), "months={} should pass", months);
        }
    }

    #[test]
    fn test_budget_duplicate_category() {
        let input = BudgetInput {
            period: BudgetPeriod::Quarterly,
            entries: vec![
                BudgetEntry::new(BudgetCategory::Marketing, 10.0, 12.0),
                BudgetEntry::new(BudgetCategory::Marketing, 5.0, 5.0),
            ],
        };
        assert!(matches!(
            input.validate(),
            Err(AccountingError::DuplicateBudgetCategory(ref c)) if c == "Marketing"
        ));
    }

    #[test]
    fn test_defaults_match_form_presets() {
        let rates = TaxRates::default();
        assert_eq!(rates.pis, 0.65);
        assert_eq!(rates.cofins, 3.0);
        assert_eq!(rates.iss, 5.0);
        assert_eq!(CashFlowInput::default().months, 3);
        assert_eq!(DepreciationInput::default().useful_life_years, 1);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let input: TaxBreakdownInput = serde_json::from_str(r#"{"base_value": 100.0}"#).unwrap();
        assert_eq!(input.rates, TaxRates::default());

        let input: PayrollInput = serde_json::from_str(r#"{"base_salary": 2000.0}"#).unwrap();
        assert!(!input.transportation_allowance);
        assert_eq!(input.meal_allowance, 0.0);
    }
}
