use crate::error::Result;
use crate::report::{CalculationResponse, IntoResponse};
use crate::schema::*;
use crate::{
    balance_sheet, budget, cash_flow, depreciation, income_statement, indicators, payroll,
    profit_margin, taxes,
};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of calculators offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Calculator {
    Depreciation,
    ProfitMargin,
    TaxBreakdown,
    Payroll,
    BalanceSheet,
    Budget,
    CashFlow,
    IncomeStatement,
    Indicators,
}

impl Calculator {
    pub const ALL: [Calculator; 9] = [
        Calculator::Depreciation,
        Calculator::ProfitMargin,
        Calculator::TaxBreakdown,
        Calculator::Payroll,
        Calculator::BalanceSheet,
        Calculator::Budget,
        Calculator::CashFlow,
        Calculator::IncomeStatement,
        Calculator::Indicators,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Calculator::Depreciation => "Depreciation",
            Calculator::ProfitMargin => "Profit Margin",
            Calculator::TaxBreakdown => "Tax Breakdown",
            Calculator::Payroll => "Payroll",
            Calculator::BalanceSheet => "Balance Sheet Analysis",
            Calculator::Budget => "Budget Control",
            Calculator::CashFlow => "Cash Flow Projection",
            Calculator::IncomeStatement => "DRE Analysis",
            Calculator::Indicators => "Financial Indicators",
        }
    }

    /// A request for this calculator with every input at its default value.
    pub fn default_request(&self) -> CalculationRequest {
        match self {
            Calculator::Depreciation => CalculationRequest::Depreciation(Default::default()),
            Calculator::ProfitMargin => CalculationRequest::ProfitMargin(Default::default()),
            Calculator::TaxBreakdown => CalculationRequest::TaxBreakdown(Default::default()),
            Calculator::Payroll => CalculationRequest::Payroll(Default::default()),
            Calculator::BalanceSheet => CalculationRequest::BalanceSheet(Default::default()),
            Calculator::Budget => CalculationRequest::Budget(Default::default()),
            Calculator::CashFlow => CalculationRequest::CashFlow(Default::default()),
            Calculator::IncomeStatement => CalculationRequest::IncomeStatement(Default::default()),
            Calculator::Indicators => CalculationRequest::Indicators(Default::default()),
        }
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "calculator", content = "input")]
pub enum CalculationRequest {
    Depreciation(DepreciationInput),
    ProfitMargin(ProfitMarginInput),
    TaxBreakdown(TaxBreakdownInput),
    Payroll(PayrollInput),
    BalanceSheet(BalanceSheetInput),
    Budget(BudgetInput),
    CashFlow(CashFlowInput),
    IncomeStatement(IncomeStatementInput),
    Indicators(IndicatorInput),
}

impl CalculationRequest {
    pub fn calculator(&self) -> Calculator {
        match self {
            CalculationRequest::Depreciation(_) => Calculator::Depreciation,
            CalculationRequest::ProfitMargin(_) => Calculator::ProfitMargin,
            CalculationRequest::TaxBreakdown(_) => Calculator::TaxBreakdown,
            CalculationRequest::Payroll(_) => Calculator::Payroll,
            CalculationRequest::BalanceSheet(_) => Calculator::BalanceSheet,
            CalculationRequest::Budget(_) => Calculator::Budget,
            CalculationRequest::CashFlow(_) => Calculator::CashFlow,
            CalculationRequest::IncomeStatement(_) => Calculator::IncomeStatement,
            CalculationRequest::Indicators(_) => Calculator::Indicators,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            CalculationRequest::Depreciation(input) => input.validate(),
            CalculationRequest::ProfitMargin(input) => input.validate(),
            CalculationRequest::TaxBreakdown(input) => input.validate(),
            CalculationRequest::Payroll(input) => input.validate(),
            CalculationRequest::BalanceSheet(input) => input.validate(),
            CalculationRequest::Budget(input) => input.validate(),
            CalculationRequest::CashFlow(input) => input.validate(),
            CalculationRequest::IncomeStatement(input) => input.validate(),
            CalculationRequest::Indicators(input) => input.validate(),
        }
    }

    /// Runs the matching calculator. Fails only when the input violates its constraints.
    pub fn calculate(&self) -> Result<CalculationResponse> {
        debug!("Running {} calculator", self.calculator());

        let response = match self {
            CalculationRequest::Depreciation(input) => depreciation::calculate(input)?.into_response(),
            CalculationRequest::ProfitMargin(input) => profit_margin::calculate(input)?.into_response(),
            CalculationRequest::TaxBreakdown(input) => taxes::calculate(input)?.into_response(),
            CalculationRequest::Payroll(input) => payroll::calculate(input)?.into_response(),
            CalculationRequest::BalanceSheet(input) => balance_sheet::calculate(input)?.into_response(),
            CalculationRequest::Budget(input) => budget::calculate(input)?.into_response(),
            CalculationRequest::CashFlow(input) => cash_flow::project(input)?.into_response(),
            CalculationRequest::IncomeStatement(input) => {
                income_statement::analyze(input)?.into_response()
            }
            CalculationRequest::Indicators(input) => indicators::analyze(input)?.into_response(),
        };

        debug!(
            "{} produced {} metrics and {} assessments",
            response.calculator,
            response.metrics.len(),
            response.assessments.len()
        );

        Ok(response)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(CalculationRequest)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub fn calculate(request: &CalculationRequest) -> Result<CalculationResponse> {
    request.calculate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_calculator_runs_on_defaults() {
        for calculator in Calculator::ALL {
            let request = calculator.default_request();
            assert_eq!(request.calculator(), calculator);
            let response = request.calculate().unwrap();
            assert_eq!(response.calculator, calculator);
            assert!(!response.metrics.is_empty(), "{} has no metrics", calculator);
        }
    }

    #[test]
    fn test_request_json_round_trip_tagging() {
        let json = r#"{"calculator": "Payroll", "input": {"base_salary": 1320.0}}"#;
        let request = CalculationRequest::from_json(json).unwrap();
        assert_eq!(request.calculator(), Calculator::Payroll);

        let response = request.calculate().unwrap();
        assert!((response.value("social_security_withholding").unwrap() - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let request = CalculationRequest::Depreciation(DepreciationInput {
            asset_value: 100.0,
            useful_life_years: 0,
        });
        assert!(request.validate().is_err());
        assert!(calculate(&request).is_err());
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = CalculationRequest::schema_as_json().unwrap();
        assert!(schema_json.contains("useful_life_years"));
        assert!(schema_json.contains("transportation_allowance"));
        assert!(schema_json.contains("OperatingCosts"));
    }
}
