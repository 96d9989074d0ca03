use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{Assessment, CalculationResponse, Chart, IntoResponse, Series, Unit};
use crate::schema::BalanceSheetInput;
use crate::utils::{percent_of, safe_ratio};
use serde::{Deserialize, Serialize};

pub const HEALTHY_CURRENT_RATIO: f64 = 1.0;
pub const MAX_HEALTHY_LEVERAGE_PERCENT: f64 = 60.0;
pub const MIN_HEALTHY_ROE_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRatios {
    pub current_ratio: f64,
    pub quick_ratio: f64,
    pub cash_ratio: f64,
    pub leverage_percent: f64,
    pub return_on_equity_percent: f64,
    pub net_margin_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetComposition {
    pub available: f64,
    pub inventory: f64,
    /// Total assets minus available and inventory; negative when the inputs are inconsistent
    pub other_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    pub ratios: BalanceSheetRatios,
    pub composition: AssetComposition,
    pub assessments: Vec<Assessment>,
}

pub fn calculate(input: &BalanceSheetInput) -> Result<BalanceSheetReport> {
    input.validate()?;

    let ratios = BalanceSheetRatios {
        current_ratio: safe_ratio(input.current_assets, input.current_liabilities),
        quick_ratio: safe_ratio(
            input.current_assets - input.inventory,
            input.current_liabilities,
        ),
        cash_ratio: safe_ratio(input.available, input.current_liabilities),
        leverage_percent: percent_of(input.total_liabilities, input.total_assets),
        return_on_equity_percent: percent_of(input.net_profit, input.equity),
        net_margin_percent: percent_of(input.net_profit, input.net_sales),
    };

    let composition = AssetComposition {
        available: input.available,
        inventory: input.inventory,
        other_assets: input.total_assets - input.available - input.inventory,
    };

    let assessments = assess(&ratios);

    Ok(BalanceSheetReport {
        ratios,
        composition,
        assessments,
    })
}

/// Liquidity, leverage and profitability notes, always in that order.
pub fn assess(ratios: &BalanceSheetRatios) -> Vec<Assessment> {
    let mut notes = Vec::with_capacity(3);

    if ratios.current_ratio > HEALTHY_CURRENT_RATIO {
        notes.push(Assessment::good("The company has good current liquidity"));
    } else {
        notes.push(Assessment::warning("Current liquidity is below the ideal level"));
    }

    if ratios.leverage_percent < MAX_HEALTHY_LEVERAGE_PERCENT {
        notes.push(Assessment::good("Debt level is adequate"));
    } else {
        notes.push(Assessment::warning("High level of indebtedness"));
    }

    if ratios.return_on_equity_percent > MIN_HEALTHY_ROE_PERCENT {
        notes.push(Assessment::good("Good return on equity"));
    } else {
        notes.push(Assessment::warning("Return on equity is below expectations"));
    }

    notes
}

impl IntoResponse for BalanceSheetReport {
    fn into_response(self) -> CalculationResponse {
        let r = &self.ratios;
        let chart = Chart::bar(
            "Asset composition",
            vec![Series::new(
                "Value",
                [
                    ("Available", self.composition.available),
                    ("Inventory", self.composition.inventory),
                    ("Other Assets", self.composition.other_assets),
                ],
            )],
        );

        CalculationResponse::new(Calculator::BalanceSheet)
            .with_metric("current_ratio", "Current ratio", r.current_ratio, Unit::Ratio)
            .with_metric("quick_ratio", "Quick ratio", r.quick_ratio, Unit::Ratio)
            .with_metric("cash_ratio", "Cash ratio", r.cash_ratio, Unit::Ratio)
            .with_metric("leverage_percent", "Leverage", r.leverage_percent, Unit::Percent)
            .with_metric(
                "return_on_equity_percent",
                "Return on equity",
                r.return_on_equity_percent,
                Unit::Percent,
            )
            .with_metric("net_margin_percent", "Net margin", r.net_margin_percent, Unit::Percent)
            .with_chart(chart)
            .with_assessments(self.assessments)
    }
}
