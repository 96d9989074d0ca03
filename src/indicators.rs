use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{Assessment, CalculationResponse, Chart, IntoResponse, Series, Unit};
use crate::schema::IndicatorInput;
use crate::utils::{percent_of, safe_ratio};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub return_on_sales_percent: f64,
    pub return_on_assets_percent: f64,
    pub return_on_equity_percent: f64,
    pub collection_period_days: f64,
    pub payment_period_days: f64,
    pub operating_cycle_days: f64,
    /// Operating cycle minus payment period; negative when suppliers finance the cycle
    pub cash_conversion_cycle_days: f64,
    pub assessments: Vec<Assessment>,
    pub recommendations: Vec<Assessment>,
}

pub fn analyze(input: &IndicatorInput) -> Result<IndicatorReport> {
    input.validate()?;

    let return_on_sales = percent_of(input.net_profit, input.revenue);
    let return_on_assets = percent_of(input.net_profit, input.total_assets);
    let return_on_equity = percent_of(input.net_profit, input.equity);

    let inventory_days = safe_ratio(DAYS_PER_YEAR, input.inventory_turnover);
    let operating_cycle = input.collection_period_days + inventory_days;
    let cash_conversion_cycle = operating_cycle - input.payment_period_days;

    let mut assessments = Vec::with_capacity(2);
    assessments.push(if return_on_sales > 15.0 {
        Assessment::excellent("Excellent return on sales")
    } else if return_on_sales > 10.0 {
        Assessment::good("Good return on sales")
    } else {
        Assessment::warning("Return on sales needs attention")
    });
    assessments.push(if cash_conversion_cycle < 30.0 {
        Assessment::excellent("Efficient cash conversion cycle")
    } else if cash_conversion_cycle < 45.0 {
        Assessment::good("Adequate cash conversion cycle")
    } else {
        Assessment::warning("Long cash conversion cycle, consider optimizing it")
    });

    let mut recommendations = Vec::new();
    if cash_conversion_cycle > input.payment_period_days {
        recommendations.push(Assessment::advice(
            "Consider negotiating longer payment terms with suppliers",
        ));
    }
    if input.collection_period_days > 45.0 {
        recommendations.push(Assessment::advice(
            "Review policies to shorten the collection period",
        ));
    }
    if return_on_sales < 10.0 {
        recommendations.push(Assessment::advice(
            "Analyze the cost structure and pricing policy",
        ));
    }

    Ok(IndicatorReport {
        return_on_sales_percent: return_on_sales,
        return_on_assets_percent: return_on_assets,
        return_on_equity_percent: return_on_equity,
        collection_period_days: input.collection_period_days,
        payment_period_days: input.payment_period_days,
        operating_cycle_days: operating_cycle,
        cash_conversion_cycle_days: cash_conversion_cycle,
        assessments,
        recommendations,
    })
}

impl IntoResponse for IndicatorReport {
    fn into_response(self) -> CalculationResponse {
        let chart = Chart::bar(
            "Cycle comparison",
            vec![Series::new(
                "Days",
                [
                    ("Collection Period", self.collection_period_days),
                    ("Payment Period", self.payment_period_days),
                    ("Operating Cycle", self.operating_cycle_days),
                    ("Cash Conversion Cycle", self.cash_conversion_cycle_days),
                ],
            )],
        );

        let mut notes = self.assessments;
        notes.extend(self.recommendations);

        CalculationResponse::new(Calculator::Indicators)
            .with_metric(
                "return_on_sales_percent",
                "Return on sales",
                self.return_on_sales_percent,
                Unit::Percent,
            )
            .with_metric(
                "return_on_assets_percent",
                "Return on assets",
                self.return_on_assets_percent,
                Unit::Percent,
            )
            .with_metric(
                "return_on_equity_percent",
                "Return on equity",
                self.return_on_equity_percent,
                Unit::Percent,
            )
            .with_metric(
                "operating_cycle_days",
                "Operating cycle",
                self.operating_cycle_days,
                Unit::Days,
            )
            .with_metric(
                "cash_conversion_cycle_days",
                "Cash conversion cycle",
                self.cash_conversion_cycle_days,
                Unit::Days,
            )
            .with_chart(chart)
            .with_assessments(notes)
    }
}
