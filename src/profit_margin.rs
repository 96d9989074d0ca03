use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{CalculationResponse, Chart, IntoResponse, Series, Unit};
use crate::schema::ProfitMarginInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitMarginReport {
    pub cost: f64,
    pub profit: f64,
    /// `None` when the sale price is zero
    pub margin_percent: Option<f64>,
}

pub fn calculate(input: &ProfitMarginInput) -> Result<ProfitMarginReport> {
    input.validate()?;

    let profit = input.sale_price - input.total_cost;
    let margin_percent = if input.sale_price > 0.0 {
        Some(profit / input.sale_price * 100.0)
    } else {
        None
    };

    Ok(ProfitMarginReport {
        cost: input.total_cost,
        profit,
        margin_percent,
    })
}

impl IntoResponse for ProfitMarginReport {
    fn into_response(self) -> CalculationResponse {
        let chart = Chart::bar(
            "Price composition",
            vec![Series::new(
                "Value",
                [("Cost", self.cost), ("Profit", self.profit)],
            )],
        );

        CalculationResponse::new(Calculator::ProfitMargin)
            .with_optional_metric(
                "margin_percent",
                "Profit margin",
                self.margin_percent,
                Unit::Percent,
            )
            .with_metric("profit", "Profit", self.profit, Unit::Currency)
            .with_chart(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_over_price() {
        let report = calculate(&ProfitMarginInput {
            total_cost: 60.0,
            sale_price: 80.0,
        })
        .unwrap();
        assert_eq!(report.profit, 20.0);
        assert!((report.margin_percent.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_price_is_not_computable() {
        let report = calculate(&ProfitMarginInput {
            total_cost: 50.0,
            sale_price: 0.0,
        })
        .unwrap();
        assert_eq!(report.margin_percent, None);
        assert_eq!(report.profit, -50.0);

        let response = report.into_response();
        assert_eq!(
            response.metric("margin_percent").unwrap().formatted_value(),
            "not computable"
        );
    }

    #[test]
    fn test_loss_gives_negative_margin() {
        let report = calculate(&ProfitMarginInput {
            total_cost: 150.0,
            sale_price: 100.0,
        })
        .unwrap();
        assert!((report.margin_percent.unwrap() + 50.0).abs() < 1e-9);
    }
}
