//! DRE (income statement) analysis: cascading profit lines, margins over net revenue
//! and a vertical analysis over gross revenue.

use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{Assessment, CalculationResponse, Cell, Chart, IntoResponse, Series, Table, Unit};
use crate::schema::IncomeStatementInput;
use crate::utils::percent_of;
use serde::{Deserialize, Serialize};

pub const HEALTHY_GROSS_MARGIN_PERCENT: f64 = 30.0;
pub const HEALTHY_OPERATING_MARGIN_PERCENT: f64 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalAnalysisLine {
    pub component: String,
    pub value: f64,
    pub percent_of_gross_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    pub gross_revenue: f64,
    pub deductions: f64,
    pub net_revenue: f64,
    pub cost_of_goods_sold: f64,
    pub gross_profit: f64,
    pub total_operating_expenses: f64,
    pub operating_profit: f64,
    pub gross_margin_percent: f64,
    pub operating_margin_percent: f64,
    pub vertical_analysis: Vec<VerticalAnalysisLine>,
    pub assessments: Vec<Assessment>,
}

pub fn analyze(input: &IncomeStatementInput) -> Result<IncomeStatementReport> {
    input.validate()?;

    let net_revenue = input.gross_revenue - input.deductions;
    let gross_profit = net_revenue - input.cost_of_goods_sold;
    let total_operating_expenses =
        input.selling_expenses + input.administrative_expenses + input.financial_expenses;
    let operating_profit = gross_profit - total_operating_expenses;

    let gross_margin_percent = percent_of(gross_profit, net_revenue);
    let operating_margin_percent = percent_of(operating_profit, net_revenue);

    let vertical_analysis = [
        ("Deductions", input.deductions),
        ("COGS", input.cost_of_goods_sold),
        ("Operating Expenses", total_operating_expenses),
        ("Operating Profit", operating_profit),
    ]
    .into_iter()
    .map(|(component, value)| VerticalAnalysisLine {
        component: component.to_string(),
        value,
        percent_of_gross_revenue: percent_of(value, input.gross_revenue),
    })
    .collect();

    let mut assessments = Vec::with_capacity(3);
    if gross_margin_percent > HEALTHY_GROSS_MARGIN_PERCENT {
        assessments.push(Assessment::good("Good gross margin (>30%)"));
    } else {
        assessments.push(Assessment::warning("Gross margin is below the ideal level"));
    }
    if operating_margin_percent > HEALTHY_OPERATING_MARGIN_PERCENT {
        assessments.push(Assessment::good("Good operating margin (>15%)"));
    } else {
        assessments.push(Assessment::warning("Operating margin needs attention"));
    }
    if total_operating_expenses > gross_profit {
        assessments.push(Assessment::alert(
            "Operating expenses exceed gross profit",
        ));
    }

    Ok(IncomeStatementReport {
        gross_revenue: input.gross_revenue,
        deductions: input.deductions,
        net_revenue,
        cost_of_goods_sold: input.cost_of_goods_sold,
        gross_profit,
        total_operating_expenses,
        operating_profit,
        gross_margin_percent,
        operating_margin_percent,
        vertical_analysis,
        assessments,
    })
}

impl IntoResponse for IncomeStatementReport {
    fn into_response(self) -> CalculationResponse {
        let mut table = Table::new("Vertical analysis", &["Component", "Value", "% of Revenue"]);
        for line in &self.vertical_analysis {
            table.push_row(vec![
                Cell::text(line.component.clone()),
                Cell::value(line.value, Unit::Currency),
                Cell::value(line.percent_of_gross_revenue, Unit::Percent),
            ]);
        }

        let chart = Chart::bar(
            "Result composition",
            vec![Series::new(
                "Value",
                self.vertical_analysis
                    .iter()
                    .map(|l| (l.component.clone(), l.value)),
            )],
        );

        CalculationResponse::new(Calculator::IncomeStatement)
            .with_metric("gross_revenue", "Gross revenue", self.gross_revenue, Unit::Currency)
            .with_metric("deductions", "(-) Deductions", self.deductions, Unit::Currency)
            .with_metric("net_revenue", "Net revenue", self.net_revenue, Unit::Currency)
            .with_metric("cost_of_goods_sold", "(-) COGS", self.cost_of_goods_sold, Unit::Currency)
            .with_metric("gross_profit", "Gross profit", self.gross_profit, Unit::Currency)
            .with_metric(
                "total_operating_expenses",
                "(-) Operating expenses",
                self.total_operating_expenses,
                Unit::Currency,
            )
            .with_metric("operating_profit", "Operating profit", self.operating_profit, Unit::Currency)
            .with_metric(
                "gross_margin_percent",
                "Gross margin",
                self.gross_margin_percent,
                Unit::Percent,
            )
            .with_metric(
                "operating_margin_percent",
                "Operating margin",
                self.operating_margin_percent,
                Unit::Percent,
            )
            .with_table(table)
            .with_chart(chart)
            .with_assessments(self.assessments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;

    #[test]
    fn test_profit_cascade() {
        let report = analyze(&IncomeStatementInput {
            gross_revenue: 1000.0,
            deductions: 100.0,
            cost_of_goods_sold: 400.0,
            selling_expenses: 50.0,
            administrative_expenses: 80.0,
            financial_expenses: 20.0,
        })
        .unwrap();

        assert_eq!(report.net_revenue, 900.0);
        assert_eq!(report.gross_profit, 500.0);
        assert_eq!(report.total_operating_expenses, 150.0);
        assert_eq!(report.operating_profit, 350.0);
        assert!((report.gross_margin_percent - 500.0 / 900.0 * 100.0).abs() < 1e-9);
        assert!((report.operating_margin_percent - 350.0 / 900.0 * 100.0).abs() < 1e-9);

        let percents: Vec<f64> = report
            .vertical_analysis
            .iter()
            .map(|l| l.percent_of_gross_revenue)
            .collect();
        for (actual, expected) in percents.iter().zip([10.0, 40.0, 15.0, 35.0]) {
            assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
        }

        let severities: Vec<Severity> = report.assessments.iter().map(|a| a.severity).collect();
        assert_eq!(severities, vec![Severity::Good, Severity::Good]);
    }

    #[test]
    fn test_zero_gross_revenue_vertical_analysis_is_zero() {
        let report = analyze(&IncomeStatementInput {
            gross_revenue: 0.0,
            cost_of_goods_sold: 100.0,
            selling_expenses: 10.0,
            ..Default::default()
        })
        .unwrap();

        assert!(report
            .vertical_analysis
            .iter()
            .all(|l| l.percent_of_gross_revenue == 0.0));
        assert_eq!(report.gross_margin_percent, 0.0);
        assert_eq!(report.operating_margin_percent, 0.0);
    }

    #[test]
    fn test_margins_exactly_at_threshold_are_not_good() {
        let report = analyze(&IncomeStatementInput {
            gross_revenue: 1000.0,
            deductions: 0.0,
            cost_of_goods_sold: 700.0,
            selling_expenses: 100.0,
            administrative_expenses: 50.0,
            financial_expenses: 0.0,
        })
        .unwrap();

        assert_eq!(report.gross_margin_percent, 30.0);
        assert_eq!(report.operating_margin_percent, 15.0);
        let severities: Vec<Severity> = report.assessments.iter().map(|a| a.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Warning]);
    }

    #[test]
    fn test_expenses_above_gross_profit_alerts() {
        let report = analyze(&IncomeStatementInput {
            gross_revenue: 1000.0,
            deductions: 0.0,
            cost_of_goods_sold: 800.0,
            selling_expenses: 150.0,
            administrative_expenses: 100.0,
            financial_expenses: 0.0,
        })
        .unwrap();

        assert_eq!(report.operating_profit, -50.0);
        assert_eq!(report.assessments.len(), 3);
        assert_eq!(report.assessments[0].severity, Severity::Warning);
        assert_eq!(report.assessments[1].severity, Severity::Warning);
        assert_eq!(report.assessments[2].severity, Severity::Alert);
    }
}
