use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{Assessment, CalculationResponse, Cell, Chart, IntoResponse, Series, Table, Unit};
use crate::schema::{BudgetCategory, BudgetInput, BudgetPeriod};
use crate::utils::percent_of;
use serde::{Deserialize, Serialize};

/// Lines whose absolute variance exceeds this percentage are flagged.
pub const VARIANCE_THRESHOLD_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarianceDirection {
    Over,
    Under,
    OnTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: BudgetCategory,
    pub planned: f64,
    pub actual: f64,
    pub variance: f64,
    pub variance_percent: f64,
    pub direction: VarianceDirection,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub period: BudgetPeriod,
    pub lines: Vec<BudgetLine>,
    pub total_planned: f64,
    pub total_actual: f64,
    pub total_variance: f64,
    pub total_variance_percent: f64,
    pub assessments: Vec<Assessment>,
}

impl BudgetReport {
    pub fn line(&self, category: BudgetCategory) -> Option<&BudgetLine> {
        self.lines.iter().find(|l| l.category == category)
    }
}

fn budget_line(category: BudgetCategory, planned: f64, actual: f64) -> BudgetLine {
    let variance = actual - planned;
    let variance_percent = percent_of(variance, planned);

    let direction = if variance > 0.0 {
        VarianceDirection::Over
    } else if variance < 0.0 {
        VarianceDirection::Under
    } else {
        VarianceDirection::OnTarget
    };

    BudgetLine {
        category,
        planned,
        actual,
        variance,
        variance_percent,
        direction,
        flagged: variance_percent.abs() > VARIANCE_THRESHOLD_PERCENT,
    }
}

pub fn calculate(input: &BudgetInput) -> Result<BudgetReport> {
    input.validate()?;

    let lines: Vec<BudgetLine> = BudgetCategory::ALL
        .iter()
        .map(|&category| {
            let (planned, actual) = input.amounts_for(category);
            budget_line(category, planned, actual)
        })
        .collect();

    let total_planned: f64 = lines.iter().map(|l| l.planned).sum();
    let total_actual: f64 = lines.iter().map(|l| l.actual).sum();
    let total_variance = total_actual - total_planned;

    let assessments = lines
        .iter()
        .filter(|l| l.flagged)
        .map(|l| {
            if l.variance > 0.0 {
                Assessment::warning(format!(
                    "{}: actual {:.1}% above planned",
                    l.category, l.variance_percent
                ))
            } else {
                Assessment::info(format!(
                    "{}: actual {:.1}% below planned",
                    l.category,
                    l.variance_percent.abs()
                ))
            }
        })
        .collect();

    Ok(BudgetReport {
        period: input.period,
        total_planned,
        total_actual,
        total_variance,
        total_variance_percent: percent_of(total_variance, total_planned),
        lines,
        assessments,
    })
}

impl IntoResponse for BudgetReport {
    fn into_response(self) -> CalculationResponse {
        let mut table = Table::new(
            format!("{} budget detail", self.period.label()),
            &["Category", "Planned", "Actual", "Variance", "Variance %"],
        );
        for line in &self.lines {
            table.push_row(vec![
                Cell::text(line.category.label()),
                Cell::value(line.planned, Unit::Currency),
                Cell::value(line.actual, Unit::Currency),
                Cell::value(line.variance, Unit::Currency),
                Cell::value(line.variance_percent, Unit::Percent),
            ]);
        }

        let chart = Chart::bar(
            "Planned vs actual",
            vec![
                Series::new(
                    "Planned",
                    self.lines.iter().map(|l| (l.category.label(), l.planned)),
                ),
                Series::new(
                    "Actual",
                    self.lines.iter().map(|l| (l.category.label(), l.actual)),
                ),
            ],
        );

        CalculationResponse::new(Calculator::Budget)
            .with_metric("total_planned", "Total planned", self.total_planned, Unit::Currency)
            .with_metric("total_actual", "Total actual", self.total_actual, Unit::Currency)
            .with_metric("total_variance", "Variance", self.total_variance, Unit::Currency)
            .with_metric(
                "total_variance_percent",
                "Variance %",
                self.total_variance_percent,
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
    use crate::schema::BudgetEntry;

    #[test]
    fn test_over_budget_line_is_flagged() {
        let report = calculate(&BudgetInput {
            period: BudgetPeriod::Monthly,
            entries: vec![BudgetEntry::new(BudgetCategory::Sales, 100.0, 120.0)],
        })
        .unwrap();

        let sales = report.line(BudgetCategory::Sales).unwrap();
        assert_eq!(sales.variance, 20.0);
        assert!((sales.variance_percent - 20.0).abs() < 1e-9);
        assert!(sales.flagged);
        assert_eq!(sales.direction, VarianceDirection::Over);

        assert_eq!(report.assessments.len(), 1);
        assert_eq!(report.assessments[0].severity, Severity::Warning);
        assert_eq!(report.assessments[0].message, "Sales: actual 20.0% above planned");
    }

    #[test]
    fn test_under_budget_is_informational() {
        let report = calculate(&BudgetInput {
            period: BudgetPeriod::Annual,
            entries: vec![BudgetEntry::new(BudgetCategory::Marketing, 200.0, 150.0)],
        })
        .unwrap();

        let marketing = report.line(BudgetCategory::Marketing).unwrap();
        assert_eq!(marketing.direction, VarianceDirection::Under);
        assert!(marketing.flagged);
        assert_eq!(report.assessments[0].severity, Severity::Info);
        assert_eq!(report.assessments[0].message, "Marketing: actual 25.0% below planned");
    }

    #[test]
    fn test_threshold_is_exclusive_and_zero_plan_never_flags() {
        let report = calculate(&BudgetInput {
            period: BudgetPeriod::Monthly,
            entries: vec![
                BudgetEntry::new(BudgetCategory::Services, 100.0, 110.0),
                BudgetEntry::new(BudgetCategory::Other, 0.0, 500.0),
            ],
        })
        .unwrap();

        assert!(!report.line(BudgetCategory::Services).unwrap().flagged);
        let other = report.line(BudgetCategory::Other).unwrap();
        assert_eq!(other.variance_percent, 0.0);
        assert!(!other.flagged);
        assert!(report.assessments.is_empty());
    }

    #[test]
    fn test_lines_follow_fixed_category_order_and_totals() {
        let report = calculate(&BudgetInput {
            period: BudgetPeriod::Quarterly,
            entries: vec![
                BudgetEntry::new(BudgetCategory::Other, 50.0, 40.0),
                BudgetEntry::new(BudgetCategory::Sales, 1000.0, 1100.0),
            ],
        })
        .unwrap();

        let order: Vec<BudgetCategory> = report.lines.iter().map(|l| l.category).collect();
        assert_eq!(order, BudgetCategory::ALL.to_vec());
        assert_eq!(report.total_planned, 1050.0);
        assert_eq!(report.total_actual, 1140.0);
        assert_eq!(report.total_variance, 90.0);
        assert!((report.total_variance_percent - 90.0 / 1050.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_budget_totals_are_zero() {
        let report = calculate(&BudgetInput::default()).unwrap();
        assert_eq!(report.lines.len(), 7);
        assert_eq!(report.total_variance_percent, 0.0);
        assert!(report
            .lines
            .iter()
            .all(|l| l.direction == VarianceDirection::OnTarget));
    }
}
