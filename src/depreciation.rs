use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{CalculationResponse, Cell, Chart, IntoResponse, Series, Table, Unit};
use crate::schema::DepreciationInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationYear {
    pub year: u32,
    pub opening_balance: f64,
    pub depreciation: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationReport {
    pub annual_depreciation: f64,
    pub monthly_depreciation: f64,
    pub schedule: Vec<DepreciationYear>,
}

/// Straight-line depreciation of an asset over its useful life.
pub fn calculate(input: &DepreciationInput) -> Result<DepreciationReport> {
    input.validate()?;

    let annual = input.asset_value / input.useful_life_years as f64;
    let monthly = annual / 12.0;

    let mut schedule = Vec::with_capacity(input.useful_life_years as usize);
    let mut balance = input.asset_value;
    for year in 1..=input.useful_life_years {
        let closing = balance - annual;
        schedule.push(DepreciationYear {
            year,
            opening_balance: balance,
            depreciation: annual,
            closing_balance: closing,
        });
        balance = closing;
    }

    Ok(DepreciationReport {
        annual_depreciation: annual,
        monthly_depreciation: monthly,
        schedule,
    })
}

impl IntoResponse for DepreciationReport {
    fn into_response(self) -> CalculationResponse {
        let mut table = Table::new(
            "Annual depreciation schedule",
            &["Year", "Opening Balance", "Depreciation", "Closing Balance"],
        );
        for row in &self.schedule {
            table.push_row(vec![
                Cell::value(row.year as f64, Unit::Count),
                Cell::value(row.opening_balance, Unit::Currency),
                Cell::value(row.depreciation, Unit::Currency),
                Cell::value(row.closing_balance, Unit::Currency),
            ]);
        }

        let chart = Chart::line(
            "Book value by year",
            vec![Series::new(
                "Closing Balance",
                self.schedule
                    .iter()
                    .map(|r| (format!("Year {}", r.year), r.closing_balance)),
            )],
        );

        CalculationResponse::new(Calculator::Depreciation)
            .with_metric(
                "annual_depreciation",
                "Annual depreciation",
                self.annual_depreciation,
                Unit::Currency,
            )
            .with_metric(
                "monthly_depreciation",
                "Monthly depreciation",
                self.monthly_depreciation,
                Unit::Currency,
            )
            .with_table(table)
            .with_chart(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_schedule() {
        let report = calculate(&DepreciationInput {
            asset_value: 12_000.0,
            useful_life_years: 5,
        })
        .unwrap();

        assert!((report.annual_depreciation - 2_400.0).abs() < 1e-9);
        assert!((report.monthly_depreciation - 200.0).abs() < 1e-9);
        assert_eq!(report.schedule.len(), 5);

        let first = &report.schedule[0];
        assert_eq!(first.year, 1);
        assert!((first.opening_balance - 12_000.0).abs() < 1e-9);
        assert!((first.closing_balance - 9_600.0).abs() < 1e-9);

        for pair in report.schedule.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
        }
    }

    #[test]
    fn test_final_balance_reaches_zero() {
        for (value, life) in [(1000.0, 3), (99_999.99, 7), (0.0, 1), (1.0, 30)] {
            let report = calculate(&DepreciationInput {
                asset_value: value,
                useful_life_years: life,
            })
            .unwrap();
            let last = report.schedule.last().unwrap();
            assert!(
                last.closing_balance.abs() < 1e-6,
                "value={} life={} closing={}",
                value,
                life,
                last.closing_balance
            );
        }
    }

    #[test]
    fn test_zero_life_rejected() {
        let result = calculate(&DepreciationInput {
            asset_value: 500.0,
            useful_life_years: 0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_response_has_schedule_table() {
        let response = calculate(&DepreciationInput {
            asset_value: 3_000.0,
            useful_life_years: 3,
        })
        .unwrap()
        .into_response();

        assert_eq!(response.value("annual_depreciation"), Some(1_000.0));
        let table = response.table.as_ref().unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(response.assessments.is_empty());
    }
}
