//! Monthly payroll: earnings, social-security withholding and benefit deductions.
//!
//! The withholding uses a bracket lookup on the base salary and applies the matched
//! rate to the *whole* salary. It is not a marginal scheme: a salary of 1320.01 pays 9%
//! on every real, not 9% on the single cent above the first threshold.

use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{CalculationResponse, Chart, IntoResponse, Series, Unit};
use crate::schema::PayrollInput;
use serde::{Deserialize, Serialize};

/// Upper salary limit (inclusive) and rate of each withholding bracket.
pub const WITHHOLDING_BRACKETS: [(f64, f64); 3] = [(1320.00, 0.075), (2571.29, 0.09), (3856.94, 0.12)];

/// Rate applied above the last bracket limit.
pub const WITHHOLDING_TOP_RATE: f64 = 0.14;

pub const TRANSPORTATION_DEDUCTION_RATE: f64 = 0.06;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    pub base_salary: f64,
    pub overtime_pay: f64,
    pub meal_allowance: f64,
    pub withholding_rate: f64,
    pub social_security_withholding: f64,
    pub transportation_deduction: f64,
    pub total_earnings: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

/// Flat withholding rate for the bracket containing `base_salary`.
pub fn withholding_rate(base_salary: f64) -> f64 {
    WITHHOLDING_BRACKETS
        .iter()
        .find(|(limit, _)| base_salary <= *limit)
        .map(|(_, rate)| *rate)
        .unwrap_or(WITHHOLDING_TOP_RATE)
}

pub fn calculate(input: &PayrollInput) -> Result<PayrollReport> {
    input.validate()?;

    let overtime_pay = input.overtime_hours * input.overtime_hourly_rate;

    let rate = withholding_rate(input.base_salary);
    let withholding = input.base_salary * rate;

    let transportation_deduction = if input.transportation_allowance {
        input.base_salary * TRANSPORTATION_DEDUCTION_RATE
    } else {
        0.0
    };

    let total_earnings = input.base_salary + overtime_pay + input.meal_allowance;
    let total_deductions = withholding + transportation_deduction;

    Ok(PayrollReport {
        base_salary: input.base_salary,
        overtime_pay,
        meal_allowance: input.meal_allowance,
        withholding_rate: rate,
        social_security_withholding: withholding,
        transportation_deduction,
        total_earnings,
        total_deductions,
        net_salary: total_earnings - total_deductions,
    })
}

impl IntoResponse for PayrollReport {
    fn into_response(self) -> CalculationResponse {
        let chart = Chart::bar(
            "Salary composition",
            vec![Series::new(
                "Value",
                [
                    ("Base Salary", self.base_salary),
                    ("Overtime", self.overtime_pay),
                    ("Benefits", self.meal_allowance),
                    ("Deductions", -self.total_deductions),
                ],
            )],
        );

        CalculationResponse::new(Calculator::Payroll)
            .with_metric("base_salary", "Base salary", self.base_salary, Unit::Currency)
            .with_metric("overtime_pay", "Overtime", self.overtime_pay, Unit::Currency)
            .with_metric("meal_allowance", "Meal allowance", self.meal_allowance, Unit::Currency)
            .with_metric("total_earnings", "Total earnings", self.total_earnings, Unit::Currency)
            .with_metric(
                "withholding_rate",
                "Social security rate",
                self.withholding_rate * 100.0,
                Unit::Percent,
            )
            .with_metric(
                "social_security_withholding",
                "Social security",
                self.social_security_withholding,
                Unit::Currency,
            )
            .with_metric(
                "transportation_deduction",
                "Transportation allowance",
                self.transportation_deduction,
                Unit::Currency,
            )
            .with_metric(
                "total_deductions",
                "Total deductions",
                self.total_deductions,
                Unit::Currency,
            )
            .with_metric("net_salary", "Net salary", self.net_salary, Unit::Currency)
            .with_chart(chart)
    }
}
