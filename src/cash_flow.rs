use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{Assessment, CalculationResponse, Cell, Chart, IntoResponse, Series, Table, Unit};
use crate::schema::CashFlowInput;
use crate::utils::{format_currency, month_ends_from};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowMonth {
    pub month: u32,
    /// "Month N", or the month-end date when the projection has a start date
    pub label: String,
    pub month_end: Option<NaiveDate>,
    pub inflows: f64,
    pub outflows: f64,
    pub net_flow: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub opening_balance: f64,
    pub monthly_inflows: f64,
    pub monthly_outflows: f64,
    pub monthly_net_flow: f64,
    pub months: Vec<CashFlowMonth>,
    pub closing_balance: f64,
    pub balance_change: f64,
    pub assessments: Vec<Assessment>,
}

/// Projects a flat recurring cash flow: every month has the same inflows and outflows.
pub fn project(input: &CashFlowInput) -> Result<CashFlowProjection> {
    input.validate()?;

    let monthly_inflows = input.inflows.total();
    let monthly_outflows = input.outflows.total();
    let net = monthly_inflows - monthly_outflows;

    let month_ends: Vec<Option<NaiveDate>> = match input.start_date {
        Some(first) => month_ends_from(first, input.months)
            .into_iter()
            .map(Some)
            .collect(),
        None => vec![None; input.months as usize],
    };

    let mut balance = input.opening_balance;
    let mut months = Vec::with_capacity(input.months as usize);
    for (idx, month_end) in month_ends.into_iter().enumerate() {
        let month = idx as u32 + 1;
        balance += net;
        let label = match month_end {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => format!("Month {}", month),
        };
        months.push(CashFlowMonth {
            month,
            label,
            month_end,
            inflows: monthly_inflows,
            outflows: monthly_outflows,
            net_flow: net,
            closing_balance: balance,
        });
    }

    let balance_change = balance - input.opening_balance;
    let assessments = assess(net, input.opening_balance, balance);

    Ok(CashFlowProjection {
        opening_balance: input.opening_balance,
        monthly_inflows,
        monthly_outflows,
        monthly_net_flow: net,
        months,
        closing_balance: balance,
        balance_change,
        assessments,
    })
}

fn assess(net: f64, opening: f64, closing: f64) -> Vec<Assessment> {
    let mut notes = Vec::with_capacity(2);

    if net > 0.0 {
        notes.push(Assessment::good(format!(
            "Positive cash flow of {} per month",
            format_currency(net)
        )));
    } else {
        notes.push(Assessment::alert(format!(
            "Negative cash flow of {} per month",
            format_currency(net.abs())
        )));
    }

    let change = closing - opening;
    if closing > opening {
        notes.push(Assessment::good(format!(
            "Projected balance increase of {}",
            format_currency(change)
        )));
    } else {
        notes.push(Assessment::warning(format!(
            "Projected balance reduction of {}",
            format_currency(change.abs())
        )));
    }

    notes
}

impl IntoResponse for CashFlowProjection {
    fn into_response(self) -> CalculationResponse {
        let mut table = Table::new(
            "Detailed projection",
            &["Month", "Inflows", "Outflows", "Net Flow", "Closing Balance"],
        );
        for m in &self.months {
            table.push_row(vec![
                Cell::text(m.label.clone()),
                Cell::value(m.inflows, Unit::Currency),
                Cell::value(m.outflows, Unit::Currency),
                Cell::value(m.net_flow, Unit::Currency),
                Cell::value(m.closing_balance, Unit::Currency),
            ]);
        }

        let chart = Chart::line(
            "Balance evolution",
            vec![Series::new(
                "Closing Balance",
                self.months
                    .iter()
                    .map(|m| (m.label.clone(), m.closing_balance)),
            )],
        );

        CalculationResponse::new(Calculator::CashFlow)
            .with_metric(
                "monthly_inflows",
                "Total monthly inflows",
                self.monthly_inflows,
                Unit::Currency,
            )
            .with_metric(
                "monthly_outflows",
                "Total monthly outflows",
                self.monthly_outflows,
                Unit::Currency,
            )
            .with_metric(
                "monthly_net_flow",
                "Monthly net flow",
                self.monthly_net_flow,
                Unit::Currency,
            )
            .with_metric("closing_balance", "Closing balance", self.closing_balance, Unit::Currency)
            .with_metric("balance_change", "Balance change", self.balance_change, Unit::Currency)
            .with_table(table)
            .with_chart(chart)
            .with_assessments(self.assessments)
    }
}
