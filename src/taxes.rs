use crate::calculator::Calculator;
use crate::error::Result;
use crate::report::{CalculationResponse, Chart, IntoResponse, Series, Unit};
use crate::schema::TaxBreakdownInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdownReport {
    pub pis: f64,
    pub cofins: f64,
    pub iss: f64,
    pub total: f64,
}

/// Applies each rate independently to the same base; taxes do not compound.
pub fn calculate(input: &TaxBreakdownInput) -> Result<TaxBreakdownReport> {
    input.validate()?;

    let pis = input.base_value * (input.rates.pis / 100.0);
    let cofins = input.base_value * (input.rates.cofins / 100.0);
    let iss = input.base_value * (input.rates.iss / 100.0);

    Ok(TaxBreakdownReport {
        pis,
        cofins,
        iss,
        total: pis + cofins + iss,
    })
}

impl IntoResponse for TaxBreakdownReport {
    fn into_response(self) -> CalculationResponse {
        let chart = Chart::bar(
            "Tax distribution",
            vec![Series::new(
                "Value",
                [("PIS", self.pis), ("COFINS", self.cofins), ("ISS", self.iss)],
            )],
        );

        CalculationResponse::new(Calculator::TaxBreakdown)
            .with_metric("pis", "PIS", self.pis, Unit::Currency)
            .with_metric("cofins", "COFINS", self.cofins, Unit::Currency)
            .with_metric("iss", "ISS", self.iss, Unit::Currency)
            .with_metric("total", "Total taxes", self.total, Unit::Currency)
            .with_chart(chart)
    }
}
