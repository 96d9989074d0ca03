//! Presentation-neutral calculation responses.
//!
//! Every calculator produces its own strongly typed report. Reports convert into a
//! [`CalculationResponse`]: ordered metrics, an optional table, an optional chart
//! description and the ordered assessment list. A presentation layer only needs to
//! understand this one shape.

use crate::calculator::Calculator;
use crate::utils::{format_currency, format_grouped, format_percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a note judges the figures.
///
/// Two-tier checks (liquidity, leverage, margins, cash flow) only ever produce `Good` or a
/// negative severity. `Excellent` is reserved for the three-tier indicator checks, where
/// it sits above `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Excellent,
    Good,
    Info,
    Warning,
    Alert,
    /// Recommendation that does not judge the figures, only suggests an action
    Advice,
}

impl Severity {
    /// One marker per severity, so a `Good` note looks the same in every calculator.
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Excellent => "✅",
            Severity::Good => "✓",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Alert => "❗",
            Severity::Advice => "💡",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub severity: Severity,
    pub message: String,
}

impl Assessment {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn excellent(message: impl Into<String>) -> Self {
        Self::new(Severity::Excellent, message)
    }

    pub fn good(message: impl Into<String>) -> Self {
        Self::new(Severity::Good, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(Severity::Alert, message)
    }

    pub fn advice(message: impl Into<String>) -> Self {
        Self::new(Severity::Advice, message)
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Currency,
    Percent,
    Ratio,
    Days,
    Count,
}

impl Unit {
    pub fn format(&self, value: f64) -> String {
        match self {
            Unit::Currency => format_currency(value),
            Unit::Percent => format_percent(value),
            Unit::Ratio => format!("{:.2}", value),
            Unit::Days => format!("{} days", format_grouped(value, 0)),
            Unit::Count => format_grouped(value, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub label: String,
    /// `None` when the figure cannot be computed (e.g. a margin over a zero price)
    pub value: Option<f64>,
    pub unit: Unit,
}

impl Metric {
    pub fn formatted_value(&self) -> String {
        match self.value {
            Some(value) => self.unit.format(value),
            None => "not computable".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Value { value: f64, unit: Unit },
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn value(value: f64, unit: Unit) -> Self {
        Cell::Value { value, unit }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Value { value, .. } => Some(*value),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Value { value, unit } => f.write_str(&unit.format(*value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &rendered {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        writeln!(f, "{}", self.title)?;
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c, w = *w))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;
        for row in &rendered {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:>w$}", c, w = *w))
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl Series {
    pub fn new<L: Into<String>>(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (L, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            points: points
                .into_iter()
                .map(|(label, value)| ChartPoint {
                    label: label.into(),
                    value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn bar(title: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            title: title.into(),
            kind: ChartKind::Bar,
            series,
        }
    }

    pub fn line(title: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            title: title.into(),
            kind: ChartKind::Line,
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub calculator: Calculator,
    pub metrics: Vec<Metric>,
    pub table: Option<Table>,
    pub chart: Option<Chart>,
    pub assessments: Vec<Assessment>,
}

impl CalculationResponse {
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator,
            metrics: Vec::new(),
            table: None,
            chart: None,
            assessments: Vec::new(),
        }
    }

    pub fn with_metric(self, key: &str, label: &str, value: f64, unit: Unit) -> Self {
        self.with_optional_metric(key, label, Some(value), unit)
    }

    pub fn with_optional_metric(
        mut self,
        key: &str,
        label: &str,
        value: Option<f64>,
        unit: Unit,
    ) -> Self {
        self.metrics.push(Metric {
            key: key.to_string(),
            label: label.to_string(),
            value,
            unit,
        });
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn with_assessments(mut self, assessments: Vec<Assessment>) -> Self {
        self.assessments = assessments;
        self
    }

    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.key == key)
    }

    /// The value of metric `key`, `None` if it is missing or not computable.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.metric(key).and_then(|m| m.value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CalculationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.calculator.title())?;
        for metric in &self.metrics {
            writeln!(f, "{}: {}", metric.label, metric.formatted_value())?;
        }

        if let Some(table) = &self.table {
            writeln!(f)?;
            write!(f, "{}", table)?;
        }

        if !self.assessments.is_empty() {
            writeln!(f)?;
            writeln!(f, "Assessment")?;
            for assessment in &self.assessments {
                writeln!(f, "{}", assessment)?;
            }
        }
        Ok(())
    }
}

/// Conversion of a typed calculator report into the generic response.
pub trait IntoResponse {
    fn into_response(self) -> CalculationResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_not_computable_formatting() {
        let response = CalculationResponse::new(Calculator::ProfitMargin)
            .with_metric("profit", "Profit", 50.0, Unit::Currency)
            .with_optional_metric("margin_percent", "Profit margin", None, Unit::Percent);

        assert_eq!(response.value("profit"), Some(50.0));
        assert_eq!(response.value("margin_percent"), None);
        assert_eq!(
            response.metric("margin_percent").unwrap().formatted_value(),
            "not computable"
        );
        assert!(response.metric("missing").is_none());
    }

    #[test]
    fn test_table_rendering_aligns_columns() {
        let mut table = Table::new("Schedule", &["Year", "Value"]);
        table.push_row(vec![Cell::text("1"), Cell::value(1000.0, Unit::Currency)]);
        table.push_row(vec![Cell::text("2"), Cell::value(0.0, Unit::Currency)]);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Schedule");
        assert_eq!(lines[1], "Year |       Value");
        assert_eq!(lines[2], "   1 | R$ 1,000.00");
        assert_eq!(lines[3], "   2 |     R$ 0.00");
    }

    #[test]
    fn test_markers_are_distinct_per_severity() {
        let all = [
            Severity::Excellent,
            Severity::Good,
            Severity::Info,
            Severity::Warning,
            Severity::Alert,
            Severity::Advice,
        ];
        let mut markers: Vec<&str> = all.iter().map(|s| s.marker()).collect();
        markers.sort();
        markers.dedup();
        assert_eq!(markers.len(), all.len());
        assert_eq!(Severity::Excellent.marker(), "✅");
        assert_eq!(Severity::Good.marker(), "✓");
    }

    #[test]
    fn test_display_includes_assessments() {
        let response = CalculationResponse::new(Calculator::BalanceSheet)
            .with_metric("current_ratio", "Current ratio", 2.0, Unit::Ratio)
            .with_assessments(vec![Assessment::good("Healthy liquidity")]);

        let text = response.to_string();
        assert!(text.contains("Current ratio: 2.00"));
        assert!(text.contains("✓ Healthy liquidity"));
    }

    #[test]
    fn test_response_serializes_to_json() {
        let response = CalculationResponse::new(Calculator::Depreciation)
            .with_metric("annual", "Annual depreciation", 100.0, Unit::Currency);
        let json = response.to_json().unwrap();
        assert!(json.contains("\"Depreciation\""));
        assert!(json.contains("\"annual\""));
    }
}
