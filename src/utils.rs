use crate::error::{AccountingError, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Divides `numerator` by `denominator`, returning 0 when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `part` as a percentage of `whole`, or 0 when `whole` is zero.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    safe_ratio(part, whole) * 100.0
}

pub fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AccountingError::InvalidInput {
            field: field.to_string(),
            details: format!("{} is not a finite number", value),
        });
    }
    if value < 0.0 {
        return Err(AccountingError::InvalidInput {
            field: field.to_string(),
            details: format!("must be non-negative, got {}", value),
        });
    }
    Ok(())
}

pub fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AccountingError::InvalidInput {
            field: field.to_string(),
            details: format!("{} is not a finite number", value),
        });
    }
    Ok(())
}

/// Formats a number with `,` thousands separators and a fixed number of decimals.
///
/// # Examples
/// - `format_grouped(1234567.891, 2)` → `"1,234,567.89"`
/// - `format_grouped(-950.0, 2)` → `"-950.00"`
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

pub fn format_currency(value: f64) -> String {
    format!("R$ {}", format_grouped(value, 2))
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_grouped(value, 2))
}

pub fn next_month_end(date: NaiveDate) -> NaiveDate {
    let year = if date.month() == 12 {
        date.year() + 1
    } else {
        date.year()
    };

    let month = if date.month() == 12 {
        1
    } else {
        date.month() + 1
    };

    last_day_of_month(year, month)
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(NaiveDate::MAX)
}

/// Month-end dates for `count` consecutive months, starting with the month containing `first`.
pub fn month_ends_from(first: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count as usize);
    let mut current = last_day_of_month(first.year(), first.month());
    for _ in 0..count {
        dates.push(current);
        current = next_month_end(current);
    }
    dates
}
