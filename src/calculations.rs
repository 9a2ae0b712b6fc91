//! Annualized revenue and after-tax calculations
//!
//! Every function here is pure. Missing field values count as zero, and rows
//! whose income type is not recognised contribute nothing to totals.
//!
//! # After-tax totals
//!
//! `annualized_total_after_taxes` does not use the same formula for both
//! income types: freelance rows contribute `revenue * (1 - rate)` while
//! monthly rows contribute `annualized * rate`. The per-row helper
//! `annualized_monthly_salary_after_taxes` uses `(1 - rate)`. The total keeps
//! the historical behaviour until a domain owner settles which one is meant.

use crate::income::IncomeRow;
use crate::types::IncomeType;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tax rate applied to salaried income
pub const PERMANENT_TAX_RATE: f64 = 0.22;

/// Tax rate applied to freelance income
pub const FREELANCER_TAX_RATE: f64 = 0.2;

/// Flat tax rates, one per income type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    pub permanent: f64,
    pub freelancer: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            permanent: PERMANENT_TAX_RATE,
            freelancer: FREELANCER_TAX_RATE,
        }
    }
}

/// Both summary figures for a row list
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total: f64,
    pub total_after_taxes: f64,
}

impl Totals {
    /// Compute both totals in one go
    pub fn compute(rows: &[IncomeRow], rates: &TaxRates) -> Self {
        Self {
            total: annualized_total(rows),
            total_after_taxes: annualized_total_after_taxes(rows, rates),
        }
    }
}

pub fn annualized_monthly_salary(amount: f64) -> f64 {
    trace!(amount, "annualizing monthly salary");
    amount * 12.0
}

pub fn annualized_monthly_salary_after_taxes(amount: f64, rates: &TaxRates) -> f64 {
    annualized_monthly_salary(amount) * (1.0 - rates.permanent)
}

/// Hourly rate × hours per day × days per year
pub fn freelancer_annualized_revenue(row: &IncomeRow) -> f64 {
    trace!(?row, "annualizing freelance revenue");
    row.hourly_rate.unwrap_or(0.0)
        * row.hours_per_day.unwrap_or(0.0)
        * row.days_per_year.unwrap_or(0.0)
}

pub fn freelancer_annualized_revenue_after_taxes(row: &IncomeRow, rates: &TaxRates) -> f64 {
    freelancer_annualized_revenue(row) * (1.0 - rates.freelancer)
}

/// Sum of the annualized revenue of every row
pub fn annualized_total(rows: &[IncomeRow]) -> f64 {
    rows.iter()
        .map(|row| match row.income_type {
            IncomeType::Monthly => annualized_monthly_salary(row.monthly_salary.unwrap_or(0.0)),
            IncomeType::Freelance => freelancer_annualized_revenue(row),
            IncomeType::Unknown => 0.0,
        })
        .fold(0.0, |acc, amount| acc + amount)
}

/// Sum of the after-tax revenue of every row (see module docs for the monthly branch)
pub fn annualized_total_after_taxes(rows: &[IncomeRow], rates: &TaxRates) -> f64 {
    rows.iter()
        .map(|row| match row.income_type {
            IncomeType::Monthly => {
                annualized_monthly_salary(row.monthly_salary.unwrap_or(0.0)) * rates.permanent
            }
            IncomeType::Freelance => freelancer_annualized_revenue_after_taxes(row, rates),
            IncomeType::Unknown => 0.0,
        })
        .fold(0.0, |acc, amount| acc + amount)
}

/// Format an amount for display: whole numbers without decimals, otherwise at
/// most two decimals with trailing zeros removed.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    // `+ 0.0` turns a negative zero into zero
    let rounded = (amount * 100.0).round() / 100.0 + 0.0;
    if rounded.fract() == 0.0 {
        return format!("{:.0}", rounded);
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').to_string()
}
