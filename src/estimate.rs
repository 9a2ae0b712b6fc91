//! Headless estimation
//!
//! Builds a form from command line incomes and reports its totals, the same
//! way the interactive form does.

use crate::calculations::{format_amount, TaxRates, Totals};
use crate::cli::FreelanceSpec;
use crate::error::Result;
use crate::form::{IncomeForm, RowDefaults};
use crate::income::{IncomeField, IncomeRow};
use crate::types::Language;
use crate::validation::ValidationErrors;
use serde::Serialize;
use tracing::info;

/// Incomes given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimateRequest {
    pub monthly: Vec<f64>,
    pub freelance: Vec<FreelanceSpec>,
    /// Overrides the year of every row
    pub year: Option<f64>,
}

/// Result of a successful estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub rows: Vec<IncomeRow>,
    pub total: f64,
    pub total_after_taxes: f64,
}

impl EstimateReport {
    /// Human readable summary, one line per figure
    pub fn to_text(&self, language: Language) -> String {
        let total = format_amount(self.total);
        let after = format_amount(self.total_after_taxes);
        match language {
            Language::En => format!("Total: {} €\nTotal after taxes: {} €", total, after),
            Language::Fr => format!("Total : {} €\nTotal après taxes : {} €", total, after),
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the form a request describes: monthly rows first, then freelance rows
pub fn build_form(request: &EstimateRequest, defaults: RowDefaults) -> IncomeForm {
    let mut form = IncomeForm::new(defaults);
    for amount in &request.monthly {
        let mut row = IncomeRow::monthly(*amount, defaults.year);
        if request.year.is_some() {
            row.set(IncomeField::Year, request.year);
        }
        form.push(row);
    }
    for spec in &request.freelance {
        let mut row = IncomeRow::freelance(
            spec.hourly_rate,
            spec.hours_per_day,
            spec.days_per_year,
            defaults.year,
        );
        if request.year.is_some() {
            row.set(IncomeField::Year, request.year);
        }
        form.push(row);
    }
    form
}

/// Validate the request and compute its totals
pub fn estimate(
    request: &EstimateRequest,
    defaults: RowDefaults,
    rates: &TaxRates,
) -> std::result::Result<EstimateReport, ValidationErrors> {
    let form = build_form(request, defaults);
    form.submit()?;

    let rows = form.values();
    let totals = Totals::compute(&rows, rates);
    info!(
        rows = rows.len(),
        total = totals.total,
        total_after_taxes = totals.total_after_taxes,
        "estimate computed"
    );
    Ok(EstimateReport {
        rows,
        total: totals.total,
        total_after_taxes: totals.total_after_taxes,
    })
}
