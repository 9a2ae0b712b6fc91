//! Income form state
//!
//! Owns the dynamic list of income rows. Every mutation takes a fresh
//! `revision` from a process-wide counter, which is what derived values
//! (validation, totals) are keyed on. Two forms share a revision only when
//! one is an unmodified clone of the other, or both are untouched and empty.

use crate::calculations::{TaxRates, Totals};
use crate::error::{Result, TaxCalcError};
use crate::income::{IncomeField, IncomeRow, DEFAULT_DAYS_PER_YEAR, DEFAULT_HOURS_PER_DAY, DEFAULT_YEAR};
use crate::types::IncomeType;
use crate::validation::{self, ValidationErrors};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Source of form revisions; 0 is reserved for untouched forms
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Values given to rows created by the append actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDefaults {
    pub year: i32,
    pub hours_per_day: f64,
    pub days_per_year: f64,
}

impl Default for RowDefaults {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            days_per_year: DEFAULT_DAYS_PER_YEAR,
        }
    }
}

impl RowDefaults {
    /// Build the initial row for an income type
    pub fn row_for(&self, income_type: IncomeType) -> IncomeRow {
        match income_type {
            IncomeType::Monthly => IncomeRow::monthly(0.0, self.year),
            IncomeType::Freelance => {
                IncomeRow::freelance(0.0, self.hours_per_day, self.days_per_year, self.year)
            }
            IncomeType::Unknown => IncomeRow {
                income_type,
                year: Some(f64::from(self.year)),
                ..IncomeRow::default()
            },
        }
    }
}

/// A row plus the ephemeral key the table uses to tell rows apart
#[derive(Debug, Clone, PartialEq)]
pub struct FormRow {
    pub key: u64,
    pub row: IncomeRow,
}

/// The editable list of income rows
#[derive(Debug, Clone, Default)]
pub struct IncomeForm {
    rows: Vec<FormRow>,
    defaults: RowDefaults,
    next_key: u64,
    revision: u64,
}

impl IncomeForm {
    pub fn new(defaults: RowDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    /// Snapshot of the row values, without keys
    pub fn values(&self) -> Vec<IncomeRow> {
        self.rows.iter().map(|entry| entry.row.clone()).collect()
    }

    pub fn row(&self, index: usize) -> Option<&IncomeRow> {
        self.rows.get(index).map(|entry| &entry.row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity of the current rows; changes whenever any row changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn defaults(&self) -> &RowDefaults {
        &self.defaults
    }

    /// Append a row with the defaults for `income_type`; returns its index
    pub fn append(&mut self, income_type: IncomeType) -> usize {
        let row = self.defaults.row_for(income_type);
        self.push(row)
    }

    /// Append an already built row; returns its index
    pub fn push(&mut self, row: IncomeRow) -> usize {
        let key = self.next_key;
        self.next_key += 1;
        debug!(key, income_type = %row.income_type, "appending income row");
        self.rows.push(FormRow { key, row });
        self.touch();
        self.rows.len() - 1
    }

    /// Remove the row at `index`
    pub fn remove(&mut self, index: usize) -> Result<IncomeRow> {
        if index >= self.rows.len() {
            return Err(TaxCalcError::general(format!(
                "No income row at position {}",
                index + 1
            )));
        }
        let removed = self.rows.remove(index);
        debug!(key = removed.key, index, "removed income row");
        self.touch();
        Ok(removed.row)
    }

    /// Set a field from a numeric value
    pub fn set_value(&mut self, index: usize, field: IncomeField, value: Option<f64>) -> Result<()> {
        let entry = self.rows.get_mut(index).ok_or_else(|| {
            TaxCalcError::general(format!("No income row at position {}", index + 1))
        })?;
        entry.row.set(field, value);
        debug!(index, %field, ?value, "updated income field");
        self.touch();
        Ok(())
    }

    /// Set a field from user text. Blank text clears the field.
    pub fn set_field(&mut self, index: usize, field: IncomeField, text: &str) -> Result<()> {
        let value = parse_field_input(text)?;
        self.set_value(index, field, value)
    }

    /// Current validation state of all rows
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validation::validate_rows(&self.values())
    }

    /// Run validation as the form submit action. Nothing is persisted.
    pub fn submit(&self) -> std::result::Result<(), ValidationErrors> {
        match self.validate() {
            Ok(()) => {
                info!(rows = self.rows.len(), "success");
                Ok(())
            }
            Err(errors) => {
                warn!(invalid_fields = errors.len(), "error");
                for err in errors.iter() {
                    debug!("{}", err);
                }
                Err(errors)
            }
        }
    }

    fn touch(&mut self) {
        self.revision = NEXT_REVISION.fetch_add(1, Ordering::Relaxed);
    }
}

/// Parse text typed into a numeric field
///
/// Blank input means "no value". Anything else must be a finite number.
/// A single comma is read as the decimal separator, except where it looks
/// like a thousands separator (`1,000`), which is rejected.
pub fn parse_field_input(text: &str) -> Result<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || TaxCalcError::validation(format!("'{}' must be a number", trimmed));

    let normalized = match trimmed.split_once(',') {
        None => trimmed.to_string(),
        Some((whole, fraction)) => {
            let ambiguous = trimmed.contains('.')
                || fraction.contains(',')
                || (fraction.len() == 3 && fraction.bytes().all(|b| b.is_ascii_digit()));
            if ambiguous {
                return Err(invalid());
            }
            format!("{}.{}", whole, fraction)
        }
    };
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(invalid()),
    }
}

/// Totals cached against a form revision
///
/// `get` recomputes only when the form changed since the last call.
#[derive(Debug, Clone, Default)]
pub struct MemoizedTotals {
    rates: TaxRates,
    cached: Option<(u64, Totals)>,
    computations: u64,
}

impl MemoizedTotals {
    pub fn new(rates: TaxRates) -> Self {
        Self {
            rates,
            cached: None,
            computations: 0,
        }
    }

    pub fn rates(&self) -> &TaxRates {
        &self.rates
    }

    pub fn get(&mut self, form: &IncomeForm) -> Totals {
        if let Some((revision, totals)) = self.cached {
            if revision == form.revision() {
                return totals;
            }
        }
        let totals = Totals::compute(&form.values(), &self.rates);
        self.computations += 1;
        debug!(
            revision = form.revision(),
            total = totals.total,
            total_after_taxes = totals.total_after_taxes,
            "recomputed totals"
        );
        self.cached = Some((form.revision(), totals));
        totals
    }

    /// How many times the totals were actually recomputed
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_uses_defaults() {
        let mut form = IncomeForm::new(RowDefaults::default());
        let monthly = form.append(IncomeType::Monthly);
        let freelance = form.append(IncomeType::Freelance);

        assert_eq!(form.row(monthly), Some(&IncomeRow::monthly(0.0, 2020)));
        assert_eq!(
            form.row(freelance),
            Some(&IncomeRow::freelance(0.0, 8.0, 220.0, 2020))
        );
    }

    #[test]
    fn test_keys_are_unique() {
        let mut form = IncomeForm::default();
        form.append(IncomeType::Monthly);
        form.append(IncomeType::Monthly);
        form.remove(0).unwrap();
        form.append(IncomeType::Monthly);

        let keys: Vec<u64> = form.rows().iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_add_then_delete_restores_rows() {
        let mut form = IncomeForm::default();
        form.append(IncomeType::Monthly);
        form.set_field(0, IncomeField::MonthlySalary, "1500").unwrap();
        let before = form.values();

        let index = form.append(IncomeType::Freelance);
        form.remove(index).unwrap();

        assert_eq!(form.values(), before);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut form = IncomeForm::default();
        assert!(form.remove(0).is_err());
        assert_eq!(form.revision(), 0);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let mut form = IncomeForm::default();
        form.append(IncomeType::Monthly);
        let appended = form.revision();
        assert!(appended > 0);
        form.set_field(0, IncomeField::Year, "2021").unwrap();
        let edited = form.revision();
        assert!(edited > appended);
        form.remove(0).unwrap();
        assert!(form.revision() > edited);
    }

    #[test]
    fn test_revisions_differ_across_forms() {
        let mut first = IncomeForm::default();
        let mut second = IncomeForm::default();
        first.append(IncomeType::Monthly);
        second.append(IncomeType::Freelance);
        assert_ne!(first.revision(), second.revision());

        let clone = first.clone();
        assert_eq!(clone.revision(), first.revision());
    }

    #[test]
    fn test_memoized_totals_follow_a_replaced_form() {
        let mut memo = MemoizedTotals::new(TaxRates::default());
        let mut form = IncomeForm::default();
        form.push(IncomeRow::monthly(1000.0, 2020));
        assert_eq!(memo.get(&form).total, 12000.0);

        let mut other = IncomeForm::default();
        other.push(IncomeRow::monthly(5000.0, 2020));
        other.push(IncomeRow::monthly(5000.0, 2020));
        assert_eq!(memo.get(&other).total, 120000.0);
    }

    #[test]
    fn test_parse_field_input() {
        assert_eq!(parse_field_input("").unwrap(), None);
        assert_eq!(parse_field_input("   ").unwrap(), None);
        assert_eq!(parse_field_input("42").unwrap(), Some(42.0));
        assert_eq!(parse_field_input(" 12,5 ").unwrap(), Some(12.5));
        assert!(parse_field_input("abc").is_err());
        assert!(parse_field_input("NaN").is_err());
        assert!(parse_field_input("inf").is_err());
    }

    #[test]
    fn test_thousands_separators_are_rejected() {
        assert!(parse_field_input("1,000").is_err());
        assert!(parse_field_input("1.000,50").is_err());
        assert!(parse_field_input("1,000,000").is_err());
        assert!(parse_field_input("1,000.5").is_err());
        assert_eq!(parse_field_input("1000,50").unwrap(), Some(1000.5));
        assert_eq!(parse_field_input("0,5").unwrap(), Some(0.5));
    }

    #[test]
    fn test_rejected_input_leaves_row_untouched() {
        let mut form = IncomeForm::default();
        form.append(IncomeType::Monthly);
        let revision = form.revision();
        assert!(form.set_field(0, IncomeField::MonthlySalary, "lots").is_err());
        assert_eq!(form.revision(), revision);
        assert_eq!(form.row(0).unwrap().monthly_salary, Some(0.0));
    }

    #[test]
    fn test_submit_reports_validation() {
        let mut form = IncomeForm::default();
        assert!(form.submit().is_ok());

        form.append(IncomeType::Freelance);
        form.set_field(0, IncomeField::HoursPerDay, "").unwrap();
        let errors = form.submit().unwrap_err();
        assert!(errors.for_cell(0, IncomeField::HoursPerDay).is_some());
    }

    #[test]
    fn test_memoized_totals_recompute_on_revision_change() {
        let mut form = IncomeForm::default();
        let mut memo = MemoizedTotals::new(TaxRates::default());

        assert_eq!(memo.get(&form).total, 0.0);
        assert_eq!(memo.get(&form).total, 0.0);
        assert_eq!(memo.computations(), 1);

        form.append(IncomeType::Monthly);
        form.set_field(0, IncomeField::MonthlySalary, "1000").unwrap();
        assert_eq!(memo.get(&form).total, 12000.0);
        assert_eq!(memo.get(&form).total, 12000.0);
        assert_eq!(memo.computations(), 2);
    }
}
