//! Conditional validation schema for income rows
//!
//! Mirrors the rules of the income form:
//!
//! | field          | monthly        | freelance      | other types |
//! |----------------|----------------|----------------|-------------|
//! | monthly salary | required, ≥ 0  | optional       | optional    |
//! | hourly rate    | optional       | required, ≥ 0  | optional    |
//! | hours per day  | optional       | required, 1-24 | optional    |
//! | days per year  | optional       | required, 1-365| optional    |
//! | year           | required integer in 1900-2100 for every row  |
//!
//! Optional fields must still hold a finite number when present. A row whose
//! income type is not recognised is rejected.

use crate::income::{IncomeField, IncomeRow};
use crate::types::{IncomeType, Language};
use std::fmt;
use thiserror::Error;

pub const MIN_YEAR: f64 = 1900.0;
pub const MAX_YEAR: f64 = 2100.0;

/// What is wrong with a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    Required,
    NotANumber,
    BelowMin(f64),
    AboveMax(f64),
    NotAnInteger,
    UnknownIncomeType,
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Position of the row in the form
    pub row: usize,
    /// Offending field, `None` when the income type itself is invalid
    pub field: Option<IncomeField>,
    pub violation: Violation,
}

impl FieldError {
    /// Human-readable message in the requested language
    pub fn message(&self, language: Language) -> String {
        let label = match self.field {
            Some(field) => field.label(language),
            None => match language {
                Language::En => "Income type",
                Language::Fr => "Type de revenu",
            },
        };
        match (self.violation, language) {
            (Violation::Required, Language::En) => format!("{} is required", label),
            (Violation::Required, Language::Fr) => format!("{} est obligatoire", label),
            (Violation::NotANumber, Language::En) => format!("{} must be a number", label),
            (Violation::NotANumber, Language::Fr) => format!("{} doit être un nombre", label),
            (Violation::BelowMin(min), Language::En) => {
                format!("{} must be greater than or equal to {}", label, min)
            }
            (Violation::BelowMin(min), Language::Fr) => {
                format!("{} doit être supérieur ou égal à {}", label, min)
            }
            (Violation::AboveMax(max), Language::En) => {
                format!("{} must be less than or equal to {}", label, max)
            }
            (Violation::AboveMax(max), Language::Fr) => {
                format!("{} doit être inférieur ou égal à {}", label, max)
            }
            (Violation::NotAnInteger, Language::En) => format!("{} must be an integer", label),
            (Violation::NotAnInteger, Language::Fr) => format!("{} doit être un entier", label),
            (Violation::UnknownIncomeType, Language::En) => {
                format!("{} must be one of: monthly, freelance", label)
            }
            (Violation::UnknownIncomeType, Language::Fr) => {
                format!("{} doit être : monthly, freelance", label)
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row + 1, self.message(Language::En))
    }
}

/// Every failed rule of a form, in row then column order
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error reported for a given cell
    pub fn for_cell(&self, row: usize, field: IncomeField) -> Option<&FieldError> {
        self.0
            .iter()
            .find(|err| err.row == row && err.field == Some(field))
    }

    /// Whether any error concerns the given row
    pub fn has_row(&self, row: usize) -> bool {
        self.0.iter().any(|err| err.row == row)
    }
}

/// Numeric constraints for one field
#[derive(Debug, Clone, Copy, PartialEq)]
struct NumberRule {
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
}

impl NumberRule {
    const OPTIONAL: Self = Self {
        required: false,
        min: None,
        max: None,
        integer: false,
    };

    fn required(min: f64, max: Option<f64>) -> Self {
        Self {
            required: true,
            min: Some(min),
            max,
            integer: false,
        }
    }

    fn check(&self, value: Option<f64>) -> Option<Violation> {
        let Some(value) = value else {
            return self.required.then_some(Violation::Required);
        };
        if !value.is_finite() {
            return Some(Violation::NotANumber);
        }
        if let Some(min) = self.min {
            if value < min {
                return Some(Violation::BelowMin(min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some(Violation::AboveMax(max));
            }
        }
        if self.integer && value.fract() != 0.0 {
            return Some(Violation::NotAnInteger);
        }
        None
    }
}

fn rule_for(field: IncomeField, income_type: IncomeType) -> NumberRule {
    match (field, income_type) {
        (IncomeField::Year, _) => NumberRule {
            required: true,
            min: Some(MIN_YEAR),
            max: Some(MAX_YEAR),
            integer: true,
        },
        (IncomeField::MonthlySalary, IncomeType::Monthly) => NumberRule::required(0.0, None),
        (IncomeField::HourlyRate, IncomeType::Freelance) => NumberRule::required(0.0, None),
        (IncomeField::HoursPerDay, IncomeType::Freelance) => NumberRule::required(1.0, Some(24.0)),
        (IncomeField::DaysPerYear, IncomeType::Freelance) => {
            NumberRule::required(1.0, Some(365.0))
        }
        _ => NumberRule::OPTIONAL,
    }
}

/// Validate one row; `index` is only used to label the errors
pub fn validate_row(index: usize, row: &IncomeRow) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = IncomeField::ALL
        .into_iter()
        .filter_map(|field| {
            rule_for(field, row.income_type)
                .check(row.get(field))
                .map(|violation| FieldError {
                    row: index,
                    field: Some(field),
                    violation,
                })
        })
        .collect();

    if !row.income_type.is_known() {
        errors.push(FieldError {
            row: index,
            field: None,
            violation: Violation::UnknownIncomeType,
        });
    }

    errors
}

/// Validate every row of a form
pub fn validate_rows(rows: &[IncomeRow]) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = rows
        .iter()
        .enumerate()
        .flat_map(|(index, row)| validate_row(index, row))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
