//! taxcalc library
//!
//! Income form with annualized totals and after-tax estimates, plus the
//! terminal interface that edits it.

pub mod app;
pub mod calculations;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod error;
pub mod estimate;
pub mod form;
pub mod income;
pub mod input;
pub mod theme;
pub mod types;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use app::{App, AppMode, AppState};
pub use calculations::{
    annualized_monthly_salary, annualized_monthly_salary_after_taxes, annualized_total,
    annualized_total_after_taxes, format_amount, freelancer_annualized_revenue,
    freelancer_annualized_revenue_after_taxes, TaxRates, Totals,
};
pub use config_file::CalculatorConfig;
pub use error::TaxCalcError;
pub use estimate::{estimate, EstimateReport, EstimateRequest};
pub use form::{IncomeForm, MemoizedTotals, RowDefaults};
pub use income::{IncomeField, IncomeRow};
pub use types::{IncomeType, Language};
pub use validation::{validate_row, validate_rows, FieldError, ValidationErrors, Violation};
