//! Income row data model
//!
//! An `IncomeRow` is one user-entered income stream. Which of its numeric
//! fields matter depends on `income_type`; the others stay `None`.

use crate::types::{IncomeType, Language};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Year given to freshly added rows unless configured otherwise
pub const DEFAULT_YEAR: i32 = 2020;

/// Default hours per day for new freelance rows
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Default billable days per year for new freelance rows
pub const DEFAULT_DAYS_PER_YEAR: f64 = 220.0;

/// One income stream for a given year
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRow {
    pub income_type: IncomeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<f64>,
}

impl IncomeRow {
    /// A salaried row with the given monthly amount
    pub fn monthly(monthly_salary: f64, year: i32) -> Self {
        Self {
            income_type: IncomeType::Monthly,
            monthly_salary: Some(monthly_salary),
            year: Some(f64::from(year)),
            ..Self::default()
        }
    }

    /// A freelance row
    pub fn freelance(hourly_rate: f64, hours_per_day: f64, days_per_year: f64, year: i32) -> Self {
        Self {
            income_type: IncomeType::Freelance,
            hourly_rate: Some(hourly_rate),
            hours_per_day: Some(hours_per_day),
            days_per_year: Some(days_per_year),
            year: Some(f64::from(year)),
            ..Self::default()
        }
    }

    /// Read a field value
    pub fn get(&self, field: IncomeField) -> Option<f64> {
        match field {
            IncomeField::MonthlySalary => self.monthly_salary,
            IncomeField::HourlyRate => self.hourly_rate,
            IncomeField::HoursPerDay => self.hours_per_day,
            IncomeField::DaysPerYear => self.days_per_year,
            IncomeField::Year => self.year,
        }
    }

    /// Overwrite a field value
    pub fn set(&mut self, field: IncomeField, value: Option<f64>) {
        let slot = match field {
            IncomeField::MonthlySalary => &mut self.monthly_salary,
            IncomeField::HourlyRate => &mut self.hourly_rate,
            IncomeField::HoursPerDay => &mut self.hours_per_day,
            IncomeField::DaysPerYear => &mut self.days_per_year,
            IncomeField::Year => &mut self.year,
        };
        *slot = value;
    }

    /// Fields shown for this row, in column order
    pub fn visible_fields(&self) -> Vec<IncomeField> {
        IncomeField::ALL
            .into_iter()
            .filter(|field| field.applies_to(self.income_type))
            .collect()
    }
}

/// The editable numeric fields of an income row, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum IncomeField {
    MonthlySalary,
    HourlyRate,
    HoursPerDay,
    DaysPerYear,
    Year,
}

impl IncomeField {
    pub const ALL: [IncomeField; 5] = [
        IncomeField::MonthlySalary,
        IncomeField::HourlyRate,
        IncomeField::HoursPerDay,
        IncomeField::DaysPerYear,
        IncomeField::Year,
    ];

    /// Whether the field is shown (and validated) for the given income type
    pub fn applies_to(&self, income_type: IncomeType) -> bool {
        match self {
            Self::MonthlySalary => income_type == IncomeType::Monthly,
            Self::HourlyRate | Self::HoursPerDay | Self::DaysPerYear => {
                income_type == IncomeType::Freelance
            }
            Self::Year => true,
        }
    }

    /// Column header
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::MonthlySalary, Language::En) => "Monthly salary",
            (Self::MonthlySalary, Language::Fr) => "Salaire par mois",
            (Self::HourlyRate, Language::En) => "Hourly rate",
            (Self::HourlyRate, Language::Fr) => "Taux horaire",
            (Self::HoursPerDay, Language::En) => "Hours per day",
            (Self::HoursPerDay, Language::Fr) => "Nombre d'heures par jour",
            (Self::DaysPerYear, Language::En) => "Days per year",
            (Self::DaysPerYear, Language::Fr) => "Nombre de jours par an",
            (Self::Year, Language::En) => "Year",
            (Self::Year, Language::Fr) => "Année",
        }
    }

    /// Unit shown after the value
    pub fn unit(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::MonthlySalary, Language::En) => "€/ month",
            (Self::MonthlySalary, Language::Fr) => "€/ mois",
            (Self::HourlyRate, Language::En) => "€/ hour",
            (Self::HourlyRate, Language::Fr) => "€/ heure",
            (Self::HoursPerDay, Language::En) => "hours/day",
            (Self::HoursPerDay, Language::Fr) => "heures/jour",
            (Self::DaysPerYear, Language::En) => "days/year",
            (Self::DaysPerYear, Language::Fr) => "jours/an",
            (Self::Year, _) => "",
        }
    }
}
