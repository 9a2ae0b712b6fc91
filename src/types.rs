//! Type-safe enums shared by the form, the calculations and the config file
//!
//! Stringly-typed values from the command line and JSON are parsed into these
//! enums at the edges so the rest of the crate can match exhaustively.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Kind of income a row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncomeType {
    /// Salaried position paid monthly
    #[default]
    Monthly,
    /// Freelance work billed by the hour
    Freelance,
    /// Anything else found in deserialized input. Never offered by the UI.
    #[serde(other)]
    Unknown,
}

impl IncomeType {
    /// Income types a user can create rows for
    pub const SELECTABLE: [IncomeType; 2] = [IncomeType::Monthly, IncomeType::Freelance];

    /// Whether this is one of the recognised income types
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Parses only the selectable types; `Unknown` never comes from text
impl FromStr for IncomeType {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .into_iter()
            .find(|income_type| income_type.to_string() == s)
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

/// Display language for labels and totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}
