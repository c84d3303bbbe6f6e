//! Weight unit conversion
//!
//! Weights are stored in grams everywhere; conversion only happens at the
//! display edge (formatting) and the input edge (manual entry in oz/lb).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::units::{GRAMS_PER_GRAM, GRAMS_PER_OUNCE, GRAMS_PER_POUND};

/// Display unit selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "g")]
    #[value(name = "g")]
    Grams,
    #[serde(rename = "oz")]
    #[value(name = "oz")]
    Ounces,
    #[serde(rename = "lb")]
    #[value(name = "lb")]
    Pounds,
}

impl WeightUnit {
    /// Grams in one of this unit
    pub fn factor(self) -> f64 {
        match self {
            WeightUnit::Grams => GRAMS_PER_GRAM,
            WeightUnit::Ounces => GRAMS_PER_OUNCE,
            WeightUnit::Pounds => GRAMS_PER_POUND,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Grams => "g",
            WeightUnit::Ounces => "oz",
            WeightUnit::Pounds => "lb",
        }
    }

    /// Decimal places shown when formatting
    pub fn decimals(self) -> usize {
        match self {
            WeightUnit::Grams => 0,
            _ => 2,
        }
    }

    pub fn to_display(self, grams: f64) -> f64 {
        grams / self.factor()
    }

    pub fn from_display(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Format a gram value for display, e.g. `1500g` or `52.91oz`.
    /// Halves round away from zero (`2.5g` shows as `3g`).
    pub fn format(self, grams: f64) -> String {
        let decimals = self.decimals();
        let scale = 10f64.powi(decimals as i32);
        let rounded = (self.to_display(grams) * scale).round() / scale;
        format!("{rounded:.decimals$}{}", self.symbol())
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::Grams),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Ounces),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pounds),
            other => Err(format!("unknown weight unit '{other}' (expected g, oz or lb)")),
        }
    }
}
