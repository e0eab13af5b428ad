//! Economic growth assumptions

use serde::{Deserialize, Serialize};

/// Annual economic rates, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicAssumptions {
    /// CPI inflation applied to costs, rents and expenses
    pub inflation_percent: f64,

    /// Return credited to liquid balances once a year
    pub investment_return_percent: f64,

    /// Appreciation credited to real estate once a year
    pub home_appreciation_percent: f64,

    /// Growth of combined household income
    pub income_growth_percent: f64,
}

impl Default for EconomicAssumptions {
    fn default() -> Self {
        Self {
            inflation_percent: 3.0,
            investment_return_percent: 6.0,
            home_appreciation_percent: 3.5,
            income_growth_percent: 2.0,
        }
    }
}

impl EconomicAssumptions {
    /// Price level after `elapsed_months`, relative to month 0.
    /// Uses the fractional year `elapsed_months / 12` as the exponent, so it
    /// moves every month rather than stepping once a year.
    pub fn inflation_multiplier(&self, elapsed_months: u32) -> f64 {
        compound(self.inflation_percent, elapsed_years(elapsed_months))
    }

    /// Income level after `elapsed_months`, same continuous exponent as inflation
    pub fn income_multiplier(&self, elapsed_months: u32) -> f64 {
        compound(self.income_growth_percent, elapsed_years(elapsed_months))
    }

    /// One year's growth factor on liquid balances
    pub fn annual_investment_factor(&self) -> f64 {
        1.0 + self.investment_return_percent / 100.0
    }

    /// One year's growth factor on real estate
    pub fn annual_appreciation_factor(&self) -> f64 {
        1.0 + self.home_appreciation_percent / 100.0
    }
}

pub(crate) fn elapsed_years(elapsed_months: u32) -> f64 {
    elapsed_months as f64 / 12.0
}

fn compound(annual_percent: f64, years: f64) -> f64 {
    (1.0 + annual_percent / 100.0).powf(years)
}
