//! Construction projects: the backyard casita and the shared new home

use serde::{Deserialize, Serialize};

/// Financing terms of a build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionProject {
    pub build_cost: f64,

    /// Share of the build cost paid up front, in percent
    pub down_payment_percent: f64,

    /// Annual financing rate, in percent
    pub financing_rate: f64,
    pub financing_term_years: u32,
}

impl ConstructionProject {
    pub fn down_payment_amount(&self) -> f64 {
        self.build_cost * self.down_payment_percent / 100.0
    }

    /// Principal borrowed after the down payment
    pub fn financed_amount(&self) -> f64 {
        self.build_cost * (1.0 - self.down_payment_percent / 100.0)
    }
}

/// Casita build plus the running costs of caring for Gen1 at home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasitaProject {
    pub build_cost: f64,
    pub down_payment_percent: f64,
    pub financing_rate: f64,
    pub financing_term_years: u32,

    /// Home-care spend in the first care year (3 hours a week)
    pub home_care_year1_budget: f64,
    pub food_annual: f64,
    pub utilities_annual: f64,
}

impl Default for CasitaProject {
    fn default() -> Self {
        Self {
            build_cost: 200_000.0,
            down_payment_percent: 20.0,
            financing_rate: 6.5,
            financing_term_years: 15,
            home_care_year1_budget: 3_432.0,
            food_annual: 4_800.0,
            utilities_annual: 1_800.0,
        }
    }
}

impl CasitaProject {
    pub fn construction(&self) -> ConstructionProject {
        ConstructionProject {
            build_cost: self.build_cost,
            down_payment_percent: self.down_payment_percent,
            financing_rate: self.financing_rate,
            financing_term_years: self.financing_term_years,
        }
    }

    /// Uninflated food and utilities for one year
    pub fn annual_living_costs(&self) -> f64 {
        self.food_annual + self.utilities_annual
    }
}

/// The new multi-generational home built in the rebuild scenario.
/// Its down payment is normally derived from sale proceeds; the configured
/// percent only seeds the manual override in a UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewHomeProject {
    pub build_cost: f64,
    pub down_payment_percent: f64,
    pub financing_rate: f64,
    pub financing_term_years: u32,
}

impl Default for NewHomeProject {
    fn default() -> Self {
        Self {
            build_cost: 1_000_000.0,
            down_payment_percent: 20.0,
            financing_rate: 6.5,
            financing_term_years: 30,
        }
    }
}

impl NewHomeProject {
    /// Financing terms with the down payment actually applied
    pub fn construction_with_down_payment(&self, down_payment_percent: f64) -> ConstructionProject {
        ConstructionProject {
            build_cost: self.build_cost,
            down_payment_percent,
            financing_rate: self.financing_rate,
            financing_term_years: self.financing_term_years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_casita_financing_split() {
        let casita = CasitaProject::default().construction();
        assert_abs_diff_eq!(casita.down_payment_amount(), 40_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(casita.financed_amount(), 160_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(CasitaProject::default().annual_living_costs(), 6_600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_stock_values() {
        let casita: CasitaProject =
            serde_json::from_str(r#"{"build_cost": 150000, "food_annual": 1200}"#).unwrap();
        assert_abs_diff_eq!(casita.build_cost, 150_000.0);
        assert_abs_diff_eq!(casita.financing_rate, 6.5);
        assert_abs_diff_eq!(casita.food_annual, 1_200.0);
        assert_abs_diff_eq!(casita.utilities_annual, 1_800.0);
    }

    #[test]
    fn test_new_home_full_down_payment_finances_nothing() {
        let terms = NewHomeProject::default().construction_with_down_payment(100.0);
        assert_abs_diff_eq!(terms.financed_amount(), 0.0);
        assert_abs_diff_eq!(terms.down_payment_amount(), 1_000_000.0);
    }
}
