//! Planning assumptions: care costs, construction, rental market and economics

mod care;
mod construction;
mod economic;
mod rental;

pub use care::{
    home_care_annual_cost, home_care_hourly_rate, home_care_weekly_hours, CareCostSchedule,
    CareTier,
};
pub use construction::{CasitaProject, ConstructionProject, NewHomeProject};
pub use economic::EconomicAssumptions;
pub use rental::{RentalAssumption, RentalBreakdown};

use serde::{Deserialize, Serialize};

/// Container for all non-household assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub care: CareCostSchedule,
    pub casita: CasitaProject,
    pub new_home: NewHomeProject,
    pub rental: RentalAssumption,
    pub economics: EconomicAssumptions,
}

impl Assumptions {
    /// Stock planning values
    pub fn default_planning() -> Self {
        Self::default()
    }

    /// Inflated home-care cost for the casita and rebuild scenarios
    pub fn home_care_annual_cost(&self, elapsed_months: u32) -> f64 {
        home_care_annual_cost(
            self.casita.home_care_year1_budget,
            elapsed_months,
            &self.economics,
        )
    }

    /// Inflated facility cost for one month
    pub fn facility_monthly_cost(&self, elapsed_months: u32) -> f64 {
        self.care.monthly_cost(elapsed_months, &self.economics)
    }
}
