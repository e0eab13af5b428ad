//! Rental income from keeping Gen1's home as an investment property

use serde::{Deserialize, Serialize};

use super::economic::EconomicAssumptions;

/// Rental market assumptions. Percentages are whole percents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalAssumption {
    pub monthly_rent: f64,
    pub occupancy_percent: f64,

    /// Management fee as a percent of collected rent
    pub management_fee_percent: f64,

    /// Property tax and insurance, percent of home value per year
    pub tax_insurance_percent: f64,

    /// Maintenance, percent of home value per year
    pub maintenance_percent: f64,
}

impl Default for RentalAssumption {
    fn default() -> Self {
        Self {
            monthly_rent: 2_500.0,
            occupancy_percent: 95.0,
            management_fee_percent: 10.0,
            tax_insurance_percent: 2.5,
            maintenance_percent: 1.0,
        }
    }
}

impl RentalAssumption {
    /// Net annual rental income at `elapsed_months`, floored at zero.
    /// Rent and the value-linked carrying costs all inflate at CPI.
    pub fn net_annual_income(
        &self,
        home_value: f64,
        elapsed_months: u32,
        economics: &EconomicAssumptions,
    ) -> f64 {
        let inflation = economics.inflation_multiplier(elapsed_months);
        self.breakdown(home_value, inflation).net_annual.max(0.0)
    }

    /// Uninflated month-0 breakdown on the current home value
    pub fn static_breakdown(&self, home_value: f64) -> RentalBreakdown {
        self.breakdown(home_value, 1.0)
    }

    fn breakdown(&self, home_value: f64, inflation: f64) -> RentalBreakdown {
        let gross_annual = self.monthly_rent * 12.0 * inflation;
        let effective_annual = gross_annual * self.occupancy_percent / 100.0;
        let management_fee = effective_annual * self.management_fee_percent / 100.0;
        let tax_insurance = home_value * self.tax_insurance_percent / 100.0 * inflation;
        let maintenance = home_value * self.maintenance_percent / 100.0 * inflation;
        let net_annual = effective_annual - management_fee - tax_insurance - maintenance;

        RentalBreakdown {
            gross_annual,
            effective_annual,
            management_fee,
            tax_insurance,
            maintenance,
            net_annual,
            net_monthly: net_annual.max(0.0) / 12.0,
        }
    }
}

/// Line items of a year of renting.
/// `net_annual` is left unclamped so a loss shows; `net_monthly` is floored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalBreakdown {
    pub gross_annual: f64,
    pub effective_annual: f64,
    pub management_fee: f64,
    pub tax_insurance: f64,
    pub maintenance: f64,
    pub net_annual: f64,
    pub net_monthly: f64,
}
