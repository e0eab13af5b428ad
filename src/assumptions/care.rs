//! Care cost schedules
//!
//! Two cost models, one per style of care:
//! - Facility care: flat annual cost per tier (independent, assisted, skilled)
//! - Home care: weekly hours that escalate over the first six years, priced
//!   at the hourly rate implied by the year-1 budget

use serde::{Deserialize, Serialize};

use super::economic::EconomicAssumptions;

/// Weekly home-care hours for care years 1..=6; year 6 holds flat thereafter
const HOME_CARE_WEEKLY_HOURS: [f64; 6] = [3.0, 5.0, 7.0, 10.0, 14.0, 17.0];

const WEEKS_PER_YEAR: f64 = 52.0;

/// Phase of facility care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareTier {
    Independent,
    Assisted,
    Skilled,
}

impl CareTier {
    pub fn label(&self) -> &'static str {
        match self {
            CareTier::Independent => "Independent Living",
            CareTier::Assisted => "Assisted Living",
            CareTier::Skilled => "Skilled Nursing",
        }
    }
}

/// Tiered facility-care cost schedule
///
/// Skilled nursing covers whatever remains after the independent and assisted
/// years. Nothing here checks `years_independent + years_assisted <= total_years`;
/// see [`crate::PlannerInput::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareCostSchedule {
    /// Annual cost of independent living, in today's dollars
    pub independent_annual: f64,
    pub assisted_annual: f64,
    pub skilled_annual: f64,

    /// Life expectancy in years
    pub total_years: u32,
    pub years_independent: u32,
    pub years_assisted: u32,
}

impl Default for CareCostSchedule {
    fn default() -> Self {
        Self {
            independent_annual: 37_000.0,
            assisted_annual: 72_000.0,
            skilled_annual: 131_000.0,
            total_years: 15,
            years_independent: 3,
            years_assisted: 5,
        }
    }
}

impl CareCostSchedule {
    /// Tier in force during a zero-based elapsed year
    pub fn tier_for_year(&self, elapsed_year: u32) -> CareTier {
        if elapsed_year < self.years_independent {
            CareTier::Independent
        } else if elapsed_year < self.years_independent + self.years_assisted {
            CareTier::Assisted
        } else {
            CareTier::Skilled
        }
    }

    /// Base (uninflated) annual cost of a tier
    pub fn annual_cost(&self, tier: CareTier) -> f64 {
        match tier {
            CareTier::Independent => self.independent_annual,
            CareTier::Assisted => self.assisted_annual,
            CareTier::Skilled => self.skilled_annual,
        }
    }

    /// Inflated facility cost for one month
    pub fn monthly_cost(&self, elapsed_months: u32, economics: &EconomicAssumptions) -> f64 {
        let tier = self.tier_for_year(elapsed_months / 12);
        self.annual_cost(tier) * economics.inflation_multiplier(elapsed_months) / 12.0
    }

    /// Distinct tiers touched by the 1-based care years `start_year..=end_year`,
    /// in order of first appearance. Years past `total_years` are ignored.
    pub fn tiers_between(&self, start_year: u32, end_year: u32) -> Vec<CareTier> {
        let last = end_year.min(self.total_years);
        let mut tiers = Vec::new();
        for year in start_year.max(1)..=last {
            let tier = self.tier_for_year(year - 1);
            if !tiers.contains(&tier) {
                tiers.push(tier);
            }
        }
        tiers
    }

    /// Comma-joined tier labels for a span of care years
    pub fn tier_labels_between(&self, start_year: u32, end_year: u32) -> String {
        self.tiers_between(start_year, end_year)
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Weekly home-care hours in a 1-based care year
pub fn home_care_weekly_hours(care_year: u32) -> f64 {
    let idx = (care_year.max(1) as usize - 1).min(HOME_CARE_WEEKLY_HOURS.len() - 1);
    HOME_CARE_WEEKLY_HOURS[idx]
}

/// Hourly rate implied by a year-1 budget that buys 3 hours a week
pub fn home_care_hourly_rate(year1_budget: f64) -> f64 {
    year1_budget / (HOME_CARE_WEEKLY_HOURS[0] * WEEKS_PER_YEAR)
}

/// Inflated annual home-care cost at `elapsed_months`
pub fn home_care_annual_cost(
    year1_budget: f64,
    elapsed_months: u32,
    economics: &EconomicAssumptions,
) -> f64 {
    let care_year = elapsed_months / 12 + 1;
    home_care_weekly_hours(care_year)
        * WEEKS_PER_YEAR
        * home_care_hourly_rate(year1_budget)
        * economics.inflation_multiplier(elapsed_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tier_boundaries() {
        let care = CareCostSchedule::default();

        assert_eq!(care.tier_for_year(0), CareTier::Independent);
        assert_eq!(care.tier_for_year(2), CareTier::Independent);
        assert_eq!(care.tier_for_year(3), CareTier::Assisted);
        assert_eq!(care.tier_for_year(7), CareTier::Assisted);
        assert_eq!(care.tier_for_year(8), CareTier::Skilled);
        assert_eq!(care.tier_for_year(40), CareTier::Skilled);
    }

    #[test]
    fn test_monthly_facility_cost() {
        let care = CareCostSchedule::default();
        let econ = EconomicAssumptions::default();

        assert_relative_eq!(care.monthly_cost(0, &econ), 37_000.0 / 12.0, epsilon = 1e-9);

        // Month 36 is the first assisted month, three full years of inflation
        let expected = 72_000.0 * 1.03_f64.powi(3) / 12.0;
        assert_relative_eq!(care.monthly_cost(36, &econ), expected, epsilon = 1e-9);

        // Inflation keeps moving inside a tier year
        assert!(care.monthly_cost(13, &econ) > care.monthly_cost(12, &econ));
    }

    #[test]
    fn test_zero_independent_years_starts_assisted() {
        let care = CareCostSchedule {
            years_independent: 0,
            ..Default::default()
        };
        assert_eq!(care.tier_for_year(0), CareTier::Assisted);
    }

    #[test]
    fn test_home_care_hours_escalate_then_hold() {
        let hours: Vec<f64> = (1..=8).map(home_care_weekly_hours).collect();
        assert_eq!(hours, vec![3.0, 5.0, 7.0, 10.0, 14.0, 17.0, 17.0, 17.0]);
        assert_eq!(home_care_weekly_hours(0), 3.0);
    }

    #[test]
    fn test_home_care_annual_cost() {
        let econ = EconomicAssumptions::default();

        assert_relative_eq!(home_care_hourly_rate(3_432.0), 22.0, epsilon = 1e-12);
        assert_relative_eq!(home_care_annual_cost(3_432.0, 0, &econ), 3_432.0, epsilon = 1e-9);

        let year6 = 17.0 * 52.0 * 22.0 * 1.03_f64.powi(5);
        assert_relative_eq!(home_care_annual_cost(3_432.0, 60, &econ), year6, epsilon = 1e-6);
    }

    #[test]
    fn test_tier_labels_for_five_year_windows() {
        let care = CareCostSchedule::default();

        assert_eq!(care.tier_labels_between(1, 5), "Independent Living, Assisted Living");
        assert_eq!(care.tier_labels_between(6, 10), "Assisted Living, Skilled Nursing");
        assert_eq!(care.tier_labels_between(11, 15), "Skilled Nursing");
        assert!(care.tiers_between(16, 20).is_empty());
    }
}
