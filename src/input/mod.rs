//! Planner input bundle and scenario selection

pub mod loader;

pub use loader::load_input;

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{PlannerError, PlannerResult};
use crate::household::{Generation, Household};

/// The three mutually exclusive care plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Gen1 moves into a care facility
    Facility,
    /// Gen1 moves into a casita built on Gen2's lot
    Casita,
    /// Both homes are sold and a shared home is built
    Rebuild,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [ScenarioKind::Facility, ScenarioKind::Casita, ScenarioKind::Rebuild];

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Facility => "Care Facility",
            ScenarioKind::Casita => "Casita",
            ScenarioKind::Rebuild => "Sell & Rebuild",
        }
    }

    /// Care is delivered at home (escalating hours) rather than in a facility
    pub fn uses_home_care(&self) -> bool {
        !matches!(self, ScenarioKind::Facility)
    }
}

/// One scenario as run by the engine: the plan plus its switches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub kind: ScenarioKind,

    /// Keep Gen1's home and rent it out instead of selling
    pub rent_gen1_home: bool,

    /// Manual new-home down payment percent (rebuild only)
    pub down_payment_override: Option<f64>,
}

impl ScenarioSpec {
    pub fn new(kind: ScenarioKind) -> Self {
        Self {
            kind,
            rent_gen1_home: false,
            down_payment_override: None,
        }
    }

    pub fn with_rental(mut self, rent_gen1_home: bool) -> Self {
        self.rent_gen1_home = rent_gen1_home;
        self
    }

    pub fn with_down_payment_override(mut self, percent: Option<f64>) -> Self {
        self.down_payment_override = percent;
        self
    }
}

/// Per-scenario switches as they appear in the input document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOptions {
    pub facility_rental: bool,
    pub casita_rental: bool,
    pub rebuild_rental: bool,
    pub rebuild_down_payment_override: Option<f64>,
}

impl ScenarioOptions {
    pub fn spec(&self, kind: ScenarioKind) -> ScenarioSpec {
        match kind {
            ScenarioKind::Facility => ScenarioSpec::new(kind).with_rental(self.facility_rental),
            ScenarioKind::Casita => ScenarioSpec::new(kind).with_rental(self.casita_rental),
            ScenarioKind::Rebuild => ScenarioSpec::new(kind)
                .with_rental(self.rebuild_rental)
                .with_down_payment_override(self.rebuild_down_payment_override),
        }
    }

    pub fn specs(&self) -> [ScenarioSpec; 3] {
        ScenarioKind::ALL.map(|kind| self.spec(kind))
    }
}

fn default_gen1() -> Household {
    Household::for_generation(Generation::Gen1)
}

fn default_gen2() -> Household {
    Household::for_generation(Generation::Gen2)
}

/// Everything a projection needs. Read-only during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInput {
    #[serde(default = "default_gen1")]
    pub gen1: Household,

    #[serde(default = "default_gen2")]
    pub gen2: Household,

    #[serde(default)]
    pub assumptions: Assumptions,

    #[serde(default)]
    pub scenarios: ScenarioOptions,
}

impl Default for PlannerInput {
    fn default() -> Self {
        Self {
            gen1: default_gen1(),
            gen2: default_gen2(),
            assumptions: Assumptions::default_planning(),
            scenarios: ScenarioOptions::default(),
        }
    }
}

impl PlannerInput {
    /// Parse an input document; absent sections take stock values
    pub fn from_json_str(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn household(&self, generation: Generation) -> &Household {
        match generation {
            Generation::Gen1 => &self.gen1,
            Generation::Gen2 => &self.gen2,
        }
    }

    /// Check the invariants the projection assumes but does not enforce.
    ///
    /// The engine runs on any input; this is for callers that want to reject
    /// nonsense before it turns into nonsense output.
    pub fn validate(&self) -> PlannerResult<()> {
        for (generation, prefix) in [(Generation::Gen1, "gen1"), (Generation::Gen2, "gen2")] {
            let household = self.household(generation);
            for (name, value) in household.monetary_fields() {
                non_negative(&format!("{prefix}.{name}"), value)?;
            }
            non_negative(&format!("{prefix}.mortgage_rate"), household.mortgage_rate)?;
            non_negative(&format!("{prefix}.other_debt_rate"), household.other_debt_rate)?;
        }

        let care = &self.assumptions.care;
        if care.years_independent + care.years_assisted > care.total_years {
            return Err(PlannerError::invalid(
                "assumptions.care",
                format!(
                    "years_independent ({}) + years_assisted ({}) exceeds total_years ({})",
                    care.years_independent, care.years_assisted, care.total_years
                ),
            ));
        }
        for (name, value) in [
            ("independent_annual", care.independent_annual),
            ("assisted_annual", care.assisted_annual),
            ("skilled_annual", care.skilled_annual),
        ] {
            non_negative(&format!("assumptions.care.{name}"), value)?;
        }

        let casita = &self.assumptions.casita;
        non_negative("assumptions.casita.build_cost", casita.build_cost)?;
        percent("assumptions.casita.down_payment_percent", casita.down_payment_percent)?;
        non_negative("assumptions.casita.home_care_year1_budget", casita.home_care_year1_budget)?;
        non_negative("assumptions.casita.food_annual", casita.food_annual)?;
        non_negative("assumptions.casita.utilities_annual", casita.utilities_annual)?;

        let new_home = &self.assumptions.new_home;
        if new_home.build_cost <= 0.0 {
            return Err(PlannerError::invalid(
                "assumptions.new_home.build_cost",
                "must be positive",
            ));
        }

        let rental = &self.assumptions.rental;
        non_negative("assumptions.rental.monthly_rent", rental.monthly_rent)?;
        percent("assumptions.rental.occupancy_percent", rental.occupancy_percent)?;

        if let Some(dp) = self.scenarios.rebuild_down_payment_override {
            percent("scenarios.rebuild_down_payment_override", dp)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> PlannerResult<()> {
    if value < 0.0 || value.is_nan() {
        return Err(PlannerError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}

fn percent(field: &str, value: f64) -> PlannerResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(PlannerError::invalid(field, format!("must be within 0..=100 (got {value})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_is_valid() {
        assert!(PlannerInput::default().validate().is_ok());
    }

    #[test]
    fn test_tier_years_overflow_rejected() {
        let mut input = PlannerInput::default();
        input.assumptions.care.years_assisted = 20;

        match input.validate() {
            Err(PlannerError::InvalidInput { field, .. }) => assert_eq!(field, "assumptions.care"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_liquid_rejected() {
        let mut input = PlannerInput::default();
        input.gen2.liquid_assets = -1.0;

        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("gen2.liquid_assets"));
    }

    #[test]
    fn test_override_out_of_range_rejected() {
        let mut input = PlannerInput::default();
        input.scenarios.rebuild_down_payment_override = Some(120.0);
        assert!(input.validate().is_err());

        input.scenarios.rebuild_down_payment_override = Some(35.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_partial_json_document() {
        let input = PlannerInput::from_json_str(
            r#"{
                "assumptions": { "economics": { "inflation_percent": 4.0 } },
                "scenarios": { "casita_rental": true, "rebuild_down_payment_override": 25 }
            }"#,
        )
        .unwrap();

        assert_eq!(input.gen1, Household::default_gen1());
        assert_eq!(input.gen2, Household::default_gen2());
        assert_eq!(input.assumptions.economics.inflation_percent, 4.0);
        assert_eq!(input.assumptions.economics.investment_return_percent, 6.0);

        let specs = input.scenarios.specs();
        assert!(!specs[0].rent_gen1_home);
        assert!(specs[1].rent_gen1_home);
        assert_eq!(specs[2].down_payment_override, Some(25.0));
        // Override only reaches the rebuild scenario
        assert_eq!(specs[1].down_payment_override, None);
    }

    #[test]
    fn test_incomplete_household_is_an_error() {
        let result = PlannerInput::from_json_str(r#"{ "gen1": { "liquid_assets": 10 } }"#);
        assert!(matches!(result, Err(PlannerError::Json(_))));
    }
}
