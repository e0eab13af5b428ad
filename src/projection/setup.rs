//! One-time scenario setup
//!
//! Turns the two households plus a scenario choice into the opening balance
//! sheet: homes sold, casita financed, new home bought. Also records the
//! origination terms of every loan so the engine can re-amortize from origin.

use serde::{Deserialize, Serialize};

use super::amortization::Loan;
use super::state::{Liability, ScenarioState};
use crate::input::{PlannerInput, ScenarioKind, ScenarioSpec};

/// Origination terms of each amortizing balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLoans {
    pub gen1_other_debt: Loan,
    pub gen2_other_debt: Loan,
    pub gen1_mortgage: Loan,
    pub gen2_mortgage: Loan,
    pub casita: Loan,
    pub new_home: Loan,
}

impl ScenarioLoans {
    pub fn get(&self, liability: Liability) -> &Loan {
        match liability {
            Liability::Gen1OtherDebt => &self.gen1_other_debt,
            Liability::Gen2OtherDebt => &self.gen2_other_debt,
            Liability::Gen1Mortgage => &self.gen1_mortgage,
            Liability::Gen2Mortgage => &self.gen2_mortgage,
            Liability::CasitaLoan => &self.casita,
            Liability::NewHomeMortgage => &self.new_home,
        }
    }
}

/// How the rebuild scenario pays for the new home
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebuildFinancing {
    pub gen2_sale_proceeds: f64,

    /// Zero when Gen1's home is kept as a rental
    pub gen1_sale_proceeds: f64,
    pub total_proceeds: f64,

    /// Down payment the proceeds can cover, capped at 100%
    pub auto_down_payment_percent: f64,

    /// Manual override if given, otherwise the automatic figure
    pub effective_down_payment_percent: f64,
    pub down_payment_amount: f64,
    pub mortgage_principal: f64,

    /// Proceeds left after the down payment, credited to Gen2's liquid assets.
    /// Negative when the down payment exceeds the proceeds.
    pub excess_liquid: f64,
}

impl RebuildFinancing {
    /// Work out the new-home financing without running a projection
    pub fn compute(input: &PlannerInput, rent_gen1_home: bool, down_payment_override: Option<f64>) -> Self {
        let gen2_sale_proceeds = input.gen2.home_sale_proceeds();
        let gen1_sale_proceeds = if rent_gen1_home {
            0.0
        } else {
            input.gen1.home_sale_proceeds()
        };
        let total_proceeds = gen2_sale_proceeds + gen1_sale_proceeds;

        let new_home = &input.assumptions.new_home;
        let auto_down_payment_percent = auto_down_payment_percent(total_proceeds, new_home.build_cost);
        let effective_down_payment_percent = down_payment_override.unwrap_or(auto_down_payment_percent);

        let terms = new_home.construction_with_down_payment(effective_down_payment_percent);
        let down_payment_amount = terms.down_payment_amount();

        Self {
            gen2_sale_proceeds,
            gen1_sale_proceeds,
            total_proceeds,
            auto_down_payment_percent,
            effective_down_payment_percent,
            down_payment_amount,
            mortgage_principal: new_home.build_cost - down_payment_amount,
            excess_liquid: total_proceeds - down_payment_amount,
        }
    }

    pub fn for_spec(input: &PlannerInput, spec: &ScenarioSpec) -> Self {
        Self::compute(input, spec.rent_gen1_home, spec.down_payment_override)
    }
}

/// Largest down payment the proceeds can fund, as a percent of build cost
pub fn auto_down_payment_percent(total_proceeds: f64, build_cost: f64) -> f64 {
    (total_proceeds / build_cost * 100.0).min(100.0)
}

/// Opening position of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSetup {
    pub spec: ScenarioSpec,
    pub state: ScenarioState,
    pub loans: ScenarioLoans,

    /// Present for the rebuild scenario only
    pub rebuild: Option<RebuildFinancing>,
}

impl ScenarioSetup {
    /// Apply the scenario's one-time transactions to the households' balances
    pub fn initialize(input: &PlannerInput, spec: &ScenarioSpec) -> Self {
        let gen1 = &input.gen1;
        let gen2 = &input.gen2;

        let mut state = ScenarioState {
            gen1_real_estate: gen1.real_estate_value,
            gen2_real_estate: gen2.real_estate_value,
            gen1_liquid: gen1.liquid_assets,
            gen2_liquid: gen2.liquid_assets,
            gen1_other_debt: gen1.other_debt_balance,
            gen2_other_debt: gen2.other_debt_balance,
            gen1_mortgage: gen1.mortgage_balance,
            gen2_mortgage: gen2.mortgage_balance,
            ..Default::default()
        };

        let mut loans = ScenarioLoans {
            gen1_other_debt: Loan::new(gen1.other_debt_balance, gen1.other_debt_rate, gen1.other_debt_term),
            gen2_other_debt: Loan::new(gen2.other_debt_balance, gen2.other_debt_rate, gen2.other_debt_term),
            gen1_mortgage: Loan::new(gen1.mortgage_balance, gen1.mortgage_rate, gen1.mortgage_term),
            gen2_mortgage: Loan::new(gen2.mortgage_balance, gen2.mortgage_rate, gen2.mortgage_term),
            ..Default::default()
        };

        let mut rebuild = None;

        match spec.kind {
            ScenarioKind::Facility => {
                if !spec.rent_gen1_home {
                    sell_gen1_home(&mut state, input);
                }
            }
            ScenarioKind::Casita => {
                if !spec.rent_gen1_home {
                    sell_gen1_home(&mut state, input);
                }
                let casita = input.assumptions.casita.construction();
                loans.casita = Loan::new(casita.financed_amount(), casita.financing_rate, casita.financing_term_years);
                state.casita_debt = casita.financed_amount();
                state.gen2_liquid -= casita.down_payment_amount();
                // The casita is an appreciating asset at full build cost
                state.gen2_real_estate += casita.build_cost;
            }
            ScenarioKind::Rebuild => {
                let financing = RebuildFinancing::for_spec(input, spec);

                state.gen2_real_estate = 0.0;
                state.gen2_mortgage = 0.0;
                if !spec.rent_gen1_home {
                    state.gen1_real_estate = 0.0;
                    state.gen1_mortgage = 0.0;
                }

                let new_home = &input.assumptions.new_home;
                loans.new_home = Loan::new(financing.mortgage_principal, new_home.financing_rate, new_home.financing_term_years);
                state.new_home_mortgage = financing.mortgage_principal;
                state.gen2_real_estate = new_home.build_cost;
                state.gen2_liquid += financing.excess_liquid;

                rebuild = Some(financing);
            }
        }

        log::debug!(
            "{} setup (rental={}): wealth {:.0}, liquid {:.0}",
            spec.kind.label(),
            spec.rent_gen1_home,
            state.total_wealth(),
            state.combined_liquid()
        );

        Self {
            spec: *spec,
            state,
            loans,
            rebuild,
        }
    }
}

fn sell_gen1_home(state: &mut ScenarioState, input: &PlannerInput) {
    state.gen1_liquid += input.gen1.home_sale_proceeds();
    state.gen1_real_estate = 0.0;
    state.gen1_mortgage = 0.0;
}
