//! Balance-sheet state of one scenario during projection

use serde::{Deserialize, Serialize};

use crate::assumptions::EconomicAssumptions;

/// The six amortizing balances, in the order they are serviced each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Liability {
    Gen1OtherDebt,
    Gen2OtherDebt,
    Gen1Mortgage,
    Gen2Mortgage,
    CasitaLoan,
    NewHomeMortgage,
}

impl Liability {
    pub const ALL: [Liability; 6] = [
        Liability::Gen1OtherDebt,
        Liability::Gen2OtherDebt,
        Liability::Gen1Mortgage,
        Liability::Gen2Mortgage,
        Liability::CasitaLoan,
        Liability::NewHomeMortgage,
    ];
}

/// Combined balance sheet of both generations under one scenario.
///
/// Built fresh for every run and owned by that run; the engine is the only
/// thing that mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    pub gen1_real_estate: f64,
    pub gen2_real_estate: f64,
    pub gen1_liquid: f64,
    pub gen2_liquid: f64,

    pub gen1_other_debt: f64,
    pub gen2_other_debt: f64,
    pub gen1_mortgage: f64,
    pub gen2_mortgage: f64,
    pub casita_debt: f64,
    pub new_home_mortgage: f64,

    /// Unsecured shortfall once both liquid pools are exhausted
    pub care_debt: f64,

    /// Running sum of monthly net cash flow
    pub cumulative_cash_flow: f64,
}

impl ScenarioState {
    pub fn balance(&self, liability: Liability) -> f64 {
        match liability {
            Liability::Gen1OtherDebt => self.gen1_other_debt,
            Liability::Gen2OtherDebt => self.gen2_other_debt,
            Liability::Gen1Mortgage => self.gen1_mortgage,
            Liability::Gen2Mortgage => self.gen2_mortgage,
            Liability::CasitaLoan => self.casita_debt,
            Liability::NewHomeMortgage => self.new_home_mortgage,
        }
    }

    pub fn balance_mut(&mut self, liability: Liability) -> &mut f64 {
        match liability {
            Liability::Gen1OtherDebt => &mut self.gen1_other_debt,
            Liability::Gen2OtherDebt => &mut self.gen2_other_debt,
            Liability::Gen1Mortgage => &mut self.gen1_mortgage,
            Liability::Gen2Mortgage => &mut self.gen2_mortgage,
            Liability::CasitaLoan => &mut self.casita_debt,
            Liability::NewHomeMortgage => &mut self.new_home_mortgage,
        }
    }

    pub fn combined_real_estate(&self) -> f64 {
        self.gen1_real_estate + self.gen2_real_estate
    }

    pub fn combined_liquid(&self) -> f64 {
        self.gen1_liquid + self.gen2_liquid
    }

    /// The six amortizing balances plus care debt
    pub fn total_debt(&self) -> f64 {
        Liability::ALL.iter().map(|&l| self.balance(l)).sum::<f64>() + self.care_debt
    }

    pub fn total_wealth(&self) -> f64 {
        self.combined_real_estate() + self.combined_liquid() - self.total_debt()
    }

    /// Year-boundary growth: homes appreciate (only if still held) and both
    /// liquid pools earn the investment return. Applied once per year, not
    /// prorated, so balances climb in steps.
    pub fn apply_annual_growth(&mut self, economics: &EconomicAssumptions) {
        let appreciation = economics.annual_appreciation_factor();
        if self.gen1_real_estate > 0.0 {
            self.gen1_real_estate *= appreciation;
        }
        if self.gen2_real_estate > 0.0 {
            self.gen2_real_estate *= appreciation;
        }

        let investment = economics.annual_investment_factor();
        self.gen1_liquid *= investment;
        self.gen2_liquid *= investment;
    }

    /// Compound one month of interest on outstanding care debt
    pub fn accrue_care_debt_interest(&mut self, annual_rate_percent: f64) {
        if self.care_debt > 0.0 {
            self.care_debt *= 1.0 + annual_rate_percent / 100.0 / 12.0;
        }
    }

    /// Settle one month's net cash flow.
    ///
    /// A surplus goes to Gen2. A deficit is drawn from Gen1's liquid assets
    /// first, then Gen2's; whatever neither can cover becomes care debt and
    /// the exhausted pool is pinned at zero.
    pub fn apply_net_cash_flow(&mut self, net_cash_flow: f64) {
        self.cumulative_cash_flow += net_cash_flow;

        if net_cash_flow >= 0.0 {
            self.gen2_liquid += net_cash_flow;
            return;
        }

        let deficit = -net_cash_flow;
        if self.gen1_liquid >= deficit {
            self.gen1_liquid -= deficit;
        } else if self.gen1_liquid > 0.0 {
            let remaining = deficit - self.gen1_liquid;
            self.gen1_liquid = 0.0;
            self.draw_from_gen2(remaining);
        } else {
            self.draw_from_gen2(deficit);
        }
    }

    fn draw_from_gen2(&mut self, amount: f64) {
        if self.gen2_liquid >= amount {
            self.gen2_liquid -= amount;
        } else {
            self.care_debt += amount - self.gen2_liquid;
            self.gen2_liquid = 0.0;
        }
    }
}
