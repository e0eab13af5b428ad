//! Projection output: monthly detail rows and five-year snapshots

use serde::{Deserialize, Serialize};

use super::state::ScenarioState;
use crate::input::ScenarioSpec;

/// One month of projection detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Zero-based elapsed month
    pub month: u32,

    pub income: f64,
    pub rental_income: f64,
    pub expenses: f64,
    pub care_cost: f64,
    pub debt_service: f64,
    pub net_cash_flow: f64,
    pub cumulative_cash_flow: f64,

    // End-of-month balances
    pub gen1_liquid: f64,
    pub gen2_liquid: f64,
    pub combined_home_value: f64,
    pub care_debt: f64,
    pub total_wealth: f64,
}

/// Summary of a scenario's balance sheet at a year boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub year: u32,
    pub total_wealth: f64,
    pub combined_home_value: f64,
    pub combined_liquid: f64,
    pub care_debt: f64,
    pub cumulative_cash_flow: f64,

    /// The snapshot month's care cost times twelve
    pub annualized_care_cost: f64,
}

impl YearSnapshot {
    /// Capture the state at the end of the zero-based month `month`
    pub fn sample(state: &ScenarioState, month: u32, monthly_care_cost: f64) -> Self {
        Self {
            year: (month + 1) / 12,
            total_wealth: state.total_wealth(),
            combined_home_value: state.combined_real_estate(),
            combined_liquid: state.combined_liquid(),
            care_debt: state.care_debt,
            cumulative_cash_flow: state.cumulative_cash_flow,
            annualized_care_cost: monthly_care_cost * 12.0,
        }
    }
}

/// Complete projection of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub spec: ScenarioSpec,

    /// Snapshots in year order
    pub snapshots: Vec<YearSnapshot>,

    /// Monthly rows; empty unless detailed output was requested
    pub months: Vec<MonthRow>,

    /// Balance sheet after the last month
    pub final_state: ScenarioState,
}

impl ProjectionResult {
    pub fn new(spec: ScenarioSpec) -> Self {
        Self {
            spec,
            snapshots: Vec::new(),
            months: Vec::new(),
            final_state: ScenarioState::default(),
        }
    }

    pub fn add_snapshot(&mut self, snapshot: YearSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn add_row(&mut self, row: MonthRow) {
        self.months.push(row);
    }

    pub fn snapshot_for_year(&self, year: u32) -> Option<&YearSnapshot> {
        self.snapshots.iter().find(|s| s.year == year)
    }

    /// Largest snapshotted care debt and the first snapshot year it appears in
    pub fn care_debt_warning(&self) -> Option<CareDebtWarning> {
        let first = self.snapshots.iter().find(|s| s.care_debt > 0.0)?;
        let peak = self
            .snapshots
            .iter()
            .map(|s| s.care_debt)
            .fold(0.0_f64, f64::max);
        Some(CareDebtWarning {
            kind_label: self.spec.kind.label().to_string(),
            first_year: first.year,
            peak_care_debt: peak,
        })
    }
}

/// Care debt surfaced in a scenario's snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareDebtWarning {
    pub kind_label: String,
    pub first_year: u32,
    pub peak_care_debt: f64,
}
