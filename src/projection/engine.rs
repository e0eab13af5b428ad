//! Monthly projection engine
//!
//! Each month runs, in order: year-boundary growth, income, expenses, care
//! cost, debt service, care-debt interest, then the cash-flow waterfall.
//! Snapshots are taken at the end of every `snapshot_interval_months`.

use super::cashflows::{MonthRow, ProjectionResult, YearSnapshot};
use super::setup::{ScenarioLoans, ScenarioSetup};
use super::state::{Liability, ScenarioState};
use crate::input::{PlannerInput, ScenarioKind, ScenarioSpec};

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub projection_months: u32,

    /// Months between snapshots
    pub snapshot_interval_months: u32,

    /// Whether to record a row for every month
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_months: 180, // 15 years
            snapshot_interval_months: 60,
            detailed_output: false,
        }
    }
}

/// Amounts flowing through one month, before the waterfall
#[derive(Debug, Clone, Copy, Default)]
struct MonthFlows {
    income: f64,
    rental_income: f64,
    expenses: f64,
    care_cost: f64,
    debt_service: f64,
}

impl MonthFlows {
    fn net(&self) -> f64 {
        self.income - self.expenses - self.debt_service - self.care_cost
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    input: PlannerInput,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(input: PlannerInput, config: ProjectionConfig) -> Self {
        Self { input, config }
    }

    pub fn input(&self) -> &PlannerInput {
        &self.input
    }

    /// Set up and project one scenario
    pub fn project_scenario(&self, spec: &ScenarioSpec) -> ProjectionResult {
        let setup = ScenarioSetup::initialize(&self.input, spec);
        self.project_setup(setup)
    }

    /// Project from an already initialized opening position
    pub fn project_setup(&self, setup: ScenarioSetup) -> ProjectionResult {
        let ScenarioSetup { spec, mut state, loans, .. } = setup;
        let mut result = ProjectionResult::new(spec);
        let interval = self.config.snapshot_interval_months.max(1);

        for month in 0..self.config.projection_months {
            let flows = self.calculate_month(&spec, &loans, &mut state, month);
            let net = flows.net();
            state.apply_net_cash_flow(net);

            if self.config.detailed_output {
                result.add_row(MonthRow {
                    month,
                    income: flows.income,
                    rental_income: flows.rental_income,
                    expenses: flows.expenses,
                    care_cost: flows.care_cost,
                    debt_service: flows.debt_service,
                    net_cash_flow: net,
                    cumulative_cash_flow: state.cumulative_cash_flow,
                    gen1_liquid: state.gen1_liquid,
                    gen2_liquid: state.gen2_liquid,
                    combined_home_value: state.combined_real_estate(),
                    care_debt: state.care_debt,
                    total_wealth: state.total_wealth(),
                });
            }

            if (month + 1) % interval == 0 {
                let snapshot = YearSnapshot::sample(&state, month, flows.care_cost);
                log::debug!(
                    "{} year {}: wealth {:.0}, care debt {:.0}",
                    spec.kind.label(),
                    snapshot.year,
                    snapshot.total_wealth,
                    snapshot.care_debt
                );
                result.add_snapshot(snapshot);
            }
        }

        result.final_state = state;
        result
    }

    /// Grow balances, price the month, and service debt. Leaves the waterfall
    /// to the caller.
    fn calculate_month(
        &self,
        spec: &ScenarioSpec,
        loans: &ScenarioLoans,
        state: &mut ScenarioState,
        month: u32,
    ) -> MonthFlows {
        let assumptions = &self.input.assumptions;
        let economics = &assumptions.economics;

        // Annual growth lands at the start of each new year
        if month > 0 && month % 12 == 0 {
            state.apply_annual_growth(economics);
        }

        let mut flows = MonthFlows::default();

        let base_income = self.input.gen1.monthly_income + self.input.gen2.monthly_income;
        flows.income = base_income * economics.income_multiplier(month);
        if spec.rent_gen1_home && state.gen1_real_estate > 0.0 {
            flows.rental_income =
                assumptions.rental.net_annual_income(state.gen1_real_estate, month, economics) / 12.0;
            flows.income += flows.rental_income;
        }

        // Gen1's own living costs are covered by the care line
        let cpi = economics.inflation_multiplier(month);
        flows.expenses = self.input.gen2.monthly_expenses * cpi;
        if spec.kind.uses_home_care() {
            flows.expenses += assumptions.casita.annual_living_costs() * cpi / 12.0;
        }

        flows.care_cost = match spec.kind {
            ScenarioKind::Facility => assumptions.facility_monthly_cost(month),
            ScenarioKind::Casita | ScenarioKind::Rebuild => {
                assumptions.home_care_annual_cost(month) / 12.0
            }
        };

        flows.debt_service = service_debt(spec.kind, loans, state, month);

        state.accrue_care_debt_interest(self.input.gen2.other_debt_rate);

        flows
    }
}

/// Pay every live loan for the month and re-amortize its balance from
/// origination. Returns the total paid.
fn service_debt(kind: ScenarioKind, loans: &ScenarioLoans, state: &mut ScenarioState, month: u32) -> f64 {
    let mut total = 0.0;
    for liability in Liability::ALL {
        if state.balance(liability) <= 0.0 {
            continue;
        }
        // Gen2's mortgage is retired by the sale in the rebuild plan
        if liability == Liability::Gen2Mortgage && kind == ScenarioKind::Rebuild {
            continue;
        }
        let loan = loans.get(liability);
        total += loan.monthly_payment();
        *state.balance_mut(liability) = loan.balance_after(month + 1);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::amortization::monthly_payment;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn engine(input: PlannerInput, months: u32) -> ProjectionEngine {
        let config = ProjectionConfig {
            projection_months: months,
            detailed_output: true,
            ..Default::default()
        };
        ProjectionEngine::new(input, config)
    }

    #[test]
    fn test_default_run_shape() {
        let engine = ProjectionEngine::new(PlannerInput::default(), ProjectionConfig::default());

        for kind in ScenarioKind::ALL {
            let result = engine.project_scenario(&ScenarioSpec::new(kind));
            let years: Vec<u32> = result.snapshots.iter().map(|s| s.year).collect();
            assert_eq!(years, vec![5, 10, 15]);
            assert!(result.months.is_empty());
        }
    }

    #[test]
    fn test_facility_sale_visible_after_first_month() {
        let result = engine(PlannerInput::default(), 60)
            .project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));

        // Month 0 runs a surplus, so Gen1's pool is untouched by the waterfall
        let first = &result.months[0];
        assert!(first.net_cash_flow > 0.0);
        assert_abs_diff_eq!(first.gen1_liquid, 300_000.0 + 400_000.0 * 0.91, epsilon = 1e-6);
        assert_eq!(result.final_state.gen1_real_estate, 0.0);
        assert_eq!(result.snapshots.len(), 1);
    }

    #[test]
    fn test_first_month_flows_facility() {
        let result = engine(PlannerInput::default(), 1)
            .project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));
        let row = &result.months[0];

        assert_relative_eq!(row.income, 11_000.0);
        assert_relative_eq!(row.expenses, 5_000.0);
        assert_relative_eq!(row.care_cost, 37_000.0 / 12.0, epsilon = 1e-9);
        assert_eq!(row.debt_service, 0.0);
        assert_relative_eq!(row.net_cash_flow, 6_000.0 - 37_000.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(row.gen2_liquid, 1_500_000.0 + row.net_cash_flow, epsilon = 1e-6);
    }

    #[test]
    fn test_home_care_scenarios_add_living_costs() {
        let result = engine(PlannerInput::default(), 1)
            .project_scenario(&ScenarioSpec::new(ScenarioKind::Casita));
        let row = &result.months[0];

        assert_relative_eq!(row.expenses, 5_000.0 + 6_600.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(row.care_cost, 3_432.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(row.debt_service, monthly_payment(160_000.0, 6.5, 15), epsilon = 1e-9);
    }

    #[test]
    fn test_annual_growth_is_stepped() {
        let result = engine(PlannerInput::default(), 13)
            .project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));

        // Gen1 liquid only moves at the year boundary
        let gen1: Vec<f64> = result.months.iter().map(|r| r.gen1_liquid).collect();
        assert!(gen1[..12].iter().all(|&v| (v - gen1[0]).abs() < 1e-9));
        assert_relative_eq!(gen1[12], gen1[11] * 1.06, epsilon = 1e-6);
    }

    #[test]
    fn test_casita_loan_balance_tracks_amortization() {
        let result = engine(PlannerInput::default(), 24)
            .project_scenario(&ScenarioSpec::new(ScenarioKind::Casita));

        let loan = crate::projection::Loan::new(160_000.0, 6.5, 15);
        assert_relative_eq!(result.final_state.casita_debt, loan.balance_after(24), epsilon = 1e-6);
    }

    #[test]
    fn test_short_loan_retires_and_stops_charging() {
        let mut input = PlannerInput::default();
        input.gen2.other_debt_balance = 12_000.0;
        input.gen2.other_debt_rate = 6.0;
        input.gen2.other_debt_term = 1;

        let result = engine(input, 24).project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));

        assert!(result.months[11].debt_service > 0.0);
        assert_eq!(result.months[12].debt_service, 0.0);
        assert_eq!(result.final_state.gen2_other_debt, 0.0);
    }

    #[test]
    fn test_rental_income_only_when_renting() {
        let input = PlannerInput::default();
        let engine = engine(input, 12);

        let sold = engine.project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));
        assert!(sold.months.iter().all(|r| r.rental_income == 0.0));

        let rented = engine.project_scenario(&ScenarioSpec::new(ScenarioKind::Facility).with_rental(true));
        assert_relative_eq!(rented.months[0].rental_income, 11_650.0 / 12.0, epsilon = 1e-9);
        assert!(rented.months[11].rental_income > rented.months[0].rental_income);
    }

    #[test]
    fn test_shortfall_becomes_care_debt_and_accrues() {
        let mut input = PlannerInput::default();
        input.gen1.liquid_assets = 0.0;
        input.gen1.real_estate_value = 0.0;
        input.gen2.liquid_assets = 10_000.0;
        input.gen1.monthly_income = 0.0;
        input.gen2.monthly_income = 0.0;

        let result = engine(input, 24).project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));

        assert_eq!(result.final_state.gen1_liquid, 0.0);
        assert_eq!(result.final_state.gen2_liquid, 0.0);
        assert!(result.final_state.care_debt > 0.0);

        // Once in debt, each month's debt exceeds last month's debt plus the deficit
        // because of interest
        let rows = &result.months;
        for pair in rows.windows(2).skip(5) {
            let (prev, cur) = (&pair[0], &pair[1]);
            if prev.care_debt > 0.0 {
                assert!(cur.care_debt > prev.care_debt - cur.net_cash_flow);
            }
        }
    }

    #[test]
    fn test_care_debt_accrues_at_gen2_rate_before_deficit() {
        let mut input = PlannerInput::default();
        input.gen1.liquid_assets = 0.0;
        input.gen1.real_estate_value = 0.0;
        input.gen1.monthly_income = 0.0;
        input.gen1.other_debt_rate = 24.0;
        input.gen2.liquid_assets = 0.0;
        input.gen2.monthly_income = 0.0;
        input.gen2.other_debt_rate = 12.0;

        let result = engine(input, 3).project_scenario(&ScenarioSpec::new(ScenarioKind::Facility));
        let rows = &result.months;

        // Nothing to accrue on in month 0, so the debt is exactly the deficit
        assert!(rows[0].net_cash_flow < 0.0);
        assert_relative_eq!(rows[0].care_debt, -rows[0].net_cash_flow, epsilon = 1e-9);

        for pair in rows.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            assert_relative_eq!(
                cur.care_debt,
                prev.care_debt * 1.01 - cur.net_cash_flow,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_final_wealth_matches_state() {
        let mut input = PlannerInput::default();
        input.gen1.other_debt_balance = 20_000.0;
        input.gen2.mortgage_balance = 250_000.0;
        input.gen2.mortgage_rate = 5.0;
        input.gen2.mortgage_term = 30;
        input.scenarios.rebuild_down_payment_override = Some(10.0);

        let engine = ProjectionEngine::new(input.clone(), ProjectionConfig::default());
        for spec in input.scenarios.specs() {
            let result = engine.project_scenario(&spec);
            let s = &result.final_state;
            let assets = s.gen1_real_estate + s.gen2_real_estate + s.gen1_liquid + s.gen2_liquid;
            let debts = s.gen1_other_debt
                + s.gen2_other_debt
                + s.gen1_mortgage
                + s.gen2_mortgage
                + s.casita_debt
                + s.new_home_mortgage
                + s.care_debt;
            let last = result.snapshots.last().unwrap();
            assert_eq!(last.year, 15);
            assert_relative_eq!(last.total_wealth, assets - debts, epsilon = 1e-6, max_relative = 1e-12);
        }
    }
}
