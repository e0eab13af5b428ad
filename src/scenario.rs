//! Scenario runner for comparing the three care plans
//!
//! Each scenario owns its state for the length of its run, so the three can
//! be projected in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::{PlannerInput, ScenarioKind, ScenarioSpec};
use crate::projection::{
    CareDebtWarning, ProjectionConfig, ProjectionEngine, ProjectionResult, RebuildFinancing,
};

/// Runs scenarios against one fixed input
///
/// # Example
/// ```
/// use eldercare_planner::{PlannerInput, ScenarioRunner};
///
/// let runner = ScenarioRunner::new(PlannerInput::default());
/// let report = runner.run_all();
/// assert_eq!(report.results.len(), 3);
/// ```
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the standard 15-year, 5-year-snapshot projection
    pub fn new(input: PlannerInput) -> Self {
        Self::with_config(input, ProjectionConfig::default())
    }

    pub fn with_config(input: PlannerInput, config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(input, config),
        }
    }

    pub fn input(&self) -> &PlannerInput {
        self.engine.input()
    }

    /// Run a single scenario
    pub fn run(&self, spec: &ScenarioSpec) -> ProjectionResult {
        self.engine.project_scenario(spec)
    }

    /// Run the scenario of the given kind with the input's switches
    pub fn run_kind(&self, kind: ScenarioKind) -> ProjectionResult {
        self.run(&self.input().scenarios.spec(kind))
    }

    /// Run arbitrary scenario variants in parallel, results in input order
    pub fn run_specs(&self, specs: &[ScenarioSpec]) -> Vec<ProjectionResult> {
        specs.par_iter().map(|spec| self.run(spec)).collect()
    }

    /// Run all three plans and compare them
    pub fn run_all(&self) -> PlannerReport {
        let specs = self.input().scenarios.specs();
        let results = self.run_specs(&specs);

        for result in &results {
            if let Some(last) = result.snapshots.last() {
                log::info!(
                    "{}: year {} wealth {:.0}",
                    result.spec.kind.label(),
                    last.year,
                    last.total_wealth
                );
            }
        }

        let comparison = compare_to_baseline(&results);
        let care_debt_warnings = results.iter().filter_map(|r| r.care_debt_warning()).collect();
        let rebuild_financing = RebuildFinancing::for_spec(self.input(), &self.input().scenarios.spec(ScenarioKind::Rebuild));

        PlannerReport {
            results,
            comparison,
            care_debt_warnings,
            rebuild_financing,
        }
    }
}

/// Everything produced by one run of the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerReport {
    /// One result per scenario, in [`ScenarioKind::ALL`] order
    pub results: Vec<ProjectionResult>,
    pub comparison: Vec<ComparisonRow>,
    pub care_debt_warnings: Vec<CareDebtWarning>,
    pub rebuild_financing: RebuildFinancing,
}

impl PlannerReport {
    pub fn result(&self, kind: ScenarioKind) -> Option<&ProjectionResult> {
        self.results.iter().find(|r| r.spec.kind == kind)
    }
}

/// Total wealth of every scenario at one snapshot year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub year: u32,
    pub entries: Vec<ComparisonEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub kind: ScenarioKind,
    pub total_wealth: f64,

    /// Difference from the facility plan; positive is better
    pub vs_facility: f64,
}

/// Line up snapshots by year and difference each against the facility plan.
/// Without a facility result the differences are zero.
pub fn compare_to_baseline(results: &[ProjectionResult]) -> Vec<ComparisonRow> {
    let baseline = results.iter().find(|r| r.spec.kind == ScenarioKind::Facility);
    let Some(first) = results.first() else {
        return Vec::new();
    };

    first
        .snapshots
        .iter()
        .map(|snap| {
            let base_wealth = baseline
                .and_then(|b| b.snapshot_for_year(snap.year))
                .map(|s| s.total_wealth);

            let entries = results
                .iter()
                .filter_map(|r| {
                    let s = r.snapshot_for_year(snap.year)?;
                    Some(ComparisonEntry {
                        kind: r.spec.kind,
                        total_wealth: s.total_wealth,
                        vs_facility: base_wealth.map_or(0.0, |b| s.total_wealth - b),
                    })
                })
                .collect();

            ComparisonRow { year: snap.year, entries }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_run_all_default() {
        let runner = ScenarioRunner::new(PlannerInput::default());
        let report = runner.run_all();

        assert_eq!(report.results.len(), 3);
        for (result, kind) in report.results.iter().zip(ScenarioKind::ALL) {
            assert_eq!(result.spec.kind, kind);
            assert_eq!(result.snapshots.len(), 3);
        }

        let years: Vec<u32> = report.comparison.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![5, 10, 15]);
        for row in &report.comparison {
            assert_eq!(row.entries.len(), 3);
            assert_eq!(row.entries[0].vs_facility, 0.0);
        }

        assert_relative_eq!(report.rebuild_financing.auto_down_payment_percent, 100.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut input = PlannerInput::default();
        input.scenarios.casita_rental = true;
        input.scenarios.rebuild_down_payment_override = Some(40.0);
        let runner = ScenarioRunner::new(input.clone());

        let parallel = runner.run_specs(&input.scenarios.specs());
        for (spec, result) in input.scenarios.specs().iter().zip(&parallel) {
            assert_eq!(&runner.run(spec), result);
        }
    }

    #[test]
    fn test_runs_are_repeatable() {
        let runner = ScenarioRunner::new(PlannerInput::default());
        let a = runner.run_kind(ScenarioKind::Casita);
        let b = runner.run_kind(ScenarioKind::Casita);
        assert_eq!(a, b);
    }

    #[test]
    fn test_comparison_differences() {
        let runner = ScenarioRunner::new(PlannerInput::default());
        let report = runner.run_all();

        let facility = report.result(ScenarioKind::Facility).unwrap();
        let casita = report.result(ScenarioKind::Casita).unwrap();
        let row = &report.comparison[2];
        assert_relative_eq!(
            row.entries[1].vs_facility,
            casita.snapshots[2].total_wealth - facility.snapshots[2].total_wealth
        );
    }

    #[test]
    fn test_strained_household_warns_about_care_debt() {
        let mut input = PlannerInput::default();
        input.gen1.liquid_assets = 0.0;
        input.gen1.real_estate_value = 0.0;
        input.gen2.liquid_assets = 20_000.0;
        input.gen2.monthly_income = 1_000.0;
        input.gen1.monthly_income = 500.0;

        let report = ScenarioRunner::new(input).run_all();
        let facility = report
            .care_debt_warnings
            .iter()
            .find(|w| w.kind_label == ScenarioKind::Facility.label())
            .expect("facility plan should run out of money");
        assert_eq!(facility.first_year, 5);
        assert!(facility.peak_care_debt > 0.0);
    }

    #[test]
    fn test_more_expensive_new_home_raises_mortgage() {
        let mut input = PlannerInput::default();
        input.assumptions.new_home.build_cost = 1_500_000.0;
        let runner = ScenarioRunner::new(input);

        let result = runner.run_kind(ScenarioKind::Rebuild);
        let financing = runner.run_all().rebuild_financing;
        assert!(financing.mortgage_principal > 0.0);
        // Mortgage is amortizing, so it is below origination after 15 years
        assert!(result.final_state.new_home_mortgage < financing.mortgage_principal);
        assert!(result.final_state.new_home_mortgage > 0.0);
    }
}
