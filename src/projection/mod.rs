//! Scenario setup and the monthly projection engine

pub mod amortization;
mod cashflows;
mod engine;
mod setup;
mod state;

pub use amortization::{monthly_payment, remaining_balance, Loan};
pub use cashflows::{CareDebtWarning, MonthRow, ProjectionResult, YearSnapshot};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use setup::{auto_down_payment_percent, RebuildFinancing, ScenarioLoans, ScenarioSetup};
pub use state::{Liability, ScenarioState};
