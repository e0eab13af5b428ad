//! Elder-care planner - projection engine for multi-generational household finances
//!
//! This library provides:
//! - Household and planning-assumption inputs (JSON loadable)
//! - Loan amortization, tiered and escalating care costs, rental yield
//! - One-time scenario setup (home sales, casita and new-home financing)
//! - A 15-year monthly projection with a cross-household cash-flow waterfall
//! - Five-year snapshots and a comparison of the three care plans

pub mod error;
pub mod household;
pub mod assumptions;
pub mod input;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use household::{Generation, Household};
pub use assumptions::Assumptions;
pub use input::{PlannerInput, ScenarioKind, ScenarioOptions, ScenarioSpec};
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, YearSnapshot};
pub use scenario::{PlannerReport, ScenarioRunner};
