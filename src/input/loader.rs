//! JSON input loader

use std::fs;
use std::path::Path;

use super::PlannerInput;
use crate::error::PlannerResult;

/// Read a planner input document from disk
pub fn load_input<P: AsRef<Path>>(path: P) -> PlannerResult<PlannerInput> {
    let path = path.as_ref();
    log::debug!("Loading planner input from {}", path.display());
    let text = fs::read_to_string(path)?;
    PlannerInput::from_json_str(&text)
}
