//! Logging operations: a plan is a short list of (year, intensity) entries.
//!
//! An entry with `year == 0` or `intensity == 0` is an unused slot and is
//! dropped before scheduling; it is never applied as a zero-effect cut.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ValidationError};
use crate::recovery::check_intensity;
use crate::scenario::{IntensityLevel, ScenarioConfig};
use crate::simulation::SimulationConfig;

/// One scheduled harvest entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggingOperation {
    /// Year the cut happens, on the step grid.
    pub year: u32,
    /// Fraction of standing carbon removed.
    pub intensity: f64,
}

impl LoggingOperation {
    pub fn new(year: u32, intensity: f64) -> Self {
        Self { year, intensity }
    }

    /// Entry using one of the scenario's licensed intensity levels.
    pub fn at_level(year: u32, scenario: &ScenarioConfig, level: IntensityLevel) -> Self {
        Self::new(year, scenario.intensity(level))
    }

    /// An unused slot. Equivalent to any entry with a zero field.
    pub fn inactive() -> Self {
        Self::new(0, 0.0)
    }

    pub fn is_active(&self) -> bool {
        self.year != 0 && self.intensity != 0.0
    }
}

impl Default for LoggingOperation {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Validate every entry of a plan, returning all errors found.
///
/// Unused slots are absent from the plan, so only their intensity is
/// checked for NaN or infinity; a slider left on an off-grid year is fine.
pub fn validate_operations(
    operations: &[LoggingOperation],
    config: &SimulationConfig,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for op in operations {
        if !op.is_active() {
            if let Err(e) = ensure_finite("intensity", op.intensity) {
                errors.push(e);
            }
            continue;
        }
        if let Err(e) = check_intensity(op.intensity) {
            errors.push(e);
        }
        if op.year > config.horizon_years {
            errors.push(ValidationError::YearOutOfRange {
                year: op.year,
                horizon: config.horizon_years,
            });
        }
        if config.step_years > 0 && op.year % config.step_years != 0 {
            errors.push(ValidationError::YearNotOnStep {
                years: op.year,
                step: config.step_years,
            });
        }
    }

    errors
}

/// Active operations grouped by year.
///
/// Entries sharing a year keep their input order; the engine applies them as
/// successive passes, each against what the previous one left standing.
pub fn schedule(operations: &[LoggingOperation]) -> BTreeMap<u32, Vec<f64>> {
    let mut by_year: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for op in operations.iter().filter(|op| op.is_active()) {
        by_year.entry(op.year).or_default().push(op.intensity);
    }
    by_year
}
