//! Simulate-then-score in one call.
//!
//! This is what a front end calls on every plan change: each call owns its
//! trajectory and nothing is cached between calls.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::operations::LoggingOperation;
use crate::scenario::ScenarioConfig;
use crate::scoring::{score, ScoreBreakdown, ScoringPolicy};
use crate::simulation::{simulate, Simulation, SimulationConfig};

/// Trajectory plus its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub simulation: Simulation,
    pub score: ScoreBreakdown,
}

pub fn evaluate(
    scenario: &ScenarioConfig,
    operations: &[LoggingOperation],
    config: &SimulationConfig,
    policy: &ScoringPolicy,
) -> Result<Assessment> {
    let simulation = simulate(scenario, operations, config)?;
    let score = score(
        simulation.final_carbon(),
        simulation.total_harvested,
        simulation.baseline_carbon,
        policy,
    )?;
    Ok(Assessment { simulation, score })
}
