//! Time-stepped carbon trajectory under a logging plan.
//!
//! The engine walks the step grid from year 0 to the horizon. At each
//! boundary it first applies any cuts scheduled there, records the sample,
//! then recovers one step toward baseline. A cut at the horizon is applied
//! and shows in the final sample but gets no recovery.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::constants::{HORIZON_YEARS, PRODUCT_FRACTION, RECOVERY_RATE, STEP_YEARS};
use crate::error::{Result, ValidationError};
use crate::operations::{schedule, validate_operations, LoggingOperation};
use crate::recovery::RecoveryModel;
use crate::scenario::ScenarioConfig;

/// Engine parameters shared by every scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub horizon_years: u32,
    pub step_years: u32,
    /// Fraction of the deficit recovered per step, in (0, 1).
    pub recovery_rate: f64,
    /// Share of removed carbon kept as wood product, in [0, 1].
    pub product_fraction: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_years: HORIZON_YEARS,
            step_years: STEP_YEARS,
            recovery_rate: RECOVERY_RATE,
            product_fraction: PRODUCT_FRACTION,
        }
    }
}

impl SimulationConfig {
    /// Check the time grid. Rate and product fraction are checked when the
    /// [`RecoveryModel`] is built.
    pub fn validate(&self) -> Result<()> {
        if self.step_years == 0 {
            return Err(ValidationError::InvalidStep);
        }
        if self.horizon_years % self.step_years != 0 {
            return Err(ValidationError::HorizonNotOnStep {
                horizon: self.horizon_years,
                step: self.step_years,
            });
        }
        Ok(())
    }

    /// Number of samples in a trajectory, year 0 included.
    pub fn sample_count(&self) -> usize {
        if self.step_years == 0 {
            return 0;
        }
        (self.horizon_years / self.step_years) as usize + 1
    }
}

/// Stock at one grid year, after any cut scheduled at that year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub year: u32,
    pub carbon: f64,
    /// `baseline - carbon`; the gap to an unlogged forest.
    pub deficit: f64,
}

/// One applied logging pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutEvent {
    pub year: u32,
    pub intensity: f64,
    pub carbon_before: f64,
    pub carbon_after: f64,
    /// Wood product from this pass (Mg C/ha).
    pub harvested: f64,
}

/// Completed run. Never mutated after [`simulate`] returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub baseline_carbon: f64,
    pub samples: Vec<SamplePoint>,
    pub cuts: Vec<CutEvent>,
    /// Cumulative wood product (Mg C/ha).
    pub total_harvested: f64,
}

impl Simulation {
    pub fn final_carbon(&self) -> f64 {
        self.samples
            .last()
            .map_or(self.baseline_carbon, |s| s.carbon)
    }

    pub fn carbon_at(&self, year: u32) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.year == year)
            .map(|s| s.carbon)
    }

    /// Lowest stock reached, cuts included.
    pub fn min_carbon(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.carbon)
            .fold(self.baseline_carbon, f64::min)
    }

    /// Final stock as a percentage of baseline.
    pub fn pct_baseline(&self) -> f64 {
        self.final_carbon() / self.baseline_carbon * 100.0
    }
}

/// Run a logging plan over the full horizon.
pub fn simulate(
    scenario: &ScenarioConfig,
    operations: &[LoggingOperation],
    config: &SimulationConfig,
) -> Result<Simulation> {
    config.validate()?;
    let model = RecoveryModel::for_scenario(scenario, config)?;
    if let Some(err) = validate_operations(operations, config).into_iter().next() {
        return Err(err);
    }

    let baseline = model.baseline_carbon();
    let plan = schedule(operations);

    let mut samples = Vec::with_capacity(config.sample_count());
    let mut cuts = Vec::new();
    let mut total_harvested = 0.0;
    let mut carbon = baseline;

    for year in (0..=config.horizon_years).step_by(config.step_years as usize) {
        if let Some(passes) = plan.get(&year) {
            for &intensity in passes {
                let outcome = model.apply_logging(carbon, intensity)?;
                debug!(
                    "Cut {:.0}% at year {}: {:.1} -> {:.1} Mg C/ha, {:.2} Mg C product",
                    intensity * 100.0,
                    year,
                    carbon,
                    outcome.remaining,
                    outcome.harvested
                );
                cuts.push(CutEvent {
                    year,
                    intensity,
                    carbon_before: carbon,
                    carbon_after: outcome.remaining,
                    harvested: outcome.harvested,
                });
                total_harvested += outcome.harvested;
                carbon = outcome.remaining;
            }
        }

        samples.push(SamplePoint {
            year,
            carbon,
            deficit: baseline - carbon,
        });

        if year < config.horizon_years {
            carbon = model.step(carbon);
            trace!("Recovered to {:.2} Mg C/ha by year {}", carbon, year + config.step_years);
        }
    }

    debug!(
        "Simulated '{}': {} cuts, final {:.1} Mg C/ha, {:.2} Mg C product",
        scenario.name,
        cuts.len(),
        carbon,
        total_harvested
    );

    Ok(Simulation {
        baseline_carbon: baseline,
        samples,
        cuts,
        total_harvested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ops: &[LoggingOperation]) -> Simulation {
        simulate(&ScenarioConfig::default(), ops, &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_sample_grid() {
        let sim = run(&[]);
        assert_eq!(sim.samples.len(), 21);
        assert_eq!(sim.samples[0].year, 0);
        assert_eq!(sim.samples[20].year, 100);
        for pair in sim.samples.windows(2) {
            assert_eq!(pair[1].year - pair[0].year, 5);
        }
    }

    #[test]
    fn test_no_logging_stays_at_baseline() {
        let sim = run(&[]);
        for s in &sim.samples {
            assert_eq!(s.carbon, 300.0);
            assert_eq!(s.deficit, 0.0);
        }
        assert!(sim.cuts.is_empty());
        assert_eq!(sim.total_harvested, 0.0);
    }

    #[test]
    fn test_inactive_slots_are_ignored() {
        let sim = run(&[
            LoggingOperation::new(0, 0.25),
            LoggingOperation::new(40, 0.0),
        ]);
        assert_eq!(sim, run(&[]));
    }

    #[test]
    fn test_unused_slots_on_any_year_are_absent() {
        assert_eq!(run(&[LoggingOperation::new(12, 0.0)]), run(&[]));
        assert_eq!(run(&[LoggingOperation::new(0, 0.3)]), run(&[]));
        assert_eq!(
            run(&[
                LoggingOperation::new(10, 0.25),
                LoggingOperation::new(12, 0.0),
            ]),
            run(&[LoggingOperation::new(10, 0.25)])
        );
    }

    #[test]
    fn test_cut_shows_at_its_year() {
        let sim = run(&[LoggingOperation::new(10, 0.25)]);
        assert_eq!(sim.carbon_at(5), Some(300.0));
        assert!((sim.carbon_at(10).unwrap() - 225.0).abs() < 1e-9);
        assert!((sim.carbon_at(15).unwrap() - 234.0).abs() < 1e-9);
        assert_eq!(sim.cuts.len(), 1);
        let cut = sim.cuts[0];
        assert_eq!(cut.carbon_before, 300.0);
        assert!((cut.carbon_after - 225.0).abs() < 1e-9);
        assert!((cut.harvested - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_quarter_cut_final_carbon() {
        let sim = run(&[LoggingOperation::new(10, 0.25)]);
        let expected = 300.0 - 75.0 * 0.88_f64.powi(18);
        assert!((sim.final_carbon() - expected).abs() < 1e-9);
        assert!((sim.final_carbon() - 292.5).abs() < 0.1);
        assert!((sim.total_harvested - 30.0).abs() < 1e-9);
        assert!((sim.min_carbon() - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_year_passes_are_sequential() {
        let sim = run(&[
            LoggingOperation::new(20, 0.5),
            LoggingOperation::new(20, 0.5),
        ]);
        assert_eq!(sim.cuts.len(), 2);
        assert!((sim.cuts[0].carbon_after - 150.0).abs() < 1e-9);
        assert!((sim.cuts[1].carbon_before - 150.0).abs() < 1e-9);
        assert!((sim.cuts[1].carbon_after - 75.0).abs() < 1e-9);
        // 60 + 30 of product, not 2 * 60
        assert!((sim.total_harvested - 90.0).abs() < 1e-9);
        assert!((sim.carbon_at(20).unwrap() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_cut_at_horizon_gets_no_recovery() {
        let sim = run(&[LoggingOperation::new(100, 0.1)]);
        assert!((sim.final_carbon() - 270.0).abs() < 1e-9);
        assert_eq!(sim.carbon_at(95), Some(300.0));
    }

    #[test]
    fn test_rejects_year_beyond_horizon() {
        let err = simulate(
            &ScenarioConfig::default(),
            &[LoggingOperation::new(105, 0.1)],
            &SimulationConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::YearOutOfRange {
                year: 105,
                horizon: 100
            }
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        let scenario = ScenarioConfig::default();
        let config = SimulationConfig {
            horizon_years: 98,
            ..Default::default()
        };
        assert_eq!(
            simulate(&scenario, &[], &config),
            Err(ValidationError::HorizonNotOnStep {
                horizon: 98,
                step: 5
            })
        );
        let config = SimulationConfig {
            recovery_rate: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            simulate(&scenario, &[], &config),
            Err(ValidationError::InvalidRecoveryRate { .. })
        ));
    }

    #[test]
    fn test_custom_grid() {
        let config = SimulationConfig {
            horizon_years: 25,
            step_years: 1,
            recovery_rate: 0.0825,
            ..Default::default()
        };
        let sim = simulate(
            &ScenarioConfig::default(),
            &[LoggingOperation::new(3, 0.25)],
            &config,
        )
        .unwrap();
        assert_eq!(sim.samples.len(), config.sample_count());
        assert_eq!(sim.samples.len(), 26);
        assert!((sim.carbon_at(3).unwrap() - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_deficit_tracks_carbon() {
        let sim = run(&[LoggingOperation::new(30, 0.2)]);
        for s in &sim.samples {
            assert!((s.carbon + s.deficit - 300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pct_baseline() {
        let sim = run(&[LoggingOperation::new(100, 0.1)]);
        assert!((sim.pct_baseline() - 90.0).abs() < 1e-9);
    }
}
