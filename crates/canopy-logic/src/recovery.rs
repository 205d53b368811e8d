//! Carbon recovery toward equilibrium and instantaneous logging removal.
//!
//! Recovery is the discrete relaxation `C ← C + k × (baseline − C)` applied
//! once per step. The deficit `baseline − C` shrinks by a factor `(1 − k)`
//! each step, so the stock approaches baseline but never reaches it.

use crate::error::{ensure_finite, Result, ValidationError};
use crate::scenario::ScenarioConfig;
use crate::simulation::SimulationConfig;

/// Carbon left standing and wood product taken by one logging pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggingOutcome {
    /// Stock after removal (Mg C/ha).
    pub remaining: f64,
    /// Removed carbon that becomes wood product (Mg C/ha).
    pub harvested: f64,
}

/// Validated recovery parameters for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryModel {
    baseline_carbon: f64,
    rate: f64,
    step_years: u32,
    product_fraction: f64,
}

impl RecoveryModel {
    pub fn new(
        baseline_carbon: f64,
        rate: f64,
        step_years: u32,
        product_fraction: f64,
    ) -> Result<Self> {
        let baseline_carbon = ensure_finite("baseline_carbon", baseline_carbon)?;
        if baseline_carbon <= 0.0 {
            return Err(ValidationError::InvalidBaseline {
                baseline: baseline_carbon,
            });
        }
        let rate = ensure_finite("recovery_rate", rate)?;
        if rate <= 0.0 || rate >= 1.0 {
            return Err(ValidationError::InvalidRecoveryRate { rate });
        }
        if step_years == 0 {
            return Err(ValidationError::InvalidStep);
        }
        let product_fraction = ensure_finite("product_fraction", product_fraction)?;
        if !(0.0..=1.0).contains(&product_fraction) {
            return Err(ValidationError::InvalidProductFraction {
                fraction: product_fraction,
            });
        }
        Ok(Self {
            baseline_carbon,
            rate,
            step_years,
            product_fraction,
        })
    }

    pub fn for_scenario(scenario: &ScenarioConfig, config: &SimulationConfig) -> Result<Self> {
        Self::new(
            scenario.baseline_carbon,
            config.recovery_rate,
            config.step_years,
            config.product_fraction,
        )
    }

    pub fn baseline_carbon(&self) -> f64 {
        self.baseline_carbon
    }

    /// Check a carbon value lies in `[0, baseline]`.
    pub fn check_carbon(&self, carbon: f64) -> Result<f64> {
        let carbon = ensure_finite("carbon", carbon)?;
        if carbon < 0.0 {
            return Err(ValidationError::NegativeCarbon { carbon });
        }
        if carbon > self.baseline_carbon {
            return Err(ValidationError::CarbonAboveBaseline {
                carbon,
                baseline: self.baseline_carbon,
            });
        }
        Ok(carbon)
    }

    /// One relaxation step. Caller guarantees `carbon ∈ [0, baseline]`.
    pub fn step(&self, carbon: f64) -> f64 {
        let deficit = self.baseline_carbon - carbon;
        // min() only absorbs rounding, the recurrence itself never overshoots.
        (carbon + self.rate * deficit).min(self.baseline_carbon)
    }

    /// Recover `carbon` over `years`, which must be a whole number of steps.
    pub fn recover(&self, carbon: f64, years: u32) -> Result<f64> {
        let mut carbon = self.check_carbon(carbon)?;
        if years % self.step_years != 0 {
            return Err(ValidationError::YearNotOnStep {
                years,
                step: self.step_years,
            });
        }
        for _ in 0..years / self.step_years {
            carbon = self.step(carbon);
        }
        Ok(carbon)
    }

    /// Remove `intensity` of the standing stock.
    pub fn apply_logging(&self, carbon: f64, intensity: f64) -> Result<LoggingOutcome> {
        let carbon = self.check_carbon(carbon)?;
        let intensity = check_intensity(intensity)?;
        let removed = carbon * intensity;
        Ok(LoggingOutcome {
            remaining: carbon - removed,
            harvested: removed * self.product_fraction,
        })
    }
}

pub(crate) fn check_intensity(intensity: f64) -> Result<f64> {
    let intensity = ensure_finite("intensity", intensity)?;
    if !(0.0..=1.0).contains(&intensity) {
        return Err(ValidationError::IntensityOutOfRange { intensity });
    }
    Ok(intensity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASELINE_CARBON, PRODUCT_FRACTION, RECOVERY_RATE, STEP_YEARS};

    fn model() -> RecoveryModel {
        RecoveryModel::new(BASELINE_CARBON, RECOVERY_RATE, STEP_YEARS, PRODUCT_FRACTION).unwrap()
    }

    #[test]
    fn test_single_step() {
        // 225 + 0.12 * 75 = 234
        assert!((model().step(225.0) - 234.0).abs() < 1e-9);
    }

    #[test]
    fn test_recover_zero_years_is_identity() {
        assert_eq!(model().recover(212.5, 0).unwrap(), 212.5);
    }

    #[test]
    fn test_recover_matches_closed_form() {
        // Deficit shrinks by (1 - k) per step: 75 * 0.88^18 after 90 years.
        let c = model().recover(225.0, 90).unwrap();
        let expected = 300.0 - 75.0 * 0.88_f64.powi(18);
        assert!((c - expected).abs() < 1e-9);
        assert!((c - 292.5).abs() < 0.1);
    }

    #[test]
    fn test_recover_never_reaches_baseline() {
        let c = model().recover(150.0, 100).unwrap();
        assert!(c < BASELINE_CARBON);
        assert!(c > 150.0);
    }

    #[test]
    fn test_recover_at_baseline_stays() {
        assert_eq!(model().recover(BASELINE_CARBON, 50).unwrap(), BASELINE_CARBON);
    }

    #[test]
    fn test_recover_from_zero() {
        let c = model().recover(0.0, 5).unwrap();
        assert!((c - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_recover_rejects_off_step_years() {
        assert_eq!(
            model().recover(250.0, 7),
            Err(ValidationError::YearNotOnStep { years: 7, step: 5 })
        );
    }

    #[test]
    fn test_recover_rejects_bad_carbon() {
        assert!(matches!(
            model().recover(-1.0, 5),
            Err(ValidationError::NegativeCarbon { .. })
        ));
        assert!(matches!(
            model().recover(301.0, 5),
            Err(ValidationError::CarbonAboveBaseline { .. })
        ));
        assert!(matches!(
            model().recover(f64::NAN, 5),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_new_rejects_bad_rate() {
        for rate in [0.0, 1.0, -0.1, 1.5] {
            assert_eq!(
                RecoveryModel::new(300.0, rate, 5, 0.4),
                Err(ValidationError::InvalidRecoveryRate { rate })
            );
        }
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert_eq!(
            RecoveryModel::new(300.0, 0.12, 0, 0.4),
            Err(ValidationError::InvalidStep)
        );
        assert!(matches!(
            RecoveryModel::new(0.0, 0.12, 5, 0.4),
            Err(ValidationError::InvalidBaseline { .. })
        ));
        assert!(matches!(
            RecoveryModel::new(300.0, 0.12, 5, 1.1),
            Err(ValidationError::InvalidProductFraction { .. })
        ));
    }

    #[test]
    fn test_apply_logging_quarter_cut() {
        let out = model().apply_logging(300.0, 0.25).unwrap();
        assert!((out.remaining - 225.0).abs() < 1e-9);
        assert!((out.harvested - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_logging_zero_intensity() {
        let out = model().apply_logging(280.0, 0.0).unwrap();
        assert_eq!(out.remaining, 280.0);
        assert_eq!(out.harvested, 0.0);
    }

    #[test]
    fn test_apply_logging_clear_cut() {
        let out = model().apply_logging(280.0, 1.0).unwrap();
        assert_eq!(out.remaining, 0.0);
        assert!((out.harvested - 112.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_logging_rejects_intensity() {
        assert_eq!(
            model().apply_logging(280.0, 1.2),
            Err(ValidationError::IntensityOutOfRange { intensity: 1.2 })
        );
        assert_eq!(
            model().apply_logging(280.0, -0.05),
            Err(ValidationError::IntensityOutOfRange { intensity: -0.05 })
        );
    }

    #[test]
    fn test_for_scenario_uses_defaults() {
        let scenario = ScenarioConfig::default();
        let m = RecoveryModel::for_scenario(&scenario, &SimulationConfig::default()).unwrap();
        assert_eq!(m, model());
    }
}
