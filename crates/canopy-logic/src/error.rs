//! Input validation errors.
//!
//! The engine never clamps: any out-of-range input is rejected at the
//! boundary of [`simulate`](crate::simulation::simulate) or
//! [`score`](crate::scoring::score).

/// Out-of-range numeric input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("carbon stock cannot be negative: {carbon}")]
    NegativeCarbon { carbon: f64 },

    #[error("carbon stock {carbon} exceeds baseline {baseline}")]
    CarbonAboveBaseline { carbon: f64, baseline: f64 },

    #[error("baseline carbon must be positive, got {baseline}")]
    InvalidBaseline { baseline: f64 },

    #[error("intensity {intensity} is outside [0, 1]")]
    IntensityOutOfRange { intensity: f64 },

    #[error("year {year} is outside [0, {horizon}]")]
    YearOutOfRange { year: u32, horizon: u32 },

    #[error("{years} years is not a multiple of the {step}-year step")]
    YearNotOnStep { years: u32, step: u32 },

    #[error("recovery rate {rate} is outside (0, 1)")]
    InvalidRecoveryRate { rate: f64 },

    #[error("product fraction {fraction} is outside [0, 1]")]
    InvalidProductFraction { fraction: f64 },

    #[error("step length must be positive")]
    InvalidStep,

    #[error("horizon {horizon} is not a multiple of the {step}-year step")]
    HorizonNotOnStep { horizon: u32, step: u32 },

    #[error("harvested total cannot be negative: {harvested}")]
    NegativeHarvest { harvested: f64 },

    #[error("score thresholds must satisfy 0 < severe ({severe}) <= moderate ({moderate}) <= 1")]
    InvalidThresholds { severe: f64, moderate: f64 },

    #[error("wood multiplier cannot be negative: {multiplier}")]
    NegativeMultiplier { multiplier: f64 },

    #[error("{field} must not be positive, got {value}")]
    PositivePenalty { field: &'static str, value: f64 },

    #[error("sustainable bonus cannot be negative: {bonus}")]
    NegativeBonus { bonus: f64 },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reject NaN and infinities before any range check.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("carbon", 12.5), Ok(12.5));
        assert!(matches!(
            ensure_finite("carbon", f64::NAN),
            Err(ValidationError::NonFinite { field: "carbon", .. })
        ));
        assert!(ensure_finite("carbon", f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages_name_the_value() {
        let err = ValidationError::YearNotOnStep { years: 7, step: 5 };
        assert_eq!(err.to_string(), "7 years is not a multiple of the 5-year step");
        let err = ValidationError::IntensityOutOfRange { intensity: 1.5 };
        assert!(err.to_string().contains("1.5"));
    }
}
