//! Sustainability scoring — wood product points adjusted by degradation tier.
//!
//! `final_score = wood_products × multiplier + penalty_or_bonus`, where the
//! adjustment depends only on how far the final stock sits below baseline.
//! Thresholds use strict `<`: a forest at exactly 90% of baseline is
//! moderately, not severely, degraded.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{rating, scoring};
use crate::error::{ensure_finite, Result, ValidationError};

/// Score band reached by the final carbon stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegradationTier {
    /// At or above the moderate threshold.
    Sustainable,
    /// Between the severe and moderate thresholds.
    ModerateDegradation,
    /// Below the severe threshold.
    SevereDegradation,
}

impl DegradationTier {
    /// Classify a final/baseline ratio against a policy's thresholds.
    pub fn from_ratio(ratio: f64, policy: &ScoringPolicy) -> Self {
        if ratio < policy.severe_threshold {
            Self::SevereDegradation
        } else if ratio < policy.moderate_threshold {
            Self::ModerateDegradation
        } else {
            Self::Sustainable
        }
    }
}

impl fmt::Display for DegradationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sustainable => "Sustainable",
            Self::ModerateDegradation => "Moderate Degradation",
            Self::SevereDegradation => "Severe Degradation",
        };
        f.write_str(label)
    }
}

/// What the severe tier does to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SevereOutcome {
    /// Add the policy's severe penalty like any other tier.
    Penalty,
    /// Zero the score outright, whatever was harvested.
    GameOver,
}

/// Thresholds and magnitudes for one scoring variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub wood_multiplier: f64,
    /// Fraction of baseline below which the forest is severely degraded.
    pub severe_threshold: f64,
    /// Fraction of baseline below which the forest is moderately degraded.
    pub moderate_threshold: f64,
    pub severe_penalty: f64,
    pub moderate_penalty: f64,
    pub sustainable_bonus: f64,
    pub severe_outcome: SevereOutcome,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            wood_multiplier: scoring::WOOD_MULTIPLIER,
            severe_threshold: scoring::SEVERE_THRESHOLD,
            moderate_threshold: scoring::MODERATE_THRESHOLD,
            severe_penalty: scoring::SEVERE_PENALTY,
            moderate_penalty: scoring::MODERATE_PENALTY,
            sustainable_bonus: scoring::SUSTAINABLE_BONUS,
            severe_outcome: SevereOutcome::Penalty,
        }
    }
}

impl ScoringPolicy {
    /// Classroom variant: severe degradation scores zero.
    pub fn game_over() -> Self {
        Self {
            severe_outcome: SevereOutcome::GameOver,
            ..Self::default()
        }
    }

    /// Reject policies that would score silently wrong: non-finite values,
    /// thresholds outside `0 < severe <= moderate <= 1`, a negative
    /// multiplier, a positive penalty or a negative bonus.
    pub fn validate(&self) -> Result<()> {
        let wood_multiplier = ensure_finite("wood_multiplier", self.wood_multiplier)?;
        let severe = ensure_finite("severe_threshold", self.severe_threshold)?;
        let moderate = ensure_finite("moderate_threshold", self.moderate_threshold)?;
        let severe_penalty = ensure_finite("severe_penalty", self.severe_penalty)?;
        let moderate_penalty = ensure_finite("moderate_penalty", self.moderate_penalty)?;
        let bonus = ensure_finite("sustainable_bonus", self.sustainable_bonus)?;

        if !(severe > 0.0 && severe <= moderate && moderate <= 1.0) {
            return Err(ValidationError::InvalidThresholds { severe, moderate });
        }
        if wood_multiplier < 0.0 {
            return Err(ValidationError::NegativeMultiplier {
                multiplier: wood_multiplier,
            });
        }
        if severe_penalty > 0.0 {
            return Err(ValidationError::PositivePenalty {
                field: "severe_penalty",
                value: severe_penalty,
            });
        }
        if moderate_penalty > 0.0 {
            return Err(ValidationError::PositivePenalty {
                field: "moderate_penalty",
                value: moderate_penalty,
            });
        }
        if bonus < 0.0 {
            return Err(ValidationError::NegativeBonus { bonus });
        }
        Ok(())
    }

    /// Signed adjustment for a tier under the penalty variant.
    pub fn adjustment(&self, tier: DegradationTier) -> f64 {
        match tier {
            DegradationTier::Sustainable => self.sustainable_bonus,
            DegradationTier::ModerateDegradation => self.moderate_penalty,
            DegradationTier::SevereDegradation => self.severe_penalty,
        }
    }
}

/// Qualitative band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreRating {
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl ScoreRating {
    pub fn from_score(score: f64) -> Self {
        if score >= rating::EXCELLENT {
            Self::Excellent
        } else if score >= rating::GOOD {
            Self::Good
        } else if score >= rating::FAIR {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }
}

/// Result of one scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_carbon: f64,
    pub pct_baseline: f64,
    /// Cumulative wood product (Mg C/ha).
    pub wood_products: f64,
    pub base_score: f64,
    /// Signed points added to `base_score`. Under [`SevereOutcome::GameOver`]
    /// this cancels the base score exactly.
    pub penalty_or_bonus: f64,
    pub final_score: f64,
    pub status: DegradationTier,
    pub rating: ScoreRating,
}

/// Score a finished run.
pub fn score(
    final_carbon: f64,
    total_harvested: f64,
    baseline_carbon: f64,
    policy: &ScoringPolicy,
) -> Result<ScoreBreakdown> {
    policy.validate()?;
    let final_carbon = ensure_finite("final_carbon", final_carbon)?;
    let total_harvested = ensure_finite("total_harvested", total_harvested)?;
    let baseline_carbon = ensure_finite("baseline_carbon", baseline_carbon)?;

    if baseline_carbon <= 0.0 {
        return Err(ValidationError::InvalidBaseline {
            baseline: baseline_carbon,
        });
    }
    if final_carbon < 0.0 {
        return Err(ValidationError::NegativeCarbon {
            carbon: final_carbon,
        });
    }
    if final_carbon > baseline_carbon {
        return Err(ValidationError::CarbonAboveBaseline {
            carbon: final_carbon,
            baseline: baseline_carbon,
        });
    }
    if total_harvested < 0.0 {
        return Err(ValidationError::NegativeHarvest {
            harvested: total_harvested,
        });
    }

    let ratio = final_carbon / baseline_carbon;
    let status = DegradationTier::from_ratio(ratio, policy);
    let base_score = total_harvested * policy.wood_multiplier;

    let penalty_or_bonus = match (status, policy.severe_outcome) {
        (DegradationTier::SevereDegradation, SevereOutcome::GameOver) => -base_score,
        _ => policy.adjustment(status),
    };
    let final_score = base_score + penalty_or_bonus;

    debug!(
        "Scored {:.1}/{:.1} Mg C/ha with {:.2} product: {} ({:+.0}) -> {:.1}",
        final_carbon, baseline_carbon, total_harvested, status, penalty_or_bonus, final_score
    );

    Ok(ScoreBreakdown {
        final_carbon,
        pct_baseline: ratio * 100.0,
        wood_products: total_harvested,
        base_score,
        penalty_or_bonus,
        final_score,
        status,
        rating: ScoreRating::from_score(final_score),
    })
}
