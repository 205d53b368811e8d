//! Policy constants — equilibrium stock, time grid, recovery and scoring.
//!
//! Every number the engine or the scoring policy depends on lives here so
//! that [`SimulationConfig`](crate::simulation::SimulationConfig) and
//! [`ScoringPolicy`](crate::scoring::ScoringPolicy) defaults stay in one place.

/// Equilibrium aboveground carbon of undisturbed old-growth forest (Mg C/ha).
pub const BASELINE_CARBON: f64 = 300.0;

/// Length of one recovery step in years.
pub const STEP_YEARS: u32 = 5;

/// Planning horizon in years.
pub const HORIZON_YEARS: u32 = 100;

/// Fraction of the remaining deficit recovered per step.
pub const RECOVERY_RATE: f64 = 0.12;

/// Share of removed carbon that ends up as long-lived wood product.
/// The rest is slash and processing loss.
pub const PRODUCT_FRACTION: f64 = 0.40;

pub mod scoring {
    /// Points per Mg C of wood product.
    pub const WOOD_MULTIPLIER: f64 = 2.0;

    /// Below this fraction of baseline the forest is severely degraded.
    pub const SEVERE_THRESHOLD: f64 = 0.90;
    /// Below this fraction of baseline the forest is moderately degraded.
    pub const MODERATE_THRESHOLD: f64 = 0.97;

    pub const SEVERE_PENALTY: f64 = -80.0;
    pub const MODERATE_PENALTY: f64 = -40.0;
    pub const SUSTAINABLE_BONUS: f64 = 10.0;
}

pub mod rating {
    pub const EXCELLENT: f64 = 50.0;
    pub const GOOD: f64 = 40.0;
    pub const FAIR: f64 = 30.0;
}
