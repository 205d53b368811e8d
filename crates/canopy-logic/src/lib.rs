//! Pure simulation logic for Canopy.
//!
//! This crate contains the carbon-recovery model, the logging simulation,
//! and the sustainability scoring policy. Functions take plain data and
//! return results, making them unit-testable and usable from any front end
//! (web UI, native CLI, the headless simtest harness).
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assessment`] | One-call simulate → score pipeline |
//! | [`constants`] | Policy constants (baseline, step, thresholds, multipliers) |
//! | [`error`] | Input validation errors |
//! | [`operations`] | Logging operations, validation, per-year scheduling |
//! | [`recovery`] | Relaxation-to-equilibrium recovery and logging removal |
//! | [`scenario`] | Regional scenario presets and intensity levels |
//! | [`scoring`] | Degradation tiers, bonus/penalty policy, score breakdown |
//! | [`simulation`] | Time-stepped trajectory over the planning horizon |
//!
//! ```
//! use canopy_logic::assessment::evaluate;
//! use canopy_logic::operations::LoggingOperation;
//! use canopy_logic::scenario::Region;
//! use canopy_logic::scoring::{DegradationTier, ScoringPolicy};
//! use canopy_logic::simulation::SimulationConfig;
//!
//! let scenario = Region::CentralAmazon.scenario();
//! let plan = [LoggingOperation::new(10, 0.25)];
//! let result = evaluate(
//!     &scenario,
//!     &plan,
//!     &SimulationConfig::default(),
//!     &ScoringPolicy::default(),
//! )
//! .unwrap();
//! assert_eq!(result.score.status, DegradationTier::Sustainable);
//! ```

pub mod assessment;
pub mod constants;
pub mod error;
pub mod operations;
pub mod recovery;
pub mod scenario;
pub mod scoring;
pub mod simulation;

pub use error::{Result, ValidationError};
