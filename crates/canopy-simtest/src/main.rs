//! Canopy Headless Simulation Harness
//!
//! Runs the canonical logging strategies against every scenario preset and
//! checks the documented outcomes. Runs entirely in-process. No UI, no
//! rendering.
//!
//! Usage:
//!   cargo run -p canopy-simtest
//!   cargo run -p canopy-simtest -- --verbose
//!   RUST_LOG=canopy_logic=debug cargo run -p canopy-simtest

use canopy_logic::assessment::evaluate;
use canopy_logic::constants::{BASELINE_CARBON, STEP_YEARS};
use canopy_logic::operations::LoggingOperation;
use canopy_logic::recovery::RecoveryModel;
use canopy_logic::scenario::{presets, IntensityLevel, Region, ScenarioConfig};
use canopy_logic::scoring::{DegradationTier, ScoringPolicy};
use canopy_logic::simulation::{simulate, SimulationConfig};
use canopy_logic::ValidationError;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ── Strategy fixture ────────────────────────────────────────────────────
const STRATEGIES_JSON: &str = include_str!("../../../data/strategies.json");

#[derive(Debug, Deserialize)]
struct Strategy {
    name: String,
    operations: Vec<LoggingOperation>,
    expected_tier: DegradationTier,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Canopy Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Canonical strategies
    results.extend(validate_strategies(verbose));

    // 2. Scenario presets
    results.extend(validate_presets(verbose));

    // 3. Recovery model
    results.extend(validate_recovery(verbose));

    // 4. Intensity sweep per region
    results.extend(validate_region_sweep(verbose));

    // 5. Input rejection
    results.extend(validate_rejections(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Canonical Strategies ─────────────────────────────────────────────

fn validate_strategies(verbose: bool) -> Vec<TestResult> {
    println!("--- Canonical Strategies ---");
    let mut results = Vec::new();

    let strategies: Vec<Strategy> = match serde_json::from_str(STRATEGIES_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "strategies_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "strategies_not_empty".into(),
        passed: !strategies.is_empty(),
        detail: format!("{} strategies loaded", strategies.len()),
    });

    let config = SimulationConfig::default();
    let policy = ScoringPolicy::default();

    for scenario in presets() {
        for strategy in &strategies {
            let name = format!("{}_{}", strategy.name, scenario.id);
            match evaluate(&scenario, &strategy.operations, &config, &policy) {
                Ok(a) => {
                    if verbose {
                        println!(
                            "  [{}] {:<20} final {:>6.1} Mg C/ha ({:>5.1}%), product {:>5.1}, score {:>6.1} — {}",
                            scenario.name,
                            strategy.name,
                            a.score.final_carbon,
                            a.score.pct_baseline,
                            a.score.wood_products,
                            a.score.final_score,
                            a.score.status
                        );
                    }
                    results.push(TestResult {
                        name,
                        passed: a.score.status == strategy.expected_tier,
                        detail: format!(
                            "{} (expected {}), score {:.1}",
                            a.score.status, strategy.expected_tier, a.score.final_score
                        ),
                    });
                }
                Err(e) => results.push(TestResult {
                    name,
                    passed: false,
                    detail: format!("rejected: {}", e),
                }),
            }
        }
    }

    // README optimum: one 25% cut at year 10 scores 70 with the bonus.
    let single = [LoggingOperation::new(10, 0.25)];
    match evaluate(&ScenarioConfig::default(), &single, &config, &policy) {
        Ok(a) => results.push(TestResult {
            name: "single_cut_score".into(),
            passed: (a.score.final_score - 70.0).abs() < 1e-6,
            detail: format!("score {:.2}", a.score.final_score),
        }),
        Err(e) => results.push(TestResult {
            name: "single_cut_score".into(),
            passed: false,
            detail: format!("rejected: {}", e),
        }),
    }

    results
}

// ── 2. Scenario Presets ─────────────────────────────────────────────────

fn validate_presets(verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario Presets ---");
    let mut results = Vec::new();
    let all = presets();

    results.push(TestResult {
        name: "preset_count".into(),
        passed: all.len() == Region::ALL.len(),
        detail: format!("{} presets", all.len()),
    });

    for s in &all {
        if verbose {
            println!(
                "  {} ({}): levels {:.0}/{:.0}/{:.0}%",
                s.name,
                s.region,
                s.intensity_levels.low * 100.0,
                s.intensity_levels.medium * 100.0,
                s.intensity_levels.high * 100.0
            );
        }
        results.push(TestResult {
            name: format!("preset_{}_baseline", s.id),
            passed: s.baseline_carbon == BASELINE_CARBON,
            detail: format!("{} baseline {:.0}", s.name, s.baseline_carbon),
        });
        results.push(TestResult {
            name: format!("preset_{}_levels", s.id),
            passed: s.intensity_levels.is_ordered(),
            detail: format!("{} levels ordered within [0, 1]", s.name),
        });
    }

    results
}

// ── 3. Recovery Model ───────────────────────────────────────────────────

fn validate_recovery(verbose: bool) -> Vec<TestResult> {
    println!("--- Recovery Model ---");
    let mut results = Vec::new();

    let model = match RecoveryModel::for_scenario(
        &ScenarioConfig::default(),
        &SimulationConfig::default(),
    ) {
        Ok(m) => m,
        Err(e) => {
            results.push(TestResult {
                name: "recovery_model".into(),
                passed: false,
                detail: format!("default model rejected: {}", e),
            });
            return results;
        }
    };

    // Recovery curve after a 25% cut
    let mut carbon = BASELINE_CARBON * 0.75;
    let mut monotone = true;
    for step in 1..=20 {
        let next = model.step(carbon);
        if next < carbon || next > BASELINE_CARBON {
            monotone = false;
        }
        carbon = next;
        if verbose && step % 4 == 0 {
            println!(
                "  +{:>3} yr: {:.1} Mg C/ha ({:.1}%)",
                step * STEP_YEARS,
                carbon,
                carbon / BASELINE_CARBON * 100.0
            );
        }
    }
    results.push(TestResult {
        name: "recovery_monotone".into(),
        passed: monotone,
        detail: "stock rises toward baseline without overshoot".into(),
    });
    results.push(TestResult {
        name: "recovery_asymptotic".into(),
        passed: carbon < BASELINE_CARBON,
        detail: format!("{:.4} after 100 years", carbon),
    });

    let zero = model.recover(225.0, 0);
    results.push(TestResult {
        name: "recovery_zero_years".into(),
        passed: zero == Ok(225.0),
        detail: format!("{:?}", zero),
    });

    let cut = model.apply_logging(BASELINE_CARBON, 0.25);
    results.push(TestResult {
        name: "logging_product_fraction".into(),
        passed: cut.as_ref().is_ok_and(|o| (o.harvested - 30.0).abs() < 1e-9),
        detail: format!("{:?}", cut),
    });

    results
}

// ── 4. Region Sweep ─────────────────────────────────────────────────────

fn validate_region_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Region Intensity Sweep ---");
    let mut results = Vec::new();
    let config = SimulationConfig::default();

    for region in Region::ALL {
        let scenario = region.scenario();
        let mut finals = Vec::new();
        for level in IntensityLevel::ALL {
            let plan = [
                LoggingOperation::at_level(20, &scenario, level),
                LoggingOperation::at_level(60, &scenario, level),
            ];
            match simulate(&scenario, &plan, &config) {
                Ok(sim) => {
                    if verbose {
                        println!(
                            "  {} {:?}: final {:.1}, min {:.1}, product {:.1}",
                            scenario.name,
                            level,
                            sim.final_carbon(),
                            sim.min_carbon(),
                            sim.total_harvested
                        );
                    }
                    finals.push(sim.final_carbon());
                }
                Err(e) => results.push(TestResult {
                    name: format!("sweep_{}_{:?}", scenario.id, level),
                    passed: false,
                    detail: format!("rejected: {}", e),
                }),
            }
        }
        let ordered = finals.windows(2).all(|w| w[1] <= w[0]);
        results.push(TestResult {
            name: format!("sweep_{}_ordered", scenario.id),
            passed: finals.len() == IntensityLevel::ALL.len() && ordered,
            detail: format!("{} heavier levels leave less carbon", scenario.name),
        });
    }

    results
}

// ── 5. Input Rejection ──────────────────────────────────────────────────

fn validate_rejections(verbose: bool) -> Vec<TestResult> {
    println!("--- Input Rejection ---");
    let scenario = ScenarioConfig::default();
    let config = SimulationConfig::default();
    let mut results = Vec::new();

    let cases: [(&str, LoggingOperation); 3] = [
        ("reject_off_step_year", LoggingOperation::new(12, 0.1)),
        ("reject_beyond_horizon", LoggingOperation::new(110, 0.1)),
        ("reject_over_full_cut", LoggingOperation::new(20, 1.25)),
    ];

    for (name, op) in cases {
        let outcome = simulate(&scenario, &[op], &config);
        if verbose {
            if let Err(e) = &outcome {
                println!("  {:?} -> {}", op, e);
            }
        }
        results.push(TestResult {
            name: name.into(),
            passed: matches!(
                outcome,
                Err(ValidationError::YearNotOnStep { .. })
                    | Err(ValidationError::YearOutOfRange { .. })
                    | Err(ValidationError::IntensityOutOfRange { .. })
            ),
            detail: match outcome {
                Ok(_) => "accepted".into(),
                Err(e) => e.to_string(),
            },
        });
    }

    // A parked slider slot is absent, whatever year it sits on.
    let parked = [
        LoggingOperation::new(10, 0.25),
        LoggingOperation::new(12, 0.0),
    ];
    let outcome = simulate(&scenario, &parked, &config);
    results.push(TestResult {
        name: "accept_unused_off_grid_slot".into(),
        passed: outcome.as_ref().is_ok_and(|sim| sim.cuts.len() == 1),
        detail: match &outcome {
            Ok(sim) => format!("{} cut applied", sim.cuts.len()),
            Err(e) => format!("rejected: {}", e),
        },
    });

    let bad_policy = ScoringPolicy {
        severe_threshold: 0.97,
        moderate_threshold: 0.90,
        ..ScoringPolicy::default()
    };
    let outcome = evaluate(&scenario, &[], &config, &bad_policy);
    if verbose {
        if let Err(e) = &outcome {
            println!("  swapped thresholds -> {}", e);
        }
    }
    results.push(TestResult {
        name: "reject_swapped_thresholds".into(),
        passed: matches!(outcome, Err(ValidationError::InvalidThresholds { .. })),
        detail: match outcome {
            Ok(_) => "accepted".into(),
            Err(e) => e.to_string(),
        },
    });

    results
}
