//! CLI command implementations.

use std::path::Path;

use penetra_bench::metrics::BenchmarkMetrics;
use penetra_bench::runner::BenchmarkRunner;
use penetra_bench::scenarios::{Scenario, ScenarioKind};
use penetra_io::contract::{load_config, PenaltyInput, PenaltyReport};
use penetra_io::validator::validate_input;
use penetra_loss::{CollisionPenalty, CollisionPenaltyConfig, SearchStrategy};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Evaluate the penalty on a batch file.
pub fn evaluate(
    input_path: &str,
    config_path: Option<&str>,
    iteration: Option<u64>,
    output_path: Option<&str>,
) -> CommandResult {
    println!("Penetra Evaluate");
    println!("────────────────");
    println!("Input: {input_path}");

    let input = PenaltyInput::load(input_path)?;
    let overridden = config_path.map(load_config).transpose()?;
    let config = input.resolve_config(overridden);
    tracing::debug!(?config, "resolved penalty config");
    validate_input(&input)?;

    let iteration = iteration.unwrap_or(input.iteration);
    let penalty = CollisionPenalty::new(config)?;
    let output = penalty.total_loss(&input.examples, iteration)?;

    println!("Examples:     {}", output.examples.len());
    println!("Search:       {}", penalty.search_name());
    println!("Iteration:    {iteration}");
    println!("Weight:       {:.3}", output.weight);
    println!("Unweighted:   {:.6e}", output.unweighted());
    println!("Loss:         {:.6e}", output.loss);
    println!("Max depth:    {:.6}m", output.max_depth());
    println!("Penetrating:  {} vertices", output.penetrating_vertices());
    println!();

    let report = PenaltyReport {
        name: penalty.name().to_string(),
        search: penalty.search_name().to_string(),
        output,
    };

    if let Some(path) = output_path {
        report.save(path)?;
        println!("Report written to: {path}");
    } else {
        println!("Report:");
        println!("{}", report.to_json()?);
    }

    Ok(())
}

/// Print the weight schedule as CSV.
pub fn schedule(from: u64, to: u64, step: u64, config_path: Option<&str>) -> CommandResult {
    if step == 0 {
        return Err("--step must be >= 1".into());
    }
    if from > to {
        return Err(format!("--from ({from}) is after --to ({to})").into());
    }

    let config = match config_path {
        Some(path) => load_config(path)?,
        None => CollisionPenaltyConfig::default(),
    };
    let schedule = config.schedule()?;

    println!("Penetra Weight Schedule");
    println!("───────────────────────");
    println!("Start weight: {}", schedule.weight_start());
    println!("Max weight:   {}", schedule.weight_max());
    println!(
        "Ramp:         iterations {}..{}",
        config.start_rampup_iteration,
        schedule.ramp_end()
    );
    println!();

    println!("iteration,weight");
    let mut iteration = from;
    loop {
        println!("{iteration},{}", schedule.weight(iteration));
        match iteration.checked_add(step) {
            Some(next) if next <= to => iteration = next,
            _ => break,
        }
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    search_name: &str,
    output_path: Option<&str>,
) -> CommandResult {
    println!("Penetra Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = ScenarioKind::from_name(scenario_name).ok_or_else(|| {
            format!("Unknown scenario: {scenario_name}. Available: plane_contact, sphere_drape, all")
        })?;
        vec![kind]
    };

    let searches = match search_name {
        "all" => BenchmarkRunner::default_strategies(),
        "brute_force" => vec![SearchStrategy::BruteForce],
        "grid" => vec![SearchStrategy::Grid { cell_size: None }],
        other => {
            return Err(format!("Unknown search: {other}. Available: brute_force, grid, all").into())
        }
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind)?;

        println!(
            "Running: {} ({} examples, {} cloth verts, {} obstacle tris, {} reps)",
            kind.name(),
            scenario.batch.len(),
            scenario.cloth_vertices(),
            scenario.obstacle_faces(),
            scenario.repetitions,
        );

        for &search in &searches {
            let metrics = BenchmarkRunner::run(&scenario, search)
                .map_err(|e| format!("Benchmark failed: {e}"))?;

            println!("  [{}]", metrics.search);
            println!("    Wall time:   {:.3}s", metrics.total_wall_time);
            println!("    Avg eval:    {:.3}ms", metrics.avg_eval_time * 1000.0);
            println!("    Loss:        {:.6e}", metrics.loss);
            println!("    Max depth:   {:.4}m", metrics.max_depth);

            all_metrics.push(metrics);
        }
        println!();
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Validate a batch or config.
pub fn validate(path: &str) -> CommandResult {
    println!("Penetra Validator");
    println!("─────────────────");
    println!();

    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            println!("Validating config: {path}");
            let config = load_config(path)?;
            match config.validate() {
                Ok(()) => println!("✅ Config is valid."),
                Err(e) => println!("❌ Config validation failed: {e}"),
            }
        }
        Some("json") => {
            println!("Validating batch: {path}");
            let input = PenaltyInput::load(path)?;
            match validate_input(&input) {
                Ok(()) => {
                    let vertices: usize =
                        input.examples.iter().map(|e| e.cloth.vertex_count()).sum();
                    println!(
                        "✅ Batch is valid ({} examples, {} cloth verts).",
                        input.examples.len(),
                        vertices
                    );
                }
                Err(e) => println!("❌ Batch validation failed: {e}"),
            }
        }
        _ => println!("Unsupported file format. Use .toml (config) or .json (batch)."),
    }

    Ok(())
}
