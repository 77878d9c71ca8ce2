use std::process;

use liminal_bench::cli::{self, Command};
use liminal_bench::report;
use liminal_bench::routes;
use liminal_bench::runner::WalkRunner;
use liminal_core::MazeConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let options = match cli::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            eprintln!("{}", cli::USAGE);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", cli::USAGE);
            process::exit(1);
        }
    };

    let mut config = match &options.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Cannot read {}: {e}", path.display());
                process::exit(1);
            });
            MazeConfig::from_ron_str(&text).unwrap_or_else(|e| {
                eprintln!("Bad config {}: {e}", path.display());
                process::exit(1);
            })
        }
        None => MazeConfig::default(),
    };
    config.debug_overlays |= options.overlays;

    let runner = WalkRunner::new(
        config.clone(),
        options.tick_count,
        options.step,
        options.seed,
    )
    .unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let mut results = Vec::new();
    for route in &routes::standard_routes(&config) {
        match runner.run_route(route) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Route '{}' failed: {e}", route.name);
                process::exit(1);
            }
        }
    }

    // Print markdown summary
    println!("\n## Walk Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = options.output_path {
        let baseline = report::Baseline {
            timestamp: format!("walk-{}", process::id()),
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            eprintln!("Cannot write {}: {e}", path.display());
            process::exit(1);
        }
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline
    if let Some(ref path) = options.baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, options.regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, options.regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Walk benchmark complete.");
}
