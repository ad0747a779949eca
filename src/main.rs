//! Edge-Bench - Streaming IDS Classifier Benchmark
//!
//! One generic prequential runner, four online classifier variants. Pick the
//! variant on the command line; dataset, output path, check interval, and
//! seed come from environment variables with sensible defaults.

mod logic;
pub mod constants;

use logic::config::{ModelKind, RunConfig};
use logic::{models, runner};

fn usage() -> ! {
    eprintln!("Usage: edge-bench <tree|forest|mlp|logreg> [dataset]");
    eprintln!();
    eprintln!("Variants:");
    eprintln!("  tree     Hoeffding adaptive tree (edge schema: CPU + battery columns)");
    eprintln!("  forest   Adaptive random forest (10 members)");
    eprintln!("  mlp      Online multilayer perceptron");
    eprintln!("  logreg   Logistic regression pipeline");
    eprintln!();
    eprintln!("Environment: BENCH_DATASET, BENCH_LOG_FILE, BENCH_CHECK_INTERVAL, BENCH_SEED");
    std::process::exit(2);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let args: Vec<String> = std::env::args().collect();
    let kind = match args.get(1).map(|s| ModelKind::parse(s)) {
        Some(Some(kind)) => kind,
        _ => usage(),
    };

    let mut config = RunConfig::from_env(kind);
    if let Some(dataset) = args.get(2) {
        config.dataset = dataset.into();
    }

    let mut model = models::build(kind, config.seed);
    match runner::run(&config, model.as_mut()) {
        Ok(summary) => {
            log::info!(
                "Saved to {} ({} checkpoint rows)",
                summary.output,
                summary.rows_written
            );
        }
        Err(e) => {
            log::error!("Benchmark failed: {}", e);
            std::process::exit(1);
        }
    }
}
