//! Penetra CLI: penalty evaluation, weight schedules, and benchmarking.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "penetra")]
#[command(version, about = "Penetra: collision penalty for learned cloth simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the penalty on a batch file.
    Evaluate {
        /// Path to the batch (JSON).
        #[arg(short, long)]
        input: String,

        /// Penalty config (TOML). Overrides any config embedded in the batch.
        #[arg(short, long)]
        config: Option<String>,

        /// Training iteration. Overrides the batch's own iteration.
        #[arg(long)]
        iteration: Option<u64>,

        /// Write the JSON report here instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the loss weight over a range of iterations.
    Schedule {
        /// First iteration.
        #[arg(long, default_value_t = 0)]
        from: u64,

        /// Last iteration (inclusive).
        #[arg(long, default_value_t = 200_000)]
        to: u64,

        /// Iteration step.
        #[arg(long, default_value_t = 25_000)]
        step: u64,

        /// Penalty config (TOML).
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (plane_contact, sphere_drape, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Which search to time (brute_force, grid, all).
        #[arg(long, default_value = "all")]
        search: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a batch (.json) or penalty config (.toml).
    Validate {
        /// Path to batch or config file.
        path: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            input,
            config,
            iteration,
            output,
        } => commands::evaluate(&input, config.as_deref(), iteration, output.as_deref()),
        Commands::Schedule {
            from,
            to,
            step,
            config,
        } => commands::schedule(from, to, step, config.as_deref()),
        Commands::Benchmark {
            scenario,
            search,
            output,
        } => commands::benchmark(&scenario, &search, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
