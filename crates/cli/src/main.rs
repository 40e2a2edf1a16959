//! # txflag
//!
//! Command-line interface for flagging anomalous transaction amounts.

mod catalog;
mod config;
mod cost;
mod input;

use std::fs::File;
use std::path::{Path, PathBuf};

use anomaly::{
    flag_by_method, generate_transactions, FlagReport, Method, TransactionSample,
};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use cost::CostComparison;

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "txflag")]
#[command(about = "Flag anomalous banking transactions", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag anomalous amounts in a CSV or JSON file
    ///
    /// Reported rows are CSV line numbers (header on line 1) or JSON array
    /// positions. Entries without a numeric amount are skipped.
    Detect {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Column name or index holding the amounts
        #[arg(short, long)]
        column: Option<String>,

        /// Detection method (iforest, zscore)
        #[arg(short, long)]
        method: Option<String>,

        /// Expected share of anomalies, in (0, 0.5)
        #[arg(long)]
        contamination: Option<f64>,

        /// Number of isolation trees
        #[arg(long)]
        trees: Option<usize>,

        /// Subsample size per tree
        #[arg(long)]
        max_samples: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic transaction sample and flag it
    Simulate {
        /// Number of transactions
        #[arg(long)]
        count: Option<usize>,

        /// Injected anomalies (default: 5 per 100 transactions)
        #[arg(long)]
        anomalies: Option<usize>,

        /// Expected share of anomalies, in (0, 0.5)
        #[arg(long)]
        contamination: Option<f64>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare storage cost for a data volume
    Cost {
        /// Data volume in TB (1-100)
        #[arg(short, long, default_value = "10")]
        volume: u32,
    },

    /// Show product recommendations per customer
    Recommend {
        /// Customer name
        #[arg(short, long)]
        customer: Option<String>,
    },

    /// Show relative data growth of RDBMS and NoSQL stores by year
    Growth,
}

/// Print the anomaly table and optionally write the full result as JSON.
///
/// `rows[i]` is where transaction `i` came from in the input.
fn write_report(
    report: &FlagReport,
    rows: &[usize],
    method: Method,
    config: &AppConfig,
    output: Option<&Path>,
) -> CliResult<()> {
    let row_of = |index: usize| rows.get(index).copied().unwrap_or(index);

    println!("Detection method: {}", method);
    println!("Contamination: {}", config.forest.contamination);
    println!("Threshold: {:.4}", report.threshold());
    println!("Anomalies found: {} of {}", report.anomaly_count(), report.len());

    if !report.anomalies().is_empty() {
        println!("\nAnomalous transactions:");
        println!("  {:>6}  {:>14}  {:>8}", "row", "amount", "score");
        for t in report.anomalies().iter() {
            println!("  {:>6}  {:>14.2}  {:>8.4}", row_of(t.index), t.amount, t.score);
        }
    }

    if let Some(path) = output {
        let json = serde_json::json!({
            "method": method,
            "seed": config.seed,
            "contamination": config.forest.contamination,
            "threshold": report.threshold(),
            "total_points": report.len(),
            "anomaly_count": report.anomaly_count(),
            "anomaly_indices": report.anomaly_indices(),
            "anomaly_rows": report.anomaly_indices().into_iter().map(row_of).collect::<Vec<_>>(),
            "anomalies": report
                .anomalies()
                .iter()
                .map(|t| serde_json::json!({
                    "index": t.index,
                    "row": row_of(t.index),
                    "amount": t.amount,
                    "score": t.score,
                    "verdict": t.verdict,
                }))
                .collect::<Vec<_>>(),
        });
        let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(&mut file, &json)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("\nResults written to {:?}", path);
    }

    Ok(())
}

fn flag(sample: &TransactionSample, method: Method, config: &AppConfig) -> CliResult<FlagReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    flag_by_method(method, sample, &config.forest, &mut rng).map_err(|e| e.to_string())
}

/// Run detect command
#[allow(clippy::too_many_arguments)]
fn run_detect(
    config: AppConfig,
    input: PathBuf,
    column: Option<String>,
    method: Option<String>,
    contamination: Option<f64>,
    trees: Option<usize>,
    max_samples: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut config = config.with_seed(seed).with_contamination(contamination);
    if let Some(trees) = trees {
        config.forest.n_estimators = trees;
    }
    if let Some(max_samples) = max_samples {
        config.forest.max_samples = max_samples;
    }
    let method = match method {
        Some(m) => m.parse::<Method>().map_err(|e| e.to_string())?,
        None => config.method,
    };

    let loaded = input::load_data(&input, column.as_deref())?;
    println!(
        "Loaded {} transactions from {:?}",
        loaded.len(),
        input.file_name().unwrap_or_default()
    );

    let report = flag(&TransactionSample::new(loaded.values), method, &config)?;
    write_report(&report, &loaded.rows, method, &config, output.as_deref())
}

/// Run simulate command
fn run_simulate(
    config: AppConfig,
    count: Option<usize>,
    anomalies: Option<usize>,
    contamination: Option<f64>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut config = config.with_seed(seed).with_contamination(contamination);
    if let Some(count) = count {
        config.synthetic = config.synthetic.with_count(count);
    }
    if let Some(anomalies) = anomalies {
        config.synthetic = config.synthetic.with_anomaly_count(anomalies);
    }

    // One seeded stream feeds both the sample and the model.
    let mut rng = StdRng::seed_from_u64(config.seed);
    let sample = generate_transactions(&config.synthetic, &mut rng).map_err(|e| e.to_string())?;
    println!(
        "Generated {} transactions ({} injected anomalies, seed {})",
        sample.len(),
        config.synthetic.anomaly_count,
        config.seed
    );

    let report = flag_by_method(config.method, &sample, &config.forest, &mut rng)
        .map_err(|e| e.to_string())?;
    let rows: Vec<usize> = (0..sample.len()).collect();
    write_report(&report, &rows, config.method, &config, output.as_deref())
}

/// Run cost command
fn run_cost(volume: u32) -> CliResult<()> {
    let cost = CostComparison::for_volume(volume)?;
    println!("Total cost for {} TB:", cost.volume_tb);
    println!("  RDBMS: ${}", cost.rdbms);
    println!("  NoSQL: ${}", cost.nosql);
    println!("  Savings with NoSQL: ${}", cost.savings());
    Ok(())
}

/// Run recommend command
fn run_recommend(customer: Option<String>) -> CliResult<()> {
    let found = catalog::recommendations_for(customer.as_deref())?;
    println!("{:<10}  {:<26}  {}", "Customer", "Purchase History", "Recommended Product");
    for r in found {
        println!("{:<10}  {:<26}  {}", r.customer, r.purchase_history, r.recommended);
    }
    Ok(())
}

/// Run growth command
fn run_growth() -> CliResult<()> {
    println!("{:<6}  {:>17}  {:>6}", "Year", "Traditional RDBMS", "NoSQL");
    for point in catalog::GROWTH {
        println!("{:<6}  {:>17.1}  {:>6.1}", point.year, point.rdbms, point.nosql);
    }
    Ok(())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "txflag=info,anomaly_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = AppConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Detect {
            input,
            column,
            method,
            contamination,
            trees,
            max_samples,
            seed,
            output,
        } => run_detect(
            config,
            input,
            column,
            method,
            contamination,
            trees,
            max_samples,
            seed,
            output,
        ),

        Commands::Simulate {
            count,
            anomalies,
            contamination,
            seed,
            output,
        } => run_simulate(config, count, anomalies, contamination, seed, output),

        Commands::Cost { volume } => run_cost(volume),

        Commands::Recommend { customer } => run_recommend(customer),

        Commands::Growth => run_growth(),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
