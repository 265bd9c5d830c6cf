//! `tubeline`: analyze a STEP/IGES/DXF tube file and, optionally, price it.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tubeline_pricing::{Material, PricingInputs};

/// Inputs larger than this are rejected before being read into memory
/// (§4.1's decoder-adapter boundary).
const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "tubeline", version, about = "Bent tube geometry analyzer and quote calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a CAD file and report centerline length, bends, and cuts.
    Analyze(AnalyzeArgs),
    /// Analyze a file and immediately price the result.
    Quote(QuoteArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to a .step/.stp/.iges/.igs/.dxf file.
    file: PathBuf,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    #[command(flatten)]
    analyze: AnalyzeArgs,

    /// Material price per pound.
    #[arg(long, default_value_t = 4.75)]
    price_per_lb: f64,

    /// Wire gauge, e.g. "14 AWG".
    #[arg(long, default_value = "14 AWG")]
    gauge: String,

    /// Number of parts to quote.
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => run_analyze(&args),
        Command::Quote(args) => run_quote(&args),
    }
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let result = analyze_file(&args.file)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_quote(args: &QuoteArgs) -> Result<()> {
    let result = analyze_file(&args.analyze.file)?;
    let inputs = PricingInputs {
        material: Material {
            id: "custom".to_string(),
            name: "Custom material".to_string(),
            price_per_lb: args.price_per_lb,
        },
        quantity: args.quantity,
        gauge: args.gauge.clone(),
        length_in: result.total_length_mm / 25.4,
        bends: result.estimated_bends,
        cuts: result.estimated_cuts,
    };
    let quote = tubeline_pricing::quote(&inputs);
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn analyze_file(path: &PathBuf) -> Result<tubeline_analysis::AnalysisResult> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("input")
        .to_string();
    let size = fs::metadata(path)
        .with_context(|| format!("reading metadata for {}", path.display()))?
        .len();
    anyhow::ensure!(
        size <= MAX_INPUT_BYTES,
        "{} is {size} bytes, over the {MAX_INPUT_BYTES} byte limit",
        path.display()
    );
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    log::info!("analyzing {} ({} bytes)", path.display(), bytes.len());
    tubeline_analysis::analyze(&filename, &bytes).map_err(anyhow::Error::from)
}
