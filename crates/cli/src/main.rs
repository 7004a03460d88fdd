//! natbreaks CLI - natural breaks classification of sampled values

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use natbreaks_algorithms::classification::{
    classify_samples, BreaksParams, Classification, InitialStrategy, Method, RefineParams,
};
use natbreaks_core::SortedSampleSet;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "natbreaks")]
#[command(author, version, about = "Natural breaks (Jenks) classification", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute class breaks for a table of sampled values
    Breaks {
        /// Input file with sampled values ("-" reads stdin)
        input: PathBuf,
        /// Number of classes
        #[arg(short = 'k', long)]
        classes: usize,
        /// Partitioning method
        #[arg(short, long, value_enum, default_value = "exact")]
        method: MethodArg,
        /// Initial partition for local search
        #[arg(short, long, value_enum, default_value = "quantile")]
        seed: SeedArg,
        /// Maximum refinement passes for local search
        #[arg(short, long, default_value = "10")]
        passes: usize,
        /// Run every refinement pass even after a pass makes no change
        #[arg(long)]
        fixed_passes: bool,
        /// Output labels, comma separated, one per class (default 1..k)
        #[arg(short, long, value_delimiter = ',')]
        labels: Option<Vec<i32>>,
        /// Read only this column; the first record is then a header
        #[arg(short, long)]
        field: Option<String>,
        /// Field delimiter used with --field
        #[arg(short, long, default_value = ",")]
        delimiter: char,
        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Exact,
    LocalSearch,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeedArg {
    Quantile,
    EqualInterval,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable class table
    Text,
    /// Classification record as JSON
    Json,
    /// "lower upper label;" remap string
    Remap,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_input(path: &PathBuf) -> Result<String> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    Ok(text)
}

fn parse_sample(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Finite values parsed from the input, plus how many fields were skipped
fn parse_values(text: &str, field: Option<&str>, delimiter: char) -> Result<(Vec<f64>, usize)> {
    let tokens: Vec<Option<&str>> = match field {
        None => text
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|t| !t.is_empty())
            .map(Some)
            .collect(),
        Some(name) => {
            let mut lines = text.lines().filter(|l| !l.trim().is_empty());
            let header = lines.next().context("Input has no header record")?;
            let column = header
                .split(delimiter)
                .position(|h| h.trim().trim_matches('"') == name)
                .with_context(|| format!("Field '{}' not found in header", name))?;
            lines.map(|line| line.split(delimiter).nth(column)).collect()
        }
    };

    let total = tokens.len();
    let values: Vec<f64> = tokens.into_iter().flatten().filter_map(parse_sample).collect();
    let skipped = total - values.len();
    Ok((values, skipped))
}

fn print_text(result: &Classification) {
    println!("Class  Lower          Upper          Count");
    for (entry, count) in result.table.entries().iter().zip(&result.class_sizes) {
        println!(
            "{:>5}  {:<13.6}  {:<13.6}  {}",
            entry.label, entry.lower, entry.upper, count
        );
    }
    let breaks: Vec<String> = result
        .breaks
        .as_slice()
        .iter()
        .map(|b| format!("{:.6}", b))
        .collect();
    println!("\nBreaks: {}", breaks.join(", "));
    println!("TSSD: {:.6}", result.tssd);
    println!("GVF: {:.4}", result.gvf);
    if let Some(r) = &result.refinement {
        println!(
            "Refinement: {} passes, {} swaps, {}",
            r.passes,
            r.swaps,
            if r.converged { "converged" } else { "pass limit reached" }
        );
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Breaks {
            input,
            classes,
            method,
            seed,
            passes,
            fixed_passes,
            labels,
            field,
            delimiter,
            format,
        } => {
            let text = read_input(&input)?;
            let (values, skipped) = parse_values(&text, field.as_deref(), delimiter)?;
            if skipped > 0 {
                warn!("Skipped {} empty or non-numeric fields", skipped);
            }
            info!("{} samples added to create breaks", values.len());

            let samples = SortedSampleSet::new(values).context("Invalid sample set")?;
            let params = BreaksParams {
                class_count: classes,
                method: match method {
                    MethodArg::Exact => Method::Exact,
                    MethodArg::LocalSearch => Method::LocalSearch {
                        seed: match seed {
                            SeedArg::Quantile => InitialStrategy::Quantile,
                            SeedArg::EqualInterval => InitialStrategy::EqualInterval,
                        },
                    },
                },
                refine: RefineParams {
                    max_passes: passes,
                    stop_on_convergence: !fixed_passes,
                },
                output_labels: labels,
            };

            let start = Instant::now();
            let pb = spinner("Computing breaks...");
            let result = classify_samples(&samples, &params);
            pb.finish_and_clear();
            let result = result.context("Classification failed")?;
            info!("Classified into {} classes in {:.2?}", classes, start.elapsed());

            match format {
                OutputFormat::Text => print_text(&result),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Remap => println!("{}", result.table.remap_string()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_tokens() {
        let (values, skipped) = parse_values("1 2,3;4\n\nnan 5 x", None, ',').unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_parse_field() {
        let text = "id,elev,slope\n1,1200.5,3\n2,,4\n3,1310,5\n";
        let (values, skipped) = parse_values(text, Some("elev"), ',').unwrap();
        assert_eq!(values, vec![1200.5, 1310.0]);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_missing_field() {
        assert!(parse_values("a,b\n1,2\n", Some("c"), ',').is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "natbreaks", "breaks", "values.txt", "-k", "4", "--method", "local-search",
            "--seed", "equal-interval", "--labels", "10,20,30,40",
        ])
        .unwrap();
        let Commands::Breaks { classes, labels, .. } = cli.command;
        assert_eq!(classes, 4);
        assert_eq!(labels, Some(vec![10, 20, 30, 40]));
    }
}
