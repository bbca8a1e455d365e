//! ndhist CLI

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ndhist::{Binning, EquispacedBinning, Histogram, HistogramSpec, NonEquispacedBinning};
use ndhist_store::HistogramRecord;
use std::path::{Path, PathBuf};

/// Highest rank `fill` can build from a spec file.
const MAX_RANK: usize = 4;

#[derive(Parser)]
#[command(name = "ndhist")]
#[command(about = "ndhist - multi-dimensional weighted histograms")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a small 2D histogram, fill one entry and print its layout
    Demo {
        /// Histogram file to write the result to (group `demo`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill a histogram described by a JSON spec from a text file of tuples
    Fill {
        /// Histogram spec (JSON: title + axes)
        #[arg(long)]
        spec: PathBuf,

        /// Input data: one coordinate tuple per line, whitespace or comma separated
        #[arg(short, long)]
        input: PathBuf,

        /// Treat the last column of every line as the weight
        #[arg(long)]
        weighted: bool,

        /// Histogram file to store the result in. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Group name inside the output file
        #[arg(long, default_value = "hist")]
        name: String,

        /// Replace an existing group of the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Summarize a stored histogram
    Inspect {
        /// Histogram file
        #[arg(short, long)]
        input: PathBuf,

        /// Group name. May be omitted if the file holds a single group.
        #[arg(long)]
        name: Option<String>,

        /// Output file for the summary (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { output } => cmd_demo(output.as_deref()),
        Commands::Fill { spec, input, weighted, output, name, overwrite } => {
            cmd_fill(&spec, &input, weighted, output.as_deref(), &name, overwrite)
        }
        Commands::Inspect { input, name, output } => {
            cmd_inspect(&input, name.as_deref(), output.as_deref())
        }
    }
}

fn cmd_demo(output: Option<&Path>) -> Result<()> {
    let dim: Binning = EquispacedBinning::linear(0.0, 10.0, 11, "dimension")?.into();
    let dim1: Binning = NonEquispacedBinning::new(&[0.0, 1.0, 2.0], "general")?.into();
    let mut hist = Histogram::with_title([dim, dim1], "demo");

    hist.fill([1.0, 1.0]);

    println!("shape: {:?}", hist.shape());
    println!("labels: {:?}", hist.labels());
    println!("binedges: {:?}", hist.binedges());

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "saving histogram");
        ndhist_store::save(&hist, path, "demo", true)?;
    }
    Ok(())
}

fn cmd_fill(
    spec_path: &Path,
    input: &Path,
    weighted: bool,
    output: Option<&Path>,
    name: &str,
    overwrite: bool,
) -> Result<()> {
    tracing::info!(path = %spec_path.display(), "loading histogram spec");
    let spec = HistogramSpec::from_path(spec_path)
        .with_context(|| format!("invalid histogram spec {}", spec_path.display()))?;

    let record = match spec.rank() {
        1 => fill_from_file::<1>(&spec, input, weighted)?,
        2 => fill_from_file::<2>(&spec, input, weighted)?,
        3 => fill_from_file::<3>(&spec, input, weighted)?,
        4 => fill_from_file::<4>(&spec, input, weighted)?,
        n => bail!("unsupported histogram rank {n} (supported: 1 to {MAX_RANK})"),
    };

    match output {
        Some(path) => {
            ndhist_store::save_record(&record, path, name, overwrite)?;
            tracing::info!(path = %path.display(), group = name, "histogram saved");
            Ok(())
        }
        None => write_json(None, serde_json::to_value(&record)?),
    }
}

fn fill_from_file<const N: usize>(
    spec: &HistogramSpec,
    input: &Path,
    weighted: bool,
) -> Result<HistogramRecord> {
    let mut hist = spec.build::<N>()?;

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut rejected = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (coords, weight) = parse_row::<N>(line, weighted)
            .with_context(|| format!("{}:{}", input.display(), lineno + 1))?;
        if !hist.fill_with_weight(weight, coords) {
            rejected += 1;
            tracing::debug!(line = lineno + 1, "skipping row with NaN coordinate");
        }
    }

    if rejected > 0 {
        tracing::warn!(rejected, "rows with NaN coordinates were not filled");
    }
    tracing::info!(entries = hist.n_entries(), bins = hist.size(), "fill complete");
    Ok(HistogramRecord::from_histogram(&hist))
}

fn parse_row<const N: usize>(line: &str, weighted: bool) -> Result<([f64; N], f64)> {
    let fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("invalid number '{s}'")))
        .collect::<Result<Vec<f64>>>()?;

    let expected = if weighted { N + 1 } else { N };
    if fields.len() != expected {
        bail!("expected {expected} columns, found {}", fields.len());
    }

    let mut coords = [0.0; N];
    coords.copy_from_slice(&fields[..N]);
    let weight = if weighted { fields[N] } else { 1.0 };
    Ok((coords, weight))
}

fn cmd_inspect(input: &Path, name: Option<&str>, output: Option<&Path>) -> Result<()> {
    let name = match name {
        Some(n) => n.to_string(),
        None => {
            let groups = ndhist_store::list(input)?;
            match groups.as_slice() {
                [only] => only.clone(),
                [] => bail!("{} holds no histograms", input.display()),
                _ => bail!("{} holds several histograms, pick one with --name: {:?}", input.display(), groups),
            }
        }
    };

    let record = ndhist_store::load(input, &name)?;
    let sum_w2: f64 = record.squaredweights.iter().sum();

    let summary = serde_json::json!({
        "name": name,
        "title": record.title,
        "ndim": record.ndim,
        "shape": record.shape,
        "labels": record.labels,
        "nentries": record.nentries,
        "sum_weights": record.sum_weights(),
        "sum_squared_weights": sum_w2,
    });
    write_json(output, summary)
}

fn write_json(output: Option<&Path>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
