use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use oxalis_dtw::{CostMatrices, CostMatrix, Dtw, PathStep, PointDistance, Series, WarpPath};

#[derive(Parser)]
#[command(name = "oxalis")]
#[command(about = "Dynamic time warping alignment of sampled series")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pointwise distance: "abs" or "squared"
    #[arg(long, default_value = "abs", global = true)]
    distance: String,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Align two series loaded from newline-separated numeric files
    Align {
        /// First input series, one sample per line
        file_a: PathBuf,

        /// Second input series, one sample per line
        file_b: PathBuf,

        /// Write the accumulated-cost matrix as CSV
        #[arg(long)]
        dump_accumulated: Option<PathBuf>,

        /// Write the local-cost matrix as CSV
        #[arg(long)]
        dump_local: Option<PathBuf>,
    },

    /// Align synthetic sine and cosine sample series
    Demo {
        /// Number of samples per series
        #[arg(long, default_value_t = 64)]
        len: usize,

        /// Write the accumulated-cost matrix as CSV
        #[arg(long)]
        dump_accumulated: Option<PathBuf>,

        /// Write the local-cost matrix as CSV
        #[arg(long)]
        dump_local: Option<PathBuf>,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct AlignOutput {
    len_a: usize,
    len_b: usize,
    matrix_rows: usize,
    matrix_cols: usize,
    min_distance: f64,
    path_len: usize,
    /// Measured path cells as (row, col, accumulated cost), end first.
    /// The terminal origin anchor is omitted; it carries no cost.
    path: Vec<(usize, usize, f64)>,
}

fn parse_distance(s: &str) -> Result<PointDistance> {
    match s {
        "abs" => Ok(PointDistance::AbsoluteDifference),
        "squared" => Ok(PointDistance::SquaredDifference),
        other => anyhow::bail!("unknown distance: {other} (expected abs or squared)"),
    }
}

fn read_series(path: &Path) -> Result<Series> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let values: Vec<f64> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.parse::<f64>()
                .with_context(|| format!("invalid sample {l:?} in {}", path.display()))
        })
        .collect::<Result<_>>()?;
    Series::new(values).with_context(|| format!("invalid series in {}", path.display()))
}

fn write_matrix_csv(path: &Path, matrix: &CostMatrix) -> Result<()> {
    let mut out = String::new();
    for r in 0..matrix.rows() {
        let cells: Vec<String> = matrix.row(r).iter().map(|v| v.to_string()).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "matrix written");
    Ok(())
}

fn align_and_report(
    dtw: Dtw,
    a: &Series,
    b: &Series,
    dump_accumulated: Option<&Path>,
    dump_local: Option<&Path>,
) -> Result<()> {
    let CostMatrices {
        local,
        accumulated,
        distance,
    } = dtw
        .cost_matrices(a.as_view(), b.as_view())
        .context("cost-matrix construction failed")?;
    info!(
        rows = accumulated.rows(),
        cols = accumulated.cols(),
        %distance,
        "cost matrices built"
    );

    let path = WarpPath::backtrack(&accumulated).context("backtracking failed")?;
    info!(path_len = path.len(), "warp path recovered");

    if let Some(p) = dump_accumulated {
        write_matrix_csv(p, &accumulated)?;
    }
    if let Some(p) = dump_local {
        write_matrix_csv(p, &local)?;
    }

    let output = AlignOutput {
        len_a: a.len(),
        len_b: b.len(),
        matrix_rows: accumulated.rows(),
        matrix_cols: accumulated.cols(),
        min_distance: distance.value(),
        path_len: path.len(),
        path: path
            .steps()
            .iter()
            .filter_map(|step| match *step {
                PathStep::Measured { row, col, cost } => Some((row, col, cost)),
                PathStep::OriginAnchor => None,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dtw = Dtw::with_distance(parse_distance(&cli.distance)?);

    match cli.command {
        Command::Align {
            file_a,
            file_b,
            dump_accumulated,
            dump_local,
        } => {
            let a = read_series(&file_a)?;
            let b = read_series(&file_b)?;
            info!(len_a = a.len(), len_b = b.len(), "series loaded");
            align_and_report(
                dtw,
                &a,
                &b,
                dump_accumulated.as_deref(),
                dump_local.as_deref(),
            )?;
        }

        Command::Demo {
            len,
            dump_accumulated,
            dump_local,
        } => {
            let a = Series::new((0..len).map(|i| (i as f64 * 0.1).sin()).collect())
                .context("sine series generation failed")?;
            let b = Series::new((0..len).map(|i| (i as f64 * 0.1).cos()).collect())
                .context("cosine series generation failed")?;
            info!(len, "synthetic series generated");
            align_and_report(
                dtw,
                &a,
                &b,
                dump_accumulated.as_deref(),
                dump_local.as_deref(),
            )?;
        }
    }

    Ok(())
}
