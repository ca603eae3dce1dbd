use std::collections::VecDeque;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;

use fas::{eliminate, extract_violators, load_graph, write_outputs, FasError, Order};

#[derive(Parser)]
#[command(about = "Approximate minimum feedback arc set (Eades-Lin-Smyth / Simpson-Srinivasan-Thomo)")]
struct Cli {
    /// Input edge list (target,source,timestamp,weight)
    input: PathBuf,

    /// Suffix used to name output files: dag_<postfix>.csv, partial_<postfix>.csv
    postfix: String,

    /// Directory to write output files into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Use per-destination weight-normalized scoring instead of plain in/out degree
    #[arg(long)]
    weighted: bool,

    /// Print per-vertex diagnostics to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let t0 = Instant::now();

    let mut graph = load_graph(&cli.input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", cli.input.display(), e);
        process::exit(exit_code(&e));
    });

    // DegenerateGraph (n = 0, or every vertex isolated) recovers to an empty
    // order and empty DAG with no violators (§7's Recovery column), but it
    // is still a non-zero-exit condition per §6's CLI contract — the empty
    // outputs are written before exiting, not suppressed.
    let (order, dag_arcs, violator_count, total_arc_count, violator_fraction, violator_weight_fraction, degenerate) =
        match eliminate(&mut graph, cli.weighted) {
            Ok(result) => {
                let order = Order::assemble(result.s_left, result.s_right, graph.vertex_count());
                let report = extract_violators(&graph, &order).unwrap_or_else(|e| {
                    eprintln!("Error extracting violators: {e}");
                    process::exit(exit_code(&e));
                });
                let dag_arcs = report.dag_arcs;
                (
                    order,
                    dag_arcs,
                    report.violator_count,
                    report.total_arc_count,
                    report.violator_fraction,
                    report.violator_weight_fraction,
                    false,
                )
            }
            Err(FasError::DegenerateGraph) => {
                let order = Order::assemble(Vec::new(), VecDeque::new(), 0);
                (order, Vec::new(), 0, 0, 0.0, 0.0, true)
            }
            Err(e) => {
                eprintln!("Error during elimination: {e}");
                process::exit(exit_code(&e));
            }
        };

    let (dag_path, partial_path) = write_outputs(&graph, &order, &dag_arcs, &cli.out_dir, &cli.postfix)
        .unwrap_or_else(|e| {
            eprintln!("Error writing output: {e}");
            process::exit(exit_code(&e));
        });

    if degenerate {
        eprintln!("Error: degenerate graph (no vertices with incident arcs)");
        process::exit(exit_code(&FasError::DegenerateGraph));
    }

    let elapsed = t0.elapsed();

    let mode = if cli.weighted { "weighted" } else { "unweighted" };
    println!("Mode:              {mode}");
    println!("Vertices:          {}", graph.vertex_count());
    println!("Arcs:              {total_arc_count}");
    println!("Violators:         {violator_count} ({violator_fraction:.4} of arcs)");
    println!("Violator weight:   {violator_weight_fraction:.4} of total weight mass");
    println!("DAG file:          {}", dag_path.display());
    println!("Partial order:     {}", partial_path.display());
    if cli.verbose {
        for &v in order.sequence() {
            eprintln!("  {:>4}  {}", order.position(v), graph.key(v));
        }
    }
    println!("Time:              {:.3}s", elapsed.as_secs_f64());
}

/// Maps a [`FasError`] to a process exit code: malformed/IO input is a
/// distinct class of failure from an internal algorithmic inconsistency.
fn exit_code(err: &FasError) -> i32 {
    match err {
        FasError::DegenerateGraph => 2,
        FasError::DuplicateVertexKey(_) => 2,
        FasError::NegativeWeight(..) => 2,
        FasError::MalformedRow(..) => 2,
        FasError::Csv(_) | FasError::Io(_) => 3,
        FasError::InternalInconsistency(_) => 70,
    }
}
