use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

mod diagnostics;
mod display;
mod model;
mod render;
mod results;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "speedup-report")]
#[command(about = "Thread-scaling charts and summary from benchmark results", long_about = None)]
struct Cli {
    /// Benchmark results CSV (Threads, Runtime(s), Speedup).
    #[arg(long, default_value = "results.csv")]
    input: PathBuf,

    /// Workload name shown in chart titles.
    #[arg(long, default_value = "Min-Max-Mean Computation")]
    workload: String,

    /// Do not open the speedup chart in an image viewer.
    #[arg(long)]
    no_show: bool,

    /// Also print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_tracing();

    // 1) Load results; a missing file is the one failure with its own message.
    let table = match results::load_results_file(&cli.input) {
        Ok(t) => t,
        Err(err) if results::is_missing_input(&err) => {
            debug!("{:#}", err);
            println!(
                "Error: {} not found. Please run the benchmark first.",
                cli.input.display()
            );
            std::process::exit(1);
        }
        Err(err) => return Err(err),
    };
    println!("Data loaded successfully:");
    println!("{}", render::preview_table(&table, render::PREVIEW_ROWS));

    for note in results::inspect_table(&table) {
        warn!("{}", note);
    }

    // 2) Aggregate before drawing so a bad table leaves no partial output.
    let summary = model::build_summary(&table)?;

    // 3) Charts.
    render::render_combined(&table, &cli.workload, Path::new(render::COMBINED_FILE))?;
    println!(
        "Combined performance analysis saved as '{}'",
        render::COMBINED_FILE
    );
    render::render_runtime(&table, &cli.workload, Path::new(render::RUNTIME_FILE))?;
    println!("Runtime plot saved as '{}'", render::RUNTIME_FILE);
    render::render_speedup(&table, &cli.workload, Path::new(render::SPEEDUP_FILE))?;
    println!("Speedup plot saved as '{}'", render::SPEEDUP_FILE);

    // 4) Summary.
    println!("\nPerformance Summary:");
    for line in render::summary_lines(&summary) {
        println!("{}", line);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    // 5) Viewer (blocks until closed).
    if !cli.no_show {
        display::show_image(Path::new(render::SPEEDUP_FILE))?;
    }

    Ok(())
}
