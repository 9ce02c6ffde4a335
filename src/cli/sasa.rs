use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use protsasa::{
    breakdown_df, load_structure, print_totals, write_table, Level, SasaAnalysis, SasaError,
    TableFormat,
};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the output file
    #[arg(short, long, default_value_t = String::from("sasa"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, value_enum, default_value = "csv")]
    output_format: TableFormat,

    /// Level of the saved per-entity table: A(tom), R(esidue), C(hain), M(odel), S(tructure)
    #[arg(short = 'L', long = "level", default_value = "R")]
    level: String,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f64,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = 100)]
    n_points: usize,

    /// Comma-separated levels to aggregate and print
    #[arg(short, long, default_value = "A,R,C,M,S")]
    levels: String,

    /// Only keep standard amino acid residues
    #[arg(short, long, default_value_t = false)]
    protein_only: bool,

    /// Number of threads to use for parallel processing
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<(), SasaError> {
    trace!("{args:?}");
    super::init_thread_pool(args.num_threads);

    let level: Level = args.level.parse()?;
    // The saved level is always aggregated, even when missing from --levels
    let levels = format!("{},{}", args.levels, level.code());
    let settings =
        super::build_settings(args.probe_radius, args.n_points, &levels, args.num_threads)?;

    let input_file = args.input.to_string_lossy().into_owned();
    let structure = load_structure(&input_file, args.protein_only)?;
    let mut analysis = SasaAnalysis::new(structure, settings)?;
    let result = analysis.result()?;
    print_totals(result)?;

    let mut df = breakdown_df(result, level)?;
    info!("Per-entity SASA at level {level}\n{df}");

    std::fs::create_dir_all(&args.output)?;
    let output_file = Path::new(&args.output).join(&args.filename);
    let saved = write_table(&mut df, &output_file, args.output_format)?;
    debug!("Results saved to {}", saved.display());
    Ok(())
}
