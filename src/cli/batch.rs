use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

use protsasa::{
    find_pdb_files, load_structure, plot_level, print_totals, Level, SasaAnalysis, SasaError,
    SasaSettings,
};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Folder containing the PDB files to be analyzed
    #[arg(short, long, default_value = "PDB")]
    input: PathBuf,

    /// Folder where the bar charts are written
    #[arg(short, long, default_value = "Results")]
    output: PathBuf,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f64,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = 100)]
    n_points: usize,

    /// Comma-separated levels to aggregate: A(tom), R(esidue), C(hain), M(odel), S(tructure)
    #[arg(short, long, default_value = "A,R,C,M,S")]
    levels: String,

    /// Only keep standard amino acid residues
    #[arg(short, long, default_value_t = false)]
    protein_only: bool,

    /// Number of threads to use for parallel processing
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

/// Outcome of a folder run.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub plots: Vec<PathBuf>,
}

pub(crate) fn run(args: &Args) -> Result<(), SasaError> {
    trace!("{args:?}");
    super::init_thread_pool(args.num_threads);

    let settings =
        super::build_settings(args.probe_radius, args.n_points, &args.levels, args.num_threads)?;
    let summary = process_folder(&args.input, &args.output, &settings, args.protein_only)?;
    info!(
        "Processed {} structure(s), {} failed, {} plot(s) written to {}",
        summary.processed,
        summary.failed,
        summary.plots.len(),
        args.output.display()
    );
    Ok(())
}

/// Compute, print and plot every `*.pdb` file in `input`.
///
/// A file that fails to load or compute is logged and skipped; so is a plot
/// that fails to render.
pub(crate) fn process_folder(
    input: &Path,
    output: &Path,
    settings: &SasaSettings,
    protein_only: bool,
) -> Result<BatchSummary, SasaError> {
    let files = find_pdb_files(input)?;
    if files.is_empty() {
        warn!("No PDB files found in {}", input.display());
    }
    std::fs::create_dir_all(output)?;
    debug!("Results will be saved to {}", output.display());

    let mut summary = BatchSummary::default();
    for file in files {
        let Some(input_file) = file.to_str() else {
            error!("Skipping non UTF-8 path {}", file.display());
            summary.failed += 1;
            continue;
        };
        match process_file(input_file, output, settings, protein_only) {
            Ok(plots) => {
                summary.processed += 1;
                summary.plots.extend(plots);
            }
            Err(e) => {
                error!("{e}");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

fn process_file(
    input_file: &str,
    output: &Path,
    settings: &SasaSettings,
    protein_only: bool,
) -> Result<Vec<PathBuf>, SasaError> {
    let structure = load_structure(input_file, protein_only)?;
    let stem = structure.name.clone();
    let mut analysis = SasaAnalysis::new(structure, settings.clone())?;
    let result = analysis.result()?;

    print!("{}", protein_header(Path::new(input_file)));
    print_totals(result)?;

    let mut plots = Vec::new();
    for level in Level::PLOTTABLE {
        if !result.computes(level) {
            continue;
        }
        match plot_level(result, level, output, &stem) {
            Ok(path) => {
                debug!("Saved {}", path.display());
                plots.push(path);
            }
            Err(e) => error!("Could not plot {level} level of {stem}: {e}"),
        }
    }
    Ok(plots)
}

/// `Protein: <file name>` line printed before each structure's totals.
fn protein_header(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Protein: {file_name}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("test-data")
            .join(name)
    }

    #[test]
    fn bad_files_do_not_stop_the_batch() {
        let output = std::env::temp_dir().join("protsasa-batch-test");
        let settings = SasaSettings::default();
        let summary = process_folder(&fixture("batch"), &output, &settings, false).unwrap();
        // broken.pdb fails to parse; glyser.pdb and two_carbons.pdb still run
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);

        assert_eq!(summary.plots.len(), 6);
        for stem in ["glyser", "two_carbons"] {
            for code in ['A', 'R', 'C'] {
                let plot = output.join(format!("{stem}_{code}_sasa.png"));
                assert!(summary.plots.contains(&plot), "Missing {}", plot.display());
                assert!(plot.is_file());
            }
        }
        assert!(!output.join("broken_A_sasa.png").exists());
    }

    #[test]
    fn only_computed_levels_are_plotted() {
        let output = std::env::temp_dir().join("protsasa-batch-chains");
        let settings = SasaSettings::default().with_levels(&[Level::Chain, Level::Structure]);
        let summary = process_folder(&fixture("batch"), &output, &settings, false).unwrap();
        assert_eq!(summary.plots.len(), 2);
        assert!(summary.plots.iter().all(|p| p.to_string_lossy().ends_with("_C_sasa.png")));
    }

    #[test]
    fn header_keeps_the_extension() {
        assert_eq!(
            protein_header(Path::new("PDB/1abc.pdb")),
            "Protein: 1abc.pdb\n"
        );
    }

    #[test]
    fn missing_folder_is_an_error() {
        let output = std::env::temp_dir().join("protsasa-batch-missing");
        let result = process_folder(
            &fixture("no-such-folder"),
            &output,
            &SasaSettings::default(),
            false,
        );
        assert!(matches!(result, Err(SasaError::Io(_))));
    }
}
