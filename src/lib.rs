#![doc = include_str!("../README.md")]

//! # protsasa Library
//!
//! Solvent accessible surface area of macromolecular structures with the
//! Shrake-Rupley algorithm. Per-atom values are summed per residue, chain,
//! model and structure; results can be printed, exported as Polars
//! DataFrames, or drawn as bar charts.

mod aggregate;
mod analysis;
mod engine;
mod error;
mod grid;
mod levels;
mod radii;
mod report;
mod settings;
mod sphere;
mod structure;
mod utils;

// Re-export key public types
pub use aggregate::{aggregate, SasaResult};
pub use analysis::SasaAnalysis;
pub use engine::{ModelSasa, SasaEngine};
pub use error::SasaError;
pub use grid::NeighborIndex;
pub use levels::{parse_levels, Level};
pub use radii::{RadiusTable, DEFAULT_RADIUS};
pub use report::{breakdown_df, format_totals, plot_level, plot_path, print_totals, SEPARATOR};
pub use settings::{SasaSettings, DEFAULT_SPHERE_POINTS, WATER_PROBE_RADIUS};
pub use sphere::generate as sphere_points;
pub use structure::{Atom, AtomKey, Chain, ChainKey, Model, Residue, ResidueKey, Structure};
pub use utils::{
    find_pdb_files, is_amino_acid, load_model, log_pdb_warnings, write_table, TableFormat,
};

use std::path::Path;
use tracing::debug;

/// Calculate the SASA of every atom in `structure` and aggregate it to the
/// levels listed in `settings`.
///
/// # Example
///
/// ```no_run
/// use protsasa::{compute, load_structure, Level, SasaSettings};
///
/// let structure = load_structure("path/to/structure.pdb", false).unwrap();
/// let result = compute(&structure, SasaSettings::default()).unwrap();
/// println!("Residues SASA: {:.2}", result.total(Level::Residue).unwrap());
/// ```
pub fn compute(structure: &Structure, settings: SasaSettings) -> Result<SasaResult, SasaError> {
    let engine = SasaEngine::new(settings)?;
    let values = engine.compute_structure(structure)?;
    Ok(aggregate(&values, structure, &engine.settings().levels))
}

/// Read a structure file, log parser warnings and convert it into a
/// [`Structure`] named after the file stem.
pub fn load_structure(input_file: &str, protein_only: bool) -> Result<Structure, SasaError> {
    let (pdb, warnings) = load_model(input_file, protein_only)?;
    log_pdb_warnings(&warnings);

    let name = Path::new(input_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| input_file.to_string());
    let structure = Structure::from_pdb(&pdb, &name);
    debug!(
        "Loaded {name}: {} model(s), {} atoms",
        structure.models.len(),
        structure.atom_count()
    );
    Ok(structure)
}
