use pdbtbx::*;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

use crate::error::SasaError;

/// Standard amino acid residue names.
const AMINO_ACIDS: [&str; 20] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
];

pub fn is_amino_acid(resn: &str) -> bool {
    AMINO_ACIDS.contains(&resn.to_uppercase().as_str())
}

/// Open an atomic data file with [`pdbtbx::ReadOptions`].
///
/// With `protein_only`, residues that are not standard amino acids (waters,
/// ions, ligands) are removed.
pub fn load_model(input_file: &str, protein_only: bool) -> Result<(PDB, Vec<PDBError>), SasaError> {
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errors| SasaError::MalformedInput {
            path: PathBuf::from(input_file),
            reason: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        })?;

    if protein_only {
        pdb.remove_residues_by(|res| !res.name().is_some_and(is_amino_acid));
    }

    Ok((pdb, errors))
}

/// Route parser warnings to the log by severity.
pub fn log_pdb_warnings(warnings: &[PDBError]) {
    warnings.iter().for_each(|e| match e.level() {
        pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
        pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });
}

/// All `*.pdb` files directly inside `folder`, sorted by name.
pub fn find_pdb_files(folder: &Path) -> Result<Vec<PathBuf>, SasaError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdb"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Table formats the per-entity breakdown can be saved as.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
    Json,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
            TableFormat::Json => "json",
        }
    }
}

/// Save `df` next to `file_path` with the extension of `format`, returning
/// the path written.
pub fn write_table(
    df: &mut DataFrame,
    file_path: &Path,
    format: TableFormat,
) -> Result<PathBuf, SasaError> {
    let path = file_path.with_extension(format.extension());
    let mut file = std::fs::File::create(&path)?;
    match format {
        TableFormat::Csv => CsvWriter::new(&mut file).finish(df)?,
        TableFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        TableFormat::Json => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::Json)
            .finish(df)?,
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        let root = env!("CARGO_MANIFEST_DIR");
        format!("{}/test-data/{}", root, name)
    }

    #[test]
    fn loads_all_models() {
        let (pdb, _) = load_model(&fixture("dipeptide.pdb"), false).unwrap();
        assert_eq!(pdb.model_count(), 2);
        assert_eq!(pdb.models().next().unwrap().chain_count(), 2);
    }

    #[test]
    fn missing_file_is_malformed_input() {
        match load_model(&fixture("does-not-exist.pdb"), false) {
            Err(SasaError::MalformedInput { path, .. }) => {
                assert!(path.ends_with("does-not-exist.pdb"))
            }
            other => panic!("Expected MalformedInput, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn finds_only_pdb_files() {
        let files = find_pdb_files(Path::new(&fixture("batch"))).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["broken.pdb", "glyser.pdb", "two_carbons.pdb"]);
    }

    #[test]
    fn table_takes_the_format_extension() {
        let dir = std::env::temp_dir().join("protsasa-table-test");
        std::fs::create_dir_all(&dir).unwrap();
        let mut df = df!(
            "chain" => vec!["A", "B"],
            "sasa" => vec![12.5, 0.0],
        )
        .unwrap();

        let path = write_table(&mut df, &dir.join("sasa.txt"), TableFormat::Csv).unwrap();
        assert_eq!(path, dir.join("sasa.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("chain,sasa"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn amino_acid_names() {
        assert!(is_amino_acid("gly"));
        assert!(!is_amino_acid("HOH"));
    }
}
