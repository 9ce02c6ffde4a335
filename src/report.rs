//! Text totals, bar charts and tables of aggregated SASA.

use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::aggregate::SasaResult;
use crate::error::SasaError;
use crate::levels::Level;

/// Separator printed after each structure's totals.
pub const SEPARATOR: &str = "--------------------";

/// One `"<LevelName> SASA: <value> Å²"` line per aggregated level, followed by
/// the separator.
pub fn format_totals(result: &SasaResult) -> Result<String, SasaError> {
    let mut out = String::new();
    for level in result.levels() {
        let total = result.total(*level)?;
        out.push_str(&format!("{} SASA: {:.2} Å²\n", level.name(), total));
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    Ok(out)
}

pub fn print_totals(result: &SasaResult) -> Result<(), SasaError> {
    print!("{}", format_totals(result)?);
    Ok(())
}

/// Per-entity table of `level` with one column per identifier part and a
/// `sasa` column.
pub fn breakdown_df(result: &SasaResult, level: Level) -> Result<DataFrame, SasaError> {
    if !result.computes(level) {
        return Err(SasaError::InvalidLevel(level.to_string()));
    }
    let df = match level {
        Level::Atom => {
            let atoms = result.atoms();
            df!(
                "model" => atoms.keys().map(|k| k.residue.model as u64).collect::<Vec<u64>>(),
                "chain" => atoms.keys().map(|k| k.residue.chain.to_owned()).collect::<Vec<String>>(),
                "resi" => atoms.keys().map(|k| k.residue.resi as i64).collect::<Vec<i64>>(),
                "insertion" => atoms.keys().map(|k| k.residue.insertion.to_owned()).collect::<Vec<String>>(),
                "atomn" => atoms.keys().map(|k| k.name.to_owned()).collect::<Vec<String>>(),
                "atomi" => atoms.keys().map(|k| k.serial as u64).collect::<Vec<u64>>(),
                "sasa" => atoms.values().copied().collect::<Vec<f64>>(),
            )?
        }
        Level::Residue => {
            let residues = result.residues();
            df!(
                "model" => residues.keys().map(|k| k.model as u64).collect::<Vec<u64>>(),
                "chain" => residues.keys().map(|k| k.chain.to_owned()).collect::<Vec<String>>(),
                "resi" => residues.keys().map(|k| k.resi as i64).collect::<Vec<i64>>(),
                "insertion" => residues.keys().map(|k| k.insertion.to_owned()).collect::<Vec<String>>(),
                "sasa" => residues.values().copied().collect::<Vec<f64>>(),
            )?
        }
        Level::Chain => {
            let chains = result.chains();
            df!(
                "model" => chains.keys().map(|k| k.model as u64).collect::<Vec<u64>>(),
                "chain" => chains.keys().map(|k| k.chain.to_owned()).collect::<Vec<String>>(),
                "sasa" => chains.values().copied().collect::<Vec<f64>>(),
            )?
        }
        Level::Model => {
            let models = result.models();
            df!(
                "model" => models.keys().map(|k| *k as u64).collect::<Vec<u64>>(),
                "sasa" => models.values().copied().collect::<Vec<f64>>(),
            )?
        }
        Level::Structure => df!(
            "structure" => vec![result.name().to_string()],
            "sasa" => vec![result.total(Level::Structure)?],
        )?,
    };
    Ok(df)
}

/// Path of the bar chart of `level` for the structure `stem`.
pub fn plot_path(out_dir: &Path, stem: &str, level: Level) -> PathBuf {
    out_dir.join(format!("{stem}_{}_sasa.png", level.code()))
}

/// Draw the per-entity bar chart of `level` into `out_dir`, replacing any
/// existing file. Only atom, residue and chain levels can be plotted.
pub fn plot_level(
    result: &SasaResult,
    level: Level,
    out_dir: &Path,
    stem: &str,
) -> Result<PathBuf, SasaError> {
    let x_desc = level
        .axis_label()
        .ok_or_else(|| SasaError::InvalidLevel(level.to_string()))?;
    let data = result.breakdown(level)?;

    std::fs::create_dir_all(out_dir)?;
    let path = plot_path(out_dir, stem, level);
    draw_bars(&path, &data, x_desc, &format!("{} Level SASA", level.code()))?;
    Ok(path)
}

fn plot_error<E: std::fmt::Display>(e: E) -> SasaError {
    SasaError::Plot(e.to_string())
}

fn draw_bars(path: &Path, data: &[(String, f64)], x_desc: &str, title: &str) -> Result<(), SasaError> {
    use plotters::prelude::*;

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    if data.is_empty() {
        root.draw(&Text::new(
            "No SASA data",
            (600, 300),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))
        .map_err(plot_error)?;
        root.present().map_err(plot_error)?;
        return Ok(());
    }

    let y_max = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0..data.len()).into_segmented(), 0.0..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.len().min(40))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(idx) if *idx < data.len() => data[*idx].0.clone(),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .y_desc("SASA (Angstrom^2)")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(data.iter().enumerate().map(|(idx, (_, value))| {
            Rectangle::new(
                [
                    (SegmentValue::CenterOf(idx), 0.0),
                    (SegmentValue::CenterOf(idx + 1), *value),
                ],
                BLUE.mix(0.7).filled(),
            )
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}
