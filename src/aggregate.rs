//! Sum per-atom SASA values up the structure hierarchy.
//!
//! Entities are keyed by [`AtomKey`], [`ResidueKey`], [`ChainKey`] and model
//! serial number. Totals for every level are taken over the first model only,
//! so all levels report the same structure-wide figure.

use std::collections::BTreeMap;

use crate::engine::ModelSasa;
use crate::error::SasaError;
use crate::levels::Level;
use crate::structure::{AtomKey, ChainKey, ResidueKey, Structure};

/// Aggregated SASA of one structure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SasaResult {
    name: String,
    levels: Vec<Level>,
    first_model: Option<usize>,
    atoms: BTreeMap<AtomKey, f64>,
    residues: BTreeMap<ResidueKey, f64>,
    chains: BTreeMap<ChainKey, f64>,
    models: BTreeMap<usize, f64>,
    total: f64,
}

/// Sum `model_values` over `structure` for each of `levels`.
///
/// Every residue, chain and model of `structure` gets an entry, even when it
/// has no atoms. Levels missing from `levels` stay empty and are rejected by
/// [`SasaResult::total`].
pub fn aggregate(model_values: &[ModelSasa], structure: &Structure, levels: &[Level]) -> SasaResult {
    let mut result = SasaResult {
        name: structure.name.clone(),
        levels: levels.to_vec(),
        first_model: structure.first_model(),
        ..Default::default()
    };
    result.levels.sort();
    result.levels.dedup();

    // Seed the hierarchy so empty entities are reported as zero
    for model in &structure.models {
        for chain in &model.chains {
            for residue in &chain.residues {
                let key = ResidueKey {
                    model: model.serial,
                    chain: chain.id.clone(),
                    resi: residue.serial,
                    insertion: residue.insertion.clone(),
                };
                if result.computes(Level::Chain) {
                    result.chains.entry(key.chain_key()).or_insert(0.0);
                }
                if result.computes(Level::Residue) {
                    result.residues.entry(key).or_insert(0.0);
                }
            }
        }
        if result.computes(Level::Model) {
            result.models.entry(model.serial).or_insert(0.0);
        }
    }

    for model in model_values {
        for (key, sasa) in &model.atoms {
            if result.computes(Level::Atom) {
                result.atoms.insert(key.clone(), *sasa);
            }
            if result.computes(Level::Residue) {
                *result.residues.entry(key.residue.clone()).or_insert(0.0) += sasa;
            }
            if result.computes(Level::Chain) {
                *result.chains.entry(key.residue.chain_key()).or_insert(0.0) += sasa;
            }
            if result.computes(Level::Model) {
                *result.models.entry(model.serial).or_insert(0.0) += sasa;
            }
            if Some(model.serial) == result.first_model {
                result.total += sasa;
            }
        }
    }
    result
}

impl SasaResult {
    /// Name of the structure the values belong to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels that were aggregated, in A, R, C, M, S order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn computes(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }

    pub fn atoms(&self) -> &BTreeMap<AtomKey, f64> {
        &self.atoms
    }

    pub fn residues(&self) -> &BTreeMap<ResidueKey, f64> {
        &self.residues
    }

    pub fn chains(&self) -> &BTreeMap<ChainKey, f64> {
        &self.chains
    }

    pub fn models(&self) -> &BTreeMap<usize, f64> {
        &self.models
    }

    fn check(&self, level: Level) -> Result<(), SasaError> {
        if self.computes(level) {
            Ok(())
        } else {
            Err(SasaError::InvalidLevel(level.to_string()))
        }
    }

    /// Structure-wide SASA summed at `level`.
    ///
    /// Fails with [`SasaError::InvalidLevel`] if `level` was not aggregated.
    pub fn total(&self, level: Level) -> Result<f64, SasaError> {
        self.check(level)?;
        let Some(first) = self.first_model else {
            return Ok(0.0);
        };
        let total = match level {
            Level::Atom => self
                .atoms
                .iter()
                .filter(|(k, _)| k.residue.model == first)
                .map(|(_, v)| v)
                .sum(),
            Level::Residue => self
                .residues
                .iter()
                .filter(|(k, _)| k.model == first)
                .map(|(_, v)| v)
                .sum(),
            Level::Chain => self
                .chains
                .iter()
                .filter(|(k, _)| k.model == first)
                .map(|(_, v)| v)
                .sum(),
            Level::Model => self.models.get(&first).copied().unwrap_or(0.0),
            Level::Structure => self.total,
        };
        Ok(total)
    }

    /// Like [`SasaResult::total`] for a level tag such as `"R"` or `"Chains"`.
    pub fn total_for(&self, tag: &str) -> Result<f64, SasaError> {
        self.total(tag.parse()?)
    }

    /// Per-entity values of `level` as `(label, sasa)` pairs in hierarchy order.
    pub fn breakdown(&self, level: Level) -> Result<Vec<(String, f64)>, SasaError> {
        self.check(level)?;
        let rows = match level {
            Level::Atom => labelled(&self.atoms),
            Level::Residue => labelled(&self.residues),
            Level::Chain => labelled(&self.chains),
            Level::Model => labelled(&self.models),
            Level::Structure => vec![(self.name.clone(), self.total)],
        };
        Ok(rows)
    }
}

fn labelled<K: ToString>(map: &BTreeMap<K, f64>) -> Vec<(String, f64)> {
    map.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SasaEngine;
    use crate::settings::SasaSettings;
    use crate::structure::{Atom, Chain, Model, Residue};
    use nalgebra::Point3;

    fn atom(serial: usize, name: &str, x: f64) -> Atom {
        Atom {
            serial,
            name: name.to_string(),
            element: name[..1].to_string(),
            position: Point3::new(x, 0.0, 0.0),
        }
    }

    fn residue(serial: isize, atoms: Vec<Atom>) -> Residue {
        Residue {
            serial,
            insertion: String::new(),
            name: "GLY".to_string(),
            atoms,
        }
    }

    /// Two chains; chain B holds an empty residue.
    fn structure(models: &[usize]) -> Structure {
        Structure {
            name: "toy".to_string(),
            models: models
                .iter()
                .map(|&serial| Model {
                    serial,
                    chains: vec![
                        Chain {
                            id: "A".to_string(),
                            residues: vec![
                                residue(1, vec![atom(1, "N", 0.0), atom(2, "CA", 1.5)]),
                                residue(2, vec![atom(3, "C", 3.0), atom(4, "O", 4.2)]),
                            ],
                        },
                        Chain {
                            id: "B".to_string(),
                            residues: vec![
                                residue(1, vec![atom(5, "CA", 20.0)]),
                                residue(2, vec![]),
                            ],
                        },
                    ],
                })
                .collect(),
        }
    }

    fn run(structure: &Structure, levels: &[Level]) -> SasaResult {
        let engine = SasaEngine::new(SasaSettings::default()).unwrap();
        let values = engine.compute_structure(structure).unwrap();
        aggregate(&values, structure, levels)
    }

    #[test]
    fn residue_sums_match_atoms_exactly() {
        let result = run(&structure(&[1]), &Level::ALL);
        for (key, value) in result.residues() {
            let sum: f64 = result
                .atoms()
                .iter()
                .filter(|(k, _)| &k.residue == key)
                .map(|(_, v)| v)
                .sum();
            assert_eq!(sum, *value, "Residue {key}");
        }
    }

    #[test]
    fn totals_agree_across_levels() {
        let result = run(&structure(&[1]), &Level::ALL);
        let atom_sum: f64 = result.atoms().values().sum();
        let total = result.total(Level::Structure).unwrap();
        assert!(total > 0.0);
        for level in Level::ALL {
            let value = result.total(level).unwrap();
            assert!(
                (value - atom_sum).abs() <= 1e-9 * atom_sum,
                "{level}: {value} vs {atom_sum}"
            );
        }
    }

    #[test]
    fn empty_entities_are_zero() {
        let result = run(&structure(&[1]), &Level::ALL);
        let key = ResidueKey {
            model: 1,
            chain: "B".to_string(),
            resi: 2,
            insertion: String::new(),
        };
        assert_eq!(result.residues().get(&key), Some(&0.0));
        assert_eq!(result.chains().len(), 2);
    }

    #[test]
    fn only_first_model_counts_towards_totals() {
        let result = run(&structure(&[1, 2]), &Level::ALL);
        assert_eq!(result.models().len(), 2);
        let first = result.models()[&1];
        assert_eq!(result.models()[&2], first);
        assert_eq!(result.total(Level::Structure).unwrap(), first);
        assert!((result.total(Level::Atom).unwrap() - first).abs() < 1e-9);
        assert_eq!(result.atoms().len(), 10);
    }

    #[test]
    fn unknown_or_skipped_levels_fail() {
        let result = run(&structure(&[1]), &[Level::Residue, Level::Structure]);
        assert!(result.atoms().is_empty());
        assert!(matches!(
            result.total(Level::Atom),
            Err(SasaError::InvalidLevel(_))
        ));
        assert!(matches!(
            result.total_for("X"),
            Err(SasaError::InvalidLevel(_))
        ));
        assert!(result.total_for("r").is_ok());
    }

    #[test]
    fn breakdown_labels() {
        let result = run(&structure(&[1]), &Level::ALL);
        let chains = result.breakdown(Level::Chain).unwrap();
        let labels: Vec<&str> = chains.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1/A", "1/B"]);
        assert_eq!(result.breakdown(Level::Structure).unwrap()[0].0, "toy");
        assert_eq!(result.breakdown(Level::Atom).unwrap()[1].0, "1/A:1:CA");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let structure = structure(&[1]);
        let engine = SasaEngine::new(SasaSettings::default()).unwrap();
        let values = engine.compute_structure(&structure).unwrap();
        assert_eq!(
            aggregate(&values, &structure, &Level::ALL),
            aggregate(&values, &structure, &Level::ALL)
        );
    }

    #[test]
    fn empty_structure() {
        let result = run(&Structure::default(), &Level::ALL);
        assert_eq!(result.total(Level::Structure).unwrap(), 0.0);
        assert!(result.breakdown(Level::Residue).unwrap().is_empty());
    }
}
