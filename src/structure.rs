//! Read-only structure hierarchy consumed by the SASA engine.
//!
//! The hierarchy is a trimmed-down view of a [`pdbtbx::PDB`]: models, chains,
//! residues and atoms with just enough information to resolve radii and to key
//! the aggregated results.

use nalgebra::Point3;
use pdbtbx::PDB;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Structure {
    pub name: String,
    pub models: Vec<Model>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub serial: usize,
    pub chains: Vec<Chain>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    pub id: String,
    pub residues: Vec<Residue>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Residue {
    pub serial: isize,
    pub insertion: String,
    pub name: String,
    pub atoms: Vec<Atom>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub serial: usize,
    pub name: String,
    /// Element symbol used for the radius lookup
    pub element: String,
    pub position: Point3<f64>,
}

impl Structure {
    /// Convert a parsed PDB/mmCIF file.
    ///
    /// Atoms with alternate locations keep the location with the highest
    /// occupancy, the first one on ties. Atoms within a residue are ordered
    /// by serial number. Atoms without an element get one from the first
    /// letter of their name.
    pub fn from_pdb(pdb: &PDB, name: &str) -> Self {
        let models = pdb
            .models()
            .map(|model| Model {
                serial: model.serial_number(),
                chains: model
                    .chains()
                    .map(|chain| Chain {
                        id: chain.id().to_string(),
                        residues: chain.residues().map(residue_from_pdb).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            models,
        }
    }

    pub fn atom_count(&self) -> usize {
        self.models.iter().map(Model::atom_count).sum()
    }

    /// Serial number of the model used for structure-wide totals.
    pub fn first_model(&self) -> Option<usize> {
        self.models.first().map(|m| m.serial)
    }
}

impl Model {
    pub fn atom_count(&self) -> usize {
        self.chains
            .iter()
            .flat_map(|c| &c.residues)
            .map(|r| r.atoms.len())
            .sum()
    }

    /// Atoms of the model by chain, residue and serial number, with their keys.
    pub fn atoms_with_keys(&self) -> impl Iterator<Item = (AtomKey, &Atom)> + '_ {
        self.chains.iter().flat_map(move |chain| {
            chain.residues.iter().flat_map(move |residue| {
                let residue_key = ResidueKey {
                    model: self.serial,
                    chain: chain.id.clone(),
                    resi: residue.serial,
                    insertion: residue.insertion.clone(),
                };
                residue.atoms.iter().map(move |atom| {
                    (
                        AtomKey {
                            residue: residue_key.clone(),
                            serial: atom.serial,
                            name: atom.name.clone(),
                        },
                        atom,
                    )
                })
            })
        })
    }
}

fn residue_from_pdb(residue: &pdbtbx::Residue) -> Residue {
    let (resi, insertion) = residue.id();

    // (disordered, atom); a disordered atom keeps its highest-occupancy location
    let mut kept: Vec<(bool, &pdbtbx::Atom)> = Vec::new();
    for conformer in residue.conformers() {
        let disordered = conformer.alternative_location().is_some();
        for atom in conformer.atoms() {
            if disordered {
                if let Some(slot) = kept
                    .iter_mut()
                    .find(|(d, other)| *d && other.name() == atom.name())
                {
                    if atom.occupancy() > slot.1.occupancy() {
                        slot.1 = atom;
                    }
                    continue;
                }
            }
            kept.push((disordered, atom));
        }
    }
    kept.sort_by_key(|(_, atom)| atom.serial_number());

    let atoms = kept
        .into_iter()
        .map(|(_, atom)| {
            let (x, y, z) = atom.pos();
            Atom {
                serial: atom.serial_number(),
                name: atom.name().to_string(),
                element: atom
                    .element()
                    .map(|e| e.symbol().to_string())
                    .unwrap_or_else(|| element_from_name(atom.name())),
                position: Point3::new(x, y, z),
            }
        })
        .collect();

    Residue {
        serial: resi,
        insertion: insertion.unwrap_or("").to_string(),
        name: residue.name().unwrap_or("UNK").to_string(),
        atoms,
    }
}

/// Guess an element from a PDB atom name, e.g. `"1HB"` -> `"H"`.
pub(crate) fn element_from_name(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}

/// Chain identifier within a model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainKey {
    pub model: usize,
    pub chain: String,
}

/// Residue identifier: model, chain, residue number and insertion code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub model: usize,
    pub chain: String,
    pub resi: isize,
    pub insertion: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomKey {
    pub residue: ResidueKey,
    pub serial: usize,
    pub name: String,
}

impl ResidueKey {
    pub fn chain_key(&self) -> ChainKey {
        ChainKey {
            model: self.model,
            chain: self.chain.clone(),
        }
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.model, self.chain)
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}:{}{}",
            self.model, self.chain, self.resi, self.insertion
        )
    }
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.residue, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::load_model;

    fn load_fixture() -> Structure {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/dipeptide.pdb");
        let (pdb, _) = load_model(&path, false).unwrap();
        Structure::from_pdb(&pdb, "dipeptide")
    }

    #[test]
    fn hierarchy_from_pdb() {
        let structure = load_fixture();
        assert_eq!(structure.name, "dipeptide");
        assert_eq!(structure.models.len(), 2);
        assert_eq!(structure.first_model(), Some(1));

        let model = &structure.models[0];
        let chains: Vec<&str> = model.chains.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(chains, vec!["A", "B"]);
        assert_eq!(model.chains[0].residues.len(), 2);
        assert_eq!(model.chains[0].residues[0].name, "GLY");
        assert_eq!(model.chains[0].residues[0].atoms[1].element, "C");
    }

    #[test]
    fn occupancy_ties_keep_the_first_location() {
        let structure = load_fixture();
        // SER 2 of chain A has an OG at 0.50 occupancy in both locations
        let ser = &structure.models[0].chains[0].residues[1];
        let og: Vec<&Atom> = ser.atoms.iter().filter(|a| a.name == "OG").collect();
        assert_eq!(og.len(), 1);
        assert_eq!(og[0].serial, 10);
        assert_eq!(structure.models[0].atom_count(), 14);
    }

    #[test]
    fn highest_occupancy_location_is_kept() {
        let root = env!("CARGO_MANIFEST_DIR");
        let (pdb, _) = load_model(&format!("{}/test-data/altloc.pdb", root), false).unwrap();
        let structure = Structure::from_pdb(&pdb, "altloc");
        let ser = &structure.models[0].chains[0].residues[0];

        // OG: A 0.30 vs B 0.70; CB: A 0.60 vs B 0.40
        let serials: Vec<usize> = ser.atoms.iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![1, 3, 4, 6]);
        let og = ser.atoms.iter().find(|a| a.name == "OG").unwrap();
        assert_eq!(og.position, Point3::new(-1.5, 0.5, 0.0));
    }

    #[test]
    fn residue_atoms_are_ordered_by_serial() {
        let structure = load_fixture();
        let ser = &structure.models[0].chains[0].residues[1];
        let serials: Vec<usize> = ser.atoms.iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn keys_follow_the_hierarchy() {
        let structure = load_fixture();
        let keys: Vec<AtomKey> = structure.models[0]
            .atoms_with_keys()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys.len(), 14);
        assert_eq!(keys[0].to_string(), "1/A:1:N");
        assert_eq!(keys[0].residue.chain_key().to_string(), "1/A");
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn element_guess_skips_digits() {
        assert_eq!(element_from_name("1HB"), "H");
        assert_eq!(element_from_name(" CA "), "C");
        assert_eq!(element_from_name("12"), "");
    }
}
