//! Shrake-Rupley solvent accessible surface area.
//!
//! Every atom sphere is inflated by the probe radius and sampled with the same
//! set of unit-sphere points. A sample point is buried when it lies inside (or
//! exactly on) the inflated sphere of any other atom; the atom's SASA is the
//! exposed fraction of the inflated sphere area.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::{debug, trace};

use crate::error::SasaError;
use crate::grid::NeighborIndex;
use crate::settings::SasaSettings;
use crate::sphere;
use crate::structure::{AtomKey, Model, Structure};

/// SASA of every atom of one model, in [`Model::atoms_with_keys`] order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelSasa {
    pub serial: usize,
    pub atoms: Vec<(AtomKey, f64)>,
}

pub struct SasaEngine {
    settings: SasaSettings,
    sphere_points: Vec<Vector3<f64>>,
}

impl SasaEngine {
    /// Validate `settings` and generate the shared sphere points.
    pub fn new(settings: SasaSettings) -> Result<Self, SasaError> {
        settings.validate()?;
        let sphere_points = sphere::generate(settings.n_sphere_points)?;
        Ok(Self {
            settings,
            sphere_points,
        })
    }

    pub fn settings(&self) -> &SasaSettings {
        &self.settings
    }

    pub fn sphere_points(&self) -> &[Vector3<f64>] {
        &self.sphere_points
    }

    /// SASA of every model of `structure`.
    ///
    /// Models are independent: atoms never bury atoms of another model.
    pub fn compute_structure(&self, structure: &Structure) -> Result<Vec<ModelSasa>, SasaError> {
        structure
            .models
            .iter()
            .map(|model| self.compute_model(model))
            .collect()
    }

    /// SASA of every atom in `model`. Fails if an atom has no radius.
    pub fn compute_model(&self, model: &Model) -> Result<ModelSasa, SasaError> {
        let mut keys = Vec::with_capacity(model.atom_count());
        let mut centers = Vec::with_capacity(model.atom_count());
        let mut radii = Vec::with_capacity(model.atom_count());
        for (key, atom) in model.atoms_with_keys() {
            radii.push(self.settings.radii.resolve(&atom.element, atom.serial)?);
            centers.push(atom.position);
            keys.push(key);
        }

        let values = self.compute_spheres(&centers, &radii);
        debug!(
            "Model {}: {} atoms, total SASA {:.2}",
            model.serial,
            values.len(),
            values.iter().sum::<f64>()
        );

        Ok(ModelSasa {
            serial: model.serial,
            atoms: keys.into_iter().zip(values).collect(),
        })
    }

    /// SASA of spheres with the given `centers` and van der Waals `radii`.
    pub fn compute_spheres(&self, centers: &[Point3<f64>], radii: &[f64]) -> Vec<f64> {
        let probe = self.settings.probe_radius;
        let expanded: Vec<f64> = radii.iter().map(|r| r + probe).collect();
        let index = NeighborIndex::build(centers, &expanded);
        trace!(
            "Neighbor grid over {} atoms with {:.2} Å cells",
            index.len(),
            index.cell_size()
        );

        if self.settings.parallel {
            (0..centers.len())
                .into_par_iter()
                .map_init(Vec::new, |neighbors, i| {
                    self.atom_sasa(i, centers, &expanded, &index, neighbors)
                })
                .collect()
        } else {
            let mut neighbors = Vec::new();
            (0..centers.len())
                .map(|i| self.atom_sasa(i, centers, &expanded, &index, &mut neighbors))
                .collect()
        }
    }

    fn atom_sasa(
        &self,
        i: usize,
        centers: &[Point3<f64>],
        expanded: &[f64],
        index: &NeighborIndex,
        neighbors: &mut Vec<usize>,
    ) -> f64 {
        let center = centers[i];
        let radius = expanded[i];

        // Only spheres overlapping this one can bury its sample points
        index.query_into(&center, radius, neighbors);
        neighbors.retain(|&j| j != i);

        let exposed = self
            .sphere_points
            .iter()
            .filter(|&unit| {
                let point = center + unit * radius;
                !neighbors.iter().any(|&j| {
                    (point - centers[j]).norm_squared() <= expanded[j] * expanded[j]
                })
            })
            .count();

        exposed as f64 / self.sphere_points.len() as f64 * 4.0 * PI * radius * radius
    }
}
