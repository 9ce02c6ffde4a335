//! Bucketed spatial index for neighbor searches.
//!
//! Atoms are hashed into cubic cells whose edge equals the largest interaction
//! radius, so any sphere that can reach a query point sits in one of the cells
//! around it.

use nalgebra::{distance_squared, Point3};
use std::collections::HashMap;

type Cell = (i64, i64, i64);

#[derive(Clone, Debug)]
pub struct NeighborIndex {
    cell_size: f64,
    max_radius: f64,
    cells: HashMap<Cell, Vec<usize>>,
    centers: Vec<Point3<f64>>,
    radii: Vec<f64>,
}

impl NeighborIndex {
    /// Build an index over spheres given by `centers` and interaction `radii`
    /// (van der Waals radius plus probe radius).
    pub fn build(centers: &[Point3<f64>], radii: &[f64]) -> Self {
        debug_assert_eq!(centers.len(), radii.len());
        let max_radius = radii.iter().copied().fold(0.0_f64, f64::max);
        let cell_size = if max_radius > 0.0 { max_radius } else { 1.0 };

        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, center) in centers.iter().enumerate() {
            cells
                .entry(cell_of(center, cell_size))
                .or_default()
                .push(i);
        }

        Self {
            cell_size,
            max_radius,
            cells,
            centers: centers.to_vec(),
            radii: radii.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Indices of all spheres intersecting the ball of `radius` around `point`,
    /// in ascending order.
    pub fn query(&self, point: &Point3<f64>, radius: f64) -> Vec<usize> {
        let mut found = Vec::new();
        self.query_into(point, radius, &mut found);
        found
    }

    /// Same as [`NeighborIndex::query`], reusing `found` as the output buffer.
    pub fn query_into(&self, point: &Point3<f64>, radius: f64, found: &mut Vec<usize>) {
        found.clear();
        if self.is_empty() {
            return;
        }

        let reach = radius.max(0.0) + self.max_radius;
        let span = ((reach / self.cell_size).ceil() as i64).max(1);
        let (cx, cy, cz) = cell_of(point, self.cell_size);

        for x in cx - span..=cx + span {
            for y in cy - span..=cy + span {
                for z in cz - span..=cz + span {
                    let Some(members) = self.cells.get(&(x, y, z)) else {
                        continue;
                    };
                    for &j in members {
                        let limit = radius + self.radii[j];
                        if distance_squared(&self.centers[j], point) <= limit * limit {
                            found.push(j);
                        }
                    }
                }
            }
        }
        found.sort_unstable();
    }
}

fn cell_of(point: &Point3<f64>, cell_size: f64) -> Cell {
    (
        (point.x / cell_size).floor() as i64,
        (point.y / cell_size).floor() as i64,
        (point.z / cell_size).floor() as i64,
    )
}
