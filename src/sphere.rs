//! Quasi-uniform sample points on the unit sphere.

use nalgebra::Vector3;
use std::f64::consts::PI;

use crate::error::SasaError;

/// Generate `n_points` unit vectors on a golden-section spiral.
///
/// Points are placed at equally spaced heights `z` (offset by half a step from
/// the poles) and rotated by the golden angle between consecutive points, so
/// each point covers the same area. The sequence is deterministic.
pub fn generate(n_points: usize) -> Result<Vec<Vector3<f64>>, SasaError> {
    if n_points == 0 {
        return Err(SasaError::InvalidConfiguration {
            parameter: "n_sphere_points",
            value: n_points.to_string(),
        });
    }

    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    let dz = 2.0 / n_points as f64;

    let points = (0..n_points)
        .map(|k| {
            let z = 1.0 - dz / 2.0 - k as f64 * dz;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let longitude = golden_angle * k as f64;
            Vector3::new(longitude.cos() * r, longitude.sin() * r, z)
        })
        .collect();
    Ok(points)
}
