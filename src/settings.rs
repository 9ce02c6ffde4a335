//! SASA calculation settings.

use crate::error::SasaError;
use crate::levels::Level;
use crate::radii::RadiusTable;

/// Radius of a water molecule in Angstroms.
pub const WATER_PROBE_RADIUS: f64 = 1.4;
/// Number of sphere points used by Bio.PDB's Shrake-Rupley.
pub const DEFAULT_SPHERE_POINTS: usize = 100;

#[derive(Clone, Debug)]
pub struct SasaSettings {
    /// Solvent probe radius in Angstroms
    pub probe_radius: f64,
    /// Number of sample points on each atom sphere
    pub n_sphere_points: usize,
    /// Element radii with their fallback
    pub radii: RadiusTable,
    /// Levels that get aggregated
    pub levels: Vec<Level>,
    /// Spread the per-atom work over the rayon pool
    pub parallel: bool,
}

impl Default for SasaSettings {
    fn default() -> Self {
        Self {
            probe_radius: WATER_PROBE_RADIUS,
            n_sphere_points: DEFAULT_SPHERE_POINTS,
            radii: RadiusTable::default(),
            levels: Level::ALL.to_vec(),
            parallel: false,
        }
    }
}

impl SasaSettings {
    pub fn with_probe_radius(mut self, probe_radius: f64) -> Self {
        self.probe_radius = probe_radius;
        self
    }

    pub fn with_sphere_points(mut self, n_sphere_points: usize) -> Self {
        self.n_sphere_points = n_sphere_points;
        self
    }

    pub fn with_radii(mut self, radii: RadiusTable) -> Self {
        self.radii = radii;
        self
    }

    pub fn with_levels(mut self, levels: &[Level]) -> Self {
        self.levels = levels.to_vec();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject settings that cannot produce a meaningful surface.
    pub fn validate(&self) -> Result<(), SasaError> {
        if !self.probe_radius.is_finite() || self.probe_radius <= 0.0 {
            return Err(SasaError::InvalidConfiguration {
                parameter: "probe_radius",
                value: self.probe_radius.to_string(),
            });
        }
        if self.n_sphere_points == 0 {
            return Err(SasaError::InvalidConfiguration {
                parameter: "n_sphere_points",
                value: self.n_sphere_points.to_string(),
            });
        }
        self.radii.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SasaSettings::default();
        assert_eq!(settings.probe_radius, 1.4);
        assert_eq!(settings.n_sphere_points, 100);
        assert_eq!(settings.levels.len(), 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn bad_values_are_rejected() {
        for probe in [0.0, -1.4, f64::NAN] {
            let settings = SasaSettings::default().with_probe_radius(probe);
            assert!(
                matches!(
                    settings.validate(),
                    Err(SasaError::InvalidConfiguration {
                        parameter: "probe_radius",
                        ..
                    })
                ),
                "probe radius {probe} should be rejected"
            );
        }

        let settings = SasaSettings::default().with_sphere_points(0);
        assert!(matches!(
            settings.validate(),
            Err(SasaError::InvalidConfiguration {
                parameter: "n_sphere_points",
                ..
            })
        ));
    }
}
