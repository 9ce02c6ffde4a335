//! Van der Waals radii lookup by element symbol.
//!
//! The embedded table follows the values used by Bio.PDB's Shrake-Rupley
//! implementation. Unknown elements fall back to [`DEFAULT_RADIUS`] unless the
//! fallback is removed with [`RadiusTable::without_default`].

use std::collections::HashMap;

use crate::error::SasaError;

/// Radius used for elements missing from the table.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Embedded van der Waals radii in Angstroms.
const EMBEDDED_RADII: [(&str, f64); 21] = [
    ("H", 1.200),
    ("HE", 1.400),
    ("C", 1.700),
    ("N", 1.550),
    ("O", 1.520),
    ("F", 1.470),
    ("NA", 2.270),
    ("MG", 1.730),
    ("P", 1.800),
    ("S", 1.800),
    ("CL", 1.750),
    ("K", 2.750),
    ("CA", 2.310),
    ("NI", 1.630),
    ("CU", 1.400),
    ("ZN", 1.390),
    ("SE", 1.900),
    ("BR", 1.850),
    ("CD", 1.580),
    ("I", 1.980),
    ("HG", 1.550),
];

/// Element to radius mapping with an optional default.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTable {
    radii: HashMap<String, f64>,
    default: Option<f64>,
}

impl Default for RadiusTable {
    fn default() -> Self {
        Self {
            radii: EMBEDDED_RADII
                .iter()
                .map(|(element, radius)| (element.to_string(), *radius))
                .collect(),
            default: Some(DEFAULT_RADIUS),
        }
    }
}

impl RadiusTable {
    /// An empty table with no default; every element must be inserted explicitly.
    pub fn empty() -> Self {
        Self {
            radii: HashMap::new(),
            default: None,
        }
    }

    /// Set or override the radius of an element. Symbols are case-insensitive.
    pub fn with_radius(mut self, element: &str, radius: f64) -> Self {
        self.radii.insert(element.trim().to_uppercase(), radius);
        self
    }

    /// Set the fallback radius for unknown elements.
    pub fn with_default(mut self, radius: f64) -> Self {
        self.default = Some(radius);
        self
    }

    /// Remove the fallback so unknown elements fail with [`SasaError::MissingRadius`].
    pub fn without_default(mut self) -> Self {
        self.default = None;
        self
    }

    pub fn default_radius(&self) -> Option<f64> {
        self.default
    }

    /// Radius of `element`, or the fallback if the element is unknown.
    pub fn get(&self, element: &str) -> Option<f64> {
        self.radii
            .get(&element.trim().to_uppercase())
            .copied()
            .or(self.default)
    }

    /// Like [`RadiusTable::get`] but reports the offending atom on failure.
    pub fn resolve(&self, element: &str, atom: usize) -> Result<f64, SasaError> {
        self.get(element).ok_or_else(|| SasaError::MissingRadius {
            atom,
            element: element.to_string(),
        })
    }

    /// Check that every radius in the table is usable.
    pub(crate) fn validate(&self) -> Result<(), SasaError> {
        let bad = self
            .radii
            .iter()
            .map(|(element, radius)| (element.as_str(), *radius))
            .chain(self.default.map(|r| ("default", r)))
            .find(|(_, radius)| !radius.is_finite() || *radius < 0.0);
        match bad {
            Some((element, radius)) => Err(SasaError::InvalidConfiguration {
                parameter: "radius_table",
                value: format!("{element} = {radius}"),
            }),
            None => Ok(()),
        }
    }
}
