use std::fmt;
use std::str::FromStr;

use crate::error::SasaError;

/// Granularity at which atomic SASA values are summed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Atom,
    Residue,
    Chain,
    Model,
    Structure,
}

impl Level {
    /// All levels in reporting order.
    pub const ALL: [Level; 5] = [
        Level::Atom,
        Level::Residue,
        Level::Chain,
        Level::Model,
        Level::Structure,
    ];

    /// Levels that have a per-entity bar chart.
    pub const PLOTTABLE: [Level; 3] = [Level::Atom, Level::Residue, Level::Chain];

    /// Single-letter code (A/R/C/M/S).
    pub fn code(&self) -> char {
        match self {
            Level::Atom => 'A',
            Level::Residue => 'R',
            Level::Chain => 'C',
            Level::Model => 'M',
            Level::Structure => 'S',
        }
    }

    /// Name used in the printed totals.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Atom => "Atoms",
            Level::Residue => "Residues",
            Level::Chain => "Chains",
            Level::Model => "Model",
            Level::Structure => "Structure",
        }
    }

    /// X axis label of the level's bar chart, if it has one.
    pub fn axis_label(&self) -> Option<&'static str> {
        match self {
            Level::Atom => Some("Atom ID"),
            Level::Residue => Some("Residue ID"),
            Level::Chain => Some("Chain ID"),
            Level::Model | Level::Structure => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Level {
    type Err = SasaError;

    /// Accepts the single-letter codes as well as the full level names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ATOM" | "ATOMS" => Ok(Level::Atom),
            "R" | "RESIDUE" | "RESIDUES" => Ok(Level::Residue),
            "C" | "CHAIN" | "CHAINS" => Ok(Level::Chain),
            "M" | "MODEL" | "MODELS" => Ok(Level::Model),
            "S" | "STRUCTURE" => Ok(Level::Structure),
            _ => Err(SasaError::InvalidLevel(s.to_string())),
        }
    }
}

/// Parse a comma-separated list of level tags such as `"A,R,C"`.
pub fn parse_levels(levels: &str) -> Result<Vec<Level>, SasaError> {
    let mut parsed: Vec<Level> = levels
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(Level::from_str)
        .collect::<Result<_, _>>()?;
    parsed.sort();
    parsed.dedup();
    Ok(parsed)
}
