//! Lazily computed SASA of one structure.

use tracing::debug;

use crate::aggregate::{aggregate, SasaResult};
use crate::engine::SasaEngine;
use crate::error::SasaError;
use crate::levels::Level;
use crate::settings::SasaSettings;
use crate::structure::Structure;

/// A structure together with the engine that measures it.
///
/// The aggregated result is computed on first access and reused until
/// [`SasaAnalysis::invalidate`] is called.
pub struct SasaAnalysis {
    structure: Structure,
    engine: SasaEngine,
    /// `None` until computed
    cached: Option<SasaResult>,
}

impl SasaAnalysis {
    pub fn new(structure: Structure, settings: SasaSettings) -> Result<Self, SasaError> {
        Ok(Self {
            structure,
            engine: SasaEngine::new(settings)?,
            cached: None,
        })
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn is_computed(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the cached result so the next access recomputes it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// The aggregated result, computing it if needed.
    pub fn result(&mut self) -> Result<&SasaResult, SasaError> {
        let result = match self.cached.take() {
            Some(result) => result,
            None => self.compute()?,
        };
        Ok(&*self.cached.insert(result))
    }

    fn compute(&self) -> Result<SasaResult, SasaError> {
        let values = self.engine.compute_structure(&self.structure)?;
        let result = aggregate(&values, &self.structure, &self.engine.settings().levels);
        debug!(
            "Computed SASA of {} ({} atoms)",
            self.structure.name,
            self.structure.atom_count()
        );
        Ok(result)
    }

    pub fn total(&mut self, level: Level) -> Result<f64, SasaError> {
        self.result()?.total(level)
    }

    pub fn total_for(&mut self, tag: &str) -> Result<f64, SasaError> {
        self.result()?.total_for(tag)
    }
}
