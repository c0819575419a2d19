use context_error::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error, IntensityMode, ProteosimError,
    chemistry::{MzSettings, ResidueMassTable},
    parse_json::{ParseJson, use_serde},
    sequence::{DigestSettings, Enzyme},
};

/// All settings for a simulated workflow, every field that is not given in the JSON
/// representation gets its default value.
///
/// ```rust
/// # use proteosim::{SimulationConfig, parse_json::ParseJson, sequence::Enzyme};
/// let config = SimulationConfig::from_json(r#"{"enzyme": "LysC", "digest": {"min_length": 3}}"#).unwrap();
/// assert_eq!(config.enzyme, Enzyme::LysC);
/// assert_eq!(config.digest.min_length, 3);
/// assert_eq!(config.digest.max_length, Some(30));
/// assert_eq!(config.mz.charge, 2);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// The enzyme used to digest the proteins
    pub enzyme: Enzyme,
    /// The length restrictions for the peptides
    pub digest: DigestSettings,
    /// The charge state for mass-to-charge ratios
    pub mz: MzSettings,
    /// A custom residue mass table, the standard table is used when not given
    pub residue_masses: Option<ResidueMassTable>,
    /// The inclusive retention time window to select peptides in
    pub retention_window: Option<(f64, f64)>,
    /// The number of bins for a retention time histogram
    pub histogram_resolution: usize,
    /// The intensities of a simulated spectrum
    pub intensities: IntensityMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enzyme: Enzyme::default(),
            digest: DigestSettings::default(),
            mz: MzSettings::default(),
            residue_masses: None,
            retention_window: None,
            histogram_resolution: 30,
            intensities: IntensityMode::default(),
        }
    }
}

impl SimulationConfig {
    /// The residue mass table to use, the custom table if given otherwise the standard table
    pub fn residue_masses(&self) -> &ResidueMassTable {
        self.residue_masses
            .as_ref()
            .unwrap_or(ResidueMassTable::standard())
    }

    /// Check that all settings are within their domain, so that a run fails before doing any work.
    /// # Errors
    /// If the charge is not positive, the histogram resolution is zero, or the retention window is inverted.
    pub fn validate(&self) -> Result<(), Error> {
        self.mz.validate()?;
        if self.histogram_resolution == 0 {
            return Err(BoxedError::new(
                ProteosimError::InvalidArgument,
                "Invalid configuration",
                "The histogram resolution has to be a positive integer",
                Context::none(),
            ));
        }
        if let Some((lower, upper)) = self.retention_window
            && lower > upper
        {
            return Err(BoxedError::new(
                ProteosimError::InvalidArgument,
                "Invalid configuration",
                format!("The retention window {lower}..={upper} is inverted"),
                Context::none(),
            ));
        }
        Ok(())
    }
}

impl ParseJson for SimulationConfig {
    fn from_json_value(value: Value) -> Result<Self, Error> {
        let config: Self = use_serde(value)?;
        config.validate()?;
        Ok(config)
    }
}
