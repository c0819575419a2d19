use context_error::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, ProteosimError};

/// The proton mass (in Dalton) used when no other mass is specified
pub const DEFAULT_PROTON_MASS: f64 = 1.007;

/// The charge state and charge carrier mass used to calculate mass-to-charge ratios.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MzSettings {
    /// The charge state, has to be positive
    pub charge: isize,
    /// The mass of a single proton (in Dalton)
    pub proton_mass: f64,
}

impl Default for MzSettings {
    fn default() -> Self {
        Self {
            charge: 2,
            proton_mass: DEFAULT_PROTON_MASS,
        }
    }
}

impl MzSettings {
    /// Use the given charge state with the default proton mass
    pub const fn with_charge(charge: isize) -> Self {
        Self {
            charge,
            proton_mass: DEFAULT_PROTON_MASS,
        }
    }

    /// Get the mass-to-charge ratio for the given mass with these settings, see [`mass_to_charge`].
    /// # Errors
    /// If the charge is not positive.
    pub fn mz(&self, mass: f64) -> Result<f64, Error> {
        mass_to_charge(mass, self.charge, self.proton_mass)
    }

    /// Check that these settings can be used to calculate a mass-to-charge ratio
    /// # Errors
    /// If the charge is not positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.charge <= 0 {
            Err(BoxedError::new(
                ProteosimError::InvalidArgument,
                "Invalid charge",
                format!(
                    "The charge has to be a positive integer to calculate a mass-to-charge ratio, but {} was given",
                    self.charge
                ),
                Context::none(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Get the mass-to-charge ratio of a molecule with the given neutral mass that carries
/// `charge` protons: `(mass + charge * proton_mass) / charge`.
///
/// ```rust
/// # use proteosim::chemistry::mass_to_charge;
/// assert_eq!(mass_to_charge(200.0, 2, 1.0).unwrap(), 101.0);
/// assert!(mass_to_charge(200.0, 0, 1.0).is_err());
/// ```
/// # Errors
/// If the charge is not positive.
pub fn mass_to_charge(mass: f64, charge: isize, proton_mass: f64) -> Result<f64, Error> {
    MzSettings {
        charge,
        proton_mass,
    }
    .validate()?;
    let charge = charge as f64;
    Ok(charge.mul_add(proton_mass, mass) / charge)
}

/// Get the mass-to-charge ratio for every mass in the map, keeping the keys and their order.
/// # Errors
/// If the charge is not positive, even if the map is empty.
pub fn mass_to_charge_collection(
    masses: &IndexMap<String, f64>,
    settings: MzSettings,
) -> Result<IndexMap<String, f64>, Error> {
    settings.validate()?;
    masses
        .iter()
        .map(|(peptide, mass)| settings.mz(*mass).map(|mz| (peptide.clone(), mz)))
        .collect()
}
