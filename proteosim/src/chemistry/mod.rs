mod charge;
mod residue_mass;

pub use charge::*;
pub use residue_mass::*;
