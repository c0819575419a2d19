mod coverage;
mod digest;
mod fasta;
mod protease;

pub use coverage::*;
pub use digest::*;
pub use fasta::*;
pub use protease::*;
