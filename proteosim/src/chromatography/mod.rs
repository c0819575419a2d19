mod histogram;
mod retention;

pub use histogram::*;
pub use retention::*;
