//! The [`ProteosimError`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::ErrorKind;

/// The kind of error that can occur in any of the operations of this crate
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ProteosimError {
    /// A caller supplied value is outside of its domain, for example an inverted range or a charge of zero
    #[default]
    InvalidArgument,
    /// A residue is missing from the table that was used to score it
    Lookup,
    /// A file or JSON document does not follow the expected format
    Parse,
    /// A file could not be opened or read
    Io,
}

impl ErrorKind for ProteosimError {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}
