use std::{any::type_name, path::Path};

use context_error::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, ProteosimError};

/// Custom JSON parser, used for all structures that can be read from configuration files so
/// that any failure is reported with the offending JSON as context.
pub trait ParseJson: Sized {
    /// Parse a JSON value element into this structure
    /// # Errors
    /// If the JSON is not valid to the format
    fn from_json_value(value: Value) -> Result<Self, Error>;

    /// Parse a string containing JSON into this structure
    /// # Errors
    /// If the JSON is not valid to the format
    fn from_json(value: &str) -> Result<Self, Error> {
        let value = serde_json::from_str::<Value>(value).map_err(|err| {
            BoxedError::new(
                ProteosimError::Parse,
                format!("Invalid JSON (for {})", type_name::<Self>()),
                err.to_string(),
                Context::show(value.to_string()),
            )
        })?;
        Self::from_json_value(value)
    }

    /// Read a file and parse its content as JSON into this structure
    /// # Errors
    /// If the file could not be read or the JSON is not valid to the format
    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path).map_err(|err| {
            BoxedError::new(
                ProteosimError::Io,
                format!("Could not read JSON file (for {})", type_name::<Self>()),
                err.to_string(),
                Context::default().source(path.to_string_lossy()).to_owned(),
            )
        })?;
        log::debug!("parsing {} from {}", type_name::<Self>(), path.display());
        Self::from_json(&string)
    }
}

/// Parse a JSON value element into this structure using the serde JSON parser
/// # Errors
/// If the JSON is not valid to the format
#[expect(clippy::needless_pass_by_value)]
pub fn use_serde<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value.clone()).map_err(|err| {
        BoxedError::new(
            ProteosimError::Parse,
            format!("Could not parse JSON into {}", type_name::<T>()),
            err.to_string(),
            Context::show(value.to_string()),
        )
    })
}
