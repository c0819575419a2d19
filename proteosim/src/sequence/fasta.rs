use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use context_error::*;
use indexmap::IndexMap;

use crate::{Error, ProteosimError};

/// Read a FASTA file into a map of protein identifiers to sequences, see [`parse_fasta`].
/// # Errors
/// If the file could not be opened or is not a valid FASTA file.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<IndexMap<String, String>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        BoxedError::new(
            ProteosimError::Io,
            "Failed reading fasta file",
            format!("Error occurred while opening the file: {err}"),
            Context::default().source(path.to_string_lossy()).to_owned(),
        )
    })?;
    parse_fasta(BufReader::new(file), Some(path))
}

/// Parse a FASTA file from a reader, the path is only used to give better error messages.
///
/// Lines are trimmed and empty lines are skipped. The identifier of a protein is the second
/// `|` separated field of its header (`>sp|P12345|NAME_HUMAN` gives `P12345`), the
/// sequence lines that follow are concatenated. If the same identifier is used twice the
/// last sequence is kept.
///
/// Sequence lines before the first header are an error, they are not prepended to the
/// sequence of the first protein as some readers do.
/// # Errors
/// If the reader fails, a header has no identifier field, or sequence data is found before the first header.
pub fn parse_fasta(
    reader: impl BufRead,
    path: Option<&Path>,
) -> Result<IndexMap<String, String>, Error> {
    let base_context = || {
        path.map_or_else(Context::none, |p| {
            Context::default().source(p.to_string_lossy()).to_owned()
        })
    };
    let mut proteins = IndexMap::new();
    let mut current: Option<(String, String)> = None;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            BoxedError::new(
                ProteosimError::Io,
                "Failed reading fasta file",
                format!("Error occurred while reading line {}: {err}", line_index + 1),
                base_context(),
            )
        })?;
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if let Some(header) = stripped.strip_prefix('>') {
            if let Some((id, sequence)) = current.take() {
                proteins.insert(id, sequence);
            }
            let id = header.split('|').nth(1).ok_or_else(|| {
                BoxedError::new(
                    ProteosimError::Parse,
                    "Invalid fasta header",
                    "The header should contain the protein identifier as its second `|` separated field, like `>sp|P12345|NAME`",
                    base_context()
                        .line_index(line_index as u32)
                        .lines(0, stripped)
                        .to_owned(),
                )
            })?;
            current = Some((id.to_string(), String::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            sequence.push_str(stripped);
        } else {
            return Err(BoxedError::new(
                ProteosimError::Parse,
                "Invalid fasta file",
                "Sequence data was found before the first header",
                base_context()
                    .line_index(line_index as u32)
                    .lines(0, stripped)
                    .to_owned(),
            ));
        }
    }
    if let Some((id, sequence)) = current {
        proteins.insert(id, sequence);
    }

    log::debug!("read {} proteins from fasta", proteins.len());
    Ok(proteins)
}
