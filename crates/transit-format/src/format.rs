//! Table file layouts and the generic record reader/writer.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BinaryField, MAGIC};

/// Upper bound on the capacity reserved from a binary header's record count.
const MAX_PREALLOCATED: usize = 1 << 16;

/// On-disk layout of a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// JSON array of row objects.
    #[default]
    Json,
    /// Little-endian binary records after a `TRT1` header.
    Binary,
}

impl TableFormat {
    /// Returns the conventional file extension for this layout.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }
}

impl std::fmt::Display for TableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

impl std::str::FromStr for TableFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "text" => Ok(Self::Json),
            "binary" | "bin" => Ok(Self::Binary),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while reading or writing table files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown table format name.
    #[error("Unknown table format: {0}")]
    UnknownFormat(String),

    /// I/O error on an unnamed stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error on an unnamed stream.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary stream without the expected header.
    #[error("Not a binary table: expected magic {MAGIC:?}, found {0:?}")]
    BadMagic([u8; 4]),

    /// Failed to open a table file.
    #[error("Failed to open table '{path}': {source}")]
    Open {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to read a table file.
    #[error("Failed to read table '{path}': {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a JSON table file.
    #[error("Failed to parse table '{path}': {source}")]
    Parse {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A binary table file without the expected header.
    #[error("Table '{path}' is not a binary table (found magic {found:?})")]
    NotBinary {
        /// The offending path.
        path: PathBuf,
        /// The first four bytes of the file.
        found: [u8; 4],
    },

    /// Failed to write a table file.
    #[error("Failed to write table '{path}': {source}")]
    Write {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying error.
        source: Box<Self>,
    },
}

impl FormatError {
    fn reading(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            Self::Io(source) => Self::Read { path, source },
            Self::Json(source) => Self::Parse { path, source },
            Self::BadMagic(found) => Self::NotBinary { path, found },
            other => other,
        }
    }
}

/// A table row that can be stored in every [`TableFormat`].
pub trait Record: BinaryField + Serialize + DeserializeOwned {}

impl<T: BinaryField + Serialize + DeserializeOwned> Record for T {}

/// Reads all records of a table file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be opened or decoded.
pub fn read_records<T: Record>(path: &Path, format: TableFormat) -> Result<Vec<T>, FormatError> {
    let file = File::open(path).map_err(|source| FormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records_from(BufReader::new(file), format).map_err(|e| e.reading(path))
}

/// Reads all records from a stream.
///
/// # Errors
///
/// Returns an error if the stream cannot be decoded in the given layout.
pub fn read_records_from<T: Record, R: Read>(
    mut reader: R,
    format: TableFormat,
) -> Result<Vec<T>, FormatError> {
    match format {
        TableFormat::Json => Ok(serde_json::from_reader(reader)?),
        TableFormat::Binary => {
            let mut magic = [0u8; 4];
            reader.read_exact(&mut magic)?;
            if magic != MAGIC {
                return Err(FormatError::BadMagic(magic));
            }
            let count = reader.read_u32::<LittleEndian>()? as usize;
            let mut records = Vec::with_capacity(count.min(MAX_PREALLOCATED));
            for _ in 0..count {
                records.push(T::read_from(&mut reader)?);
            }
            Ok(records)
        }
    }
}

/// Writes records to a table file, replacing any existing file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be created or written.
pub fn write_records<T: Record>(
    records: &[T],
    path: &Path,
    format: TableFormat,
) -> Result<(), FormatError> {
    let wrap = |source: FormatError| FormatError::Write {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let file = File::create(path).map_err(|e| wrap(e.into()))?;
    let mut writer = BufWriter::new(file);
    write_records_to(records, &mut writer, format).map_err(wrap)?;
    writer.flush().map_err(|e| wrap(e.into()))
}

/// Writes records to a stream.
///
/// # Errors
///
/// Returns an error if writing fails or the table has more than `u32::MAX` records.
pub fn write_records_to<T: Record, W: Write>(
    records: &[T],
    mut writer: W,
    format: TableFormat,
) -> Result<(), FormatError> {
    match format {
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        TableFormat::Binary => {
            let count = u32::try_from(records.len()).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, "too many records for one table")
            })?;
            writer.write_all(&MAGIC)?;
            writer.write_u32::<LittleEndian>(count)?;
            for record in records {
                record.write_to(&mut writer)?;
            }
        }
    }
    Ok(())
}
