//! Static table file formats for the transit delivery estimate engine.
//!
//! Every table is a list of row records stored in one of two layouts:
//!
//! - [`TableFormat::Json`] - A JSON array of objects, one per row
//! - [`TableFormat::Binary`] - Little-endian fixed-width records after a short header
//!
//! [`read_records`] and [`write_records`] work for any [`Record`]; the
//! row types live in [`records`].

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/transit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binary;
mod format;
pub mod records;

pub use binary::{BinaryField, MAGIC};
pub use format::{
    FormatError, Record, TableFormat, read_records, read_records_from, write_records,
    write_records_to,
};
