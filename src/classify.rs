//! Content classification using magic bytes
//!
//! Probes the first few kilobytes of a stream with the `infer` crate to
//! decide whether the content is a supported input. Detection works on
//! file headers, so renamed files and missing extensions are handled
//! correctly.

use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};

/// Number of header bytes read for the probe. `infer` only needs the
/// first handful of bytes for every type it knows about.
const PROBE_LEN: u64 = 8192;

/// Outcome of classifying a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Content is a supported image type
    Eligible,
    /// Content is some other type; carries the detected MIME type
    /// (or "unknown") for the skip report
    Ineligible { detected: String },
}

/// Classify an open stream by its magic bytes.
///
/// Reads at most [`PROBE_LEN`] bytes and rewinds the stream to the
/// start afterwards, so downstream stages can re-read from byte 0.
/// Only `image/jpeg` content is eligible.
pub fn classify<R: Read + Seek>(name: &str, reader: &mut R) -> Result<Classification> {
    let mut header = Vec::with_capacity(PROBE_LEN as usize);
    reader
        .by_ref()
        .take(PROBE_LEN)
        .read_to_end(&mut header)
        .map_err(|e| Error::Probe {
            name: name.to_string(),
            source: e,
        })?;

    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| Error::Probe {
            name: name.to_string(),
            source: e,
        })?;

    let detected = infer::get(&header).map(|kind| kind.mime_type());

    match detected {
        Some("image/jpeg") => Ok(Classification::Eligible),
        Some(other) => Ok(Classification::Ineligible {
            detected: other.to_string(),
        }),
        None => Ok(Classification::Ineligible {
            detected: "unknown".to_string(),
        }),
    }
}
