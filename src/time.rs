//! EXIF time extraction
//!
//! Operates on the stream the worker already holds open; the classifier
//! rewinds it before this stage runs.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::io::{BufRead, Seek};
use tracing::trace;

/// EXIF tags to try for date extraction, in priority order
const DATE_TAGS: &[Tag] = &[
    Tag::DateTimeOriginal,  // When the original image was taken
    Tag::DateTimeDigitized, // When the image was digitized
    Tag::DateTime,          // File modification date/time
];

/// Extract the capture time from the EXIF block of an open stream.
///
/// Fails with [`Error::NoMetadata`] when the container has no EXIF
/// block or none of the date tags holds a parsable timestamp. Never
/// returns a partial result.
pub fn extract_time<R: BufRead + Seek>(name: &str, reader: &mut R) -> Result<NaiveDateTime> {
    let exif = Reader::new()
        .read_from_container(reader)
        .map_err(|e| Error::NoMetadata {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    // Try each date tag in priority order
    for tag in DATE_TAGS {
        if let Some(field) = exif.get_field(*tag, In::PRIMARY)
            && let Some(datetime) = parse_exif_datetime(&field.display_value().to_string())
        {
            trace!(name, ?tag, "Found EXIF date");
            return Ok(datetime);
        }
    }

    Err(Error::NoMetadata {
        name: name.to_string(),
        message: "no valid date tag found in EXIF data".to_string(),
    })
}

/// Parse EXIF datetime string format: "YYYY:MM:DD HH:MM:SS"
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    // EXIF format: "2024:01:15 14:30:00" or with quotes
    let s = s.trim().trim_matches('"');

    // Try standard EXIF format
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    // Try with subseconds
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%.f") {
        return Some(dt);
    }

    // Try alternative formats
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{exif_jpeg, jfif_jpeg_no_exif};
    use chrono::{Datelike, Timelike};
    use std::io::Cursor;

    #[test]
    fn test_parse_exif_datetime() {
        // Standard EXIF format
        let dt = parse_exif_datetime("2024:01:15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 0);

        // With quotes
        let dt = parse_exif_datetime("\"2024:01:15 14:30:00\"").unwrap();
        assert_eq!(dt.year(), 2024);

        // Alternative formats
        let dt = parse_exif_datetime("2024-01-15 14:30:00").unwrap();
        assert_eq!(dt.year(), 2024);

        // Invalid format
        assert!(parse_exif_datetime("invalid").is_none());
    }

    #[test]
    fn test_extract_time_from_container() {
        let mut cursor = Cursor::new(exif_jpeg("2023:06:15 10:30:00"));

        let dt = extract_time("a.jpg", &mut cursor).unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 6);
        assert_eq!(dt.day(), 15);
    }

    #[test]
    fn test_extract_time_without_exif_block() {
        let mut cursor = Cursor::new(jfif_jpeg_no_exif());

        let err = extract_time("b.jpg", &mut cursor).unwrap_err();
        assert!(matches!(err, Error::NoMetadata { ref name, .. } if name == "b.jpg"));
    }
}
