//! Byte-level JPEG fixtures shared by the unit tests

/// Build a minimal JPEG containing an EXIF APP1 segment whose IFD0
/// carries a single `DateTime` tag with the given value.
///
/// `datetime` must be in the EXIF format `YYYY:MM:DD HH:MM:SS`
/// (19 characters).
pub(crate) fn exif_jpeg(datetime: &str) -> Vec<u8> {
    assert_eq!(datetime.len(), 19, "EXIF datetime must be 19 characters");

    // TIFF body, little endian: header, one-entry IFD0, tag value.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&0x2Au16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset

    tiff.extend_from_slice(&1u16.to_le_bytes()); // entry count
    tiff.extend_from_slice(&0x0132u16.to_le_bytes()); // DateTime
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&20u32.to_le_bytes()); // 19 chars + NUL
    tiff.extend_from_slice(&26u32.to_le_bytes()); // value offset
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    tiff.extend_from_slice(datetime.as_bytes());
    tiff.push(0);

    let mut app1 = Vec::new();
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut jpeg = Vec::new();
    jpeg.extend_from_slice(&[0xFF, 0xD8]); // SOI
    jpeg.extend_from_slice(&[0xFF, 0xE1]); // APP1
    jpeg.extend_from_slice(&((app1.len() as u16 + 2).to_be_bytes()));
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI
    jpeg
}

/// Build a minimal JFIF JPEG with no EXIF segment at all.
pub(crate) fn jfif_jpeg_no_exif() -> Vec<u8> {
    let mut jpeg = Vec::new();
    jpeg.extend_from_slice(&[0xFF, 0xD8]); // SOI
    jpeg.extend_from_slice(&[0xFF, 0xE0]); // APP0
    jpeg.extend_from_slice(&16u16.to_be_bytes());
    jpeg.extend_from_slice(b"JFIF\0");
    jpeg.extend_from_slice(&[0x01, 0x01]); // version 1.1
    jpeg.push(0x00); // aspect-ratio units
    jpeg.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]); // density 1x1
    jpeg.extend_from_slice(&[0x00, 0x00]); // no thumbnail
    jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI
    jpeg
}
