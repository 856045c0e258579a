/// Reads bytes as if they were single-byte graphemes
/// part of a ISO8859-1 string
/// (GPMF FourCC and text payloads may exceed the ASCII range,
/// so decoding these as UTF-8 can fail).
///
/// Note that the returned `String` is a standard UTF-8
/// encoded string.
pub(crate) fn string_from_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|b| *b as char).collect()
}

/// As `string_from_latin1`, but with trailing null bytes stripped.
/// Fixed-width unit labels such as `m\0\0` are null padded
/// up to the declared element size.
pub(crate) fn string_from_latin1_padded(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    string_from_latin1(&bytes[..end])
}
