//! Code page 437 to UTF-8 transcoding.
//!
//! Bytes below 0x80 map to themselves, control characters included.
//! The upper half maps to the box drawing, shading and accented glyphs
//! that DOS-era artwork is drawn with.

/// Glyphs for bytes 0x80..=0xFF.
const HIGH_HALF: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', //
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', //
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', //
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', //
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', //
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', //
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', //
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

/// Decode a single CP437 byte.
pub fn decode(byte: u8) -> char {
    if byte < 0x80 {
        char::from(byte)
    } else {
        HIGH_HALF[usize::from(byte - 0x80)]
    }
}

/// Append the UTF-8 encoding of a CP437 byte to `out`.
pub fn transcode_into(byte: u8, out: &mut Vec<u8>) {
    if byte < 0x80 {
        out.push(byte);
    } else {
        let mut buf = [0u8; 4];
        out.extend_from_slice(decode(byte).encode_utf8(&mut buf).as_bytes());
    }
}

/// Transcode a whole CP437 byte slice into a UTF-8 string.
pub fn transcode(bytes: &[u8]) -> String {
    bytes.iter().copied().map(decode).collect()
}
