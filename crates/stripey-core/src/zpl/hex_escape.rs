//! `^FH` hex escapes in field data.

use super::ParseError;

/// Replace `<indicator>XX` sequences with the byte `0xXX`.
///
/// The resulting bytes are read as UTF-8, so multi-byte characters can be
/// written as consecutive escapes (`_C3_A9` -> `é`).
pub fn decode_hex_escapes(data: &str, indicator: char) -> Result<String, ParseError> {
    let mut bytes = Vec::with_capacity(data.len());
    let mut chars = data.char_indices();

    while let Some((position, ch)) = chars.next() {
        if ch != indicator {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let high = chars.next().and_then(|(_, c)| c.to_digit(16));
        let low = chars.next().and_then(|(_, c)| c.to_digit(16));
        match (high, low) {
            (Some(high), Some(low)) => bytes.push((high * 16 + low) as u8),
            _ => return Err(ParseError::InvalidHexEscape { position }),
        }
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
