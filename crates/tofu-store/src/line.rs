//! Byte-level framing of store lines.

/// Whitespace as the C locale classifies it, vertical tab included.
pub(crate) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Everything after `<key><whitespace>` if `line` is a record for `key`.
///
/// The key must be followed by a whitespace byte, so `a.com:80` never
/// matches a line for `a.com:8080`.
pub(crate) fn value_after_key<'a>(line: &'a [u8], key: &str) -> Option<&'a [u8]> {
    let rest = line.strip_prefix(key.as_bytes())?;
    let (&sep, value) = rest.split_first()?;
    is_space(sep).then_some(value)
}

/// Split a line at its first whitespace byte into key and value.
pub(crate) fn split_record(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = line.iter().position(|&b| is_space(b))?;
    Some((&line[..at], &line[at + 1..]))
}

/// Trim C-locale whitespace from both ends.
pub(crate) fn trim(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !is_space(*first) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !is_space(*last) {
            break;
        }
        bytes = rest;
    }
    bytes
}
