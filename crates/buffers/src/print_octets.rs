//! Hex dumps of byte strings for diagnostics and mismatch reports.

/// Bytes shown by [`print_octets_default`] before eliding the rest.
pub const DEFAULT_OCTET_LIMIT: usize = 16;

/// Renders at most `limit` bytes as space-separated lowercase hex pairs.
///
/// Anything past the limit is summarized as `... (+N)`.
///
/// ```
/// use msgpack_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0xd4, 0x2a, 0x61], 16), "d4 2a 61");
/// assert_eq!(print_octets(&[0x90, 0x91, 0x92], 2), "90 91 ... (+1)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], limit: usize) -> String {
    let mut out = String::with_capacity(octets.len().min(limit) * 3 + 12);
    for (i, byte) in octets.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    if octets.len() > limit {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("... (+{})", octets.len() - limit));
    }
    out
}

pub fn print_octets_default(octets: &[u8]) -> String {
    print_octets(octets, DEFAULT_OCTET_LIMIT)
}
