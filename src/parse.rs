//! Decoding of `-?d.d` / `-?dd.d` temperatures into integer tenths.

/// Decodes a well-formed temperature token into tenths of a degree.
///
/// The token must be exactly the bytes between `;` and the end of line.
/// There is no grammar check: a short token panics on the index, any other
/// malformed token yields an unspecified value.
#[inline]
pub fn parse_tenths(token: &[u8]) -> i32 {
    let negative = (token[0] == b'-') as usize;
    let digits = &token[negative..];
    // 1 for `dd.d`, 0 for `d.d`
    let wide = (digits[1] != b'.') as i32;

    let d0 = digits[0] as i32 - b'0' as i32;
    let d1 = digits[1] as i32 - b'0' as i32;
    let frac = digits[2 + wide as usize] as i32 - b'0' as i32;

    let magnitude = (d0 * (1 + 9 * wide) + d1 * wide) * 10 + frac;
    magnitude * (1 - 2 * negative as i32)
}

/// Like [`parse_tenths`], but returns `None` for anything outside the grammar.
pub fn parse_tenths_checked(token: &[u8]) -> Option<i32> {
    let (negative, digits) = match token.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, token),
    };
    let magnitude = match *digits {
        [a, b'.', c] if a.is_ascii_digit() && c.is_ascii_digit() => {
            i32::from(a - b'0') * 10 + i32::from(c - b'0')
        }
        [a, b, b'.', c] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
            i32::from(a - b'0') * 100 + i32::from(b - b'0') * 10 + i32::from(c - b'0')
        }
        _ => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}
