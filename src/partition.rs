use std::ops::Range;

use memchr::memchr;

/// Splits `input` into `parts` contiguous ranges of roughly `len / parts`
/// bytes. Every range but the last ends right after a `\n`; the last one
/// takes whatever is left, newline-terminated or not. Ranges may be empty.
///
/// # Panics
///
/// If `parts` is zero.
pub fn partition(input: &[u8], parts: usize) -> Vec<Range<usize>> {
    assert!(parts > 0, "cannot split input into zero ranges");
    let len = input.len();
    let target = len / parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;

    for _ in 1..parts {
        let nominal = start + target;
        let end = if target == 0 {
            start
        } else if nominal >= len {
            len
        } else {
            // A newline at `nominal - 1` already closes the range.
            match memchr(b'\n', &input[nominal - 1..]) {
                Some(i) => nominal + i,
                None => len,
            }
        };
        ranges.push(start..end);
        start = end;
    }
    ranges.push(start..len);
    ranges
}
