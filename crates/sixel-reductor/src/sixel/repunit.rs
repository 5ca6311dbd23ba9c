//! Sixel run-length primitives.

/// Offset added to a 6-bit column pattern to form its sixel character.
pub const PATTERN_BASE: u8 = 0x3f;

/// Append `n` copies of `pattern`.
///
/// Runs of four or more use the `!{n}{ch}` repeat introducer; shorter runs
/// are written out literally since the introducer would not be shorter.
#[inline]
pub fn push_repunit(buf: &mut Vec<u8>, n: usize, pattern: u8) {
    let ch = pattern + PATTERN_BASE;
    if n >= 4 {
        buf.push(b'!');
        push_decimal(buf, n);
        buf.push(ch);
    } else {
        buf.extend(std::iter::repeat(ch).take(n));
    }
}

/// Append `n` in decimal.
#[inline]
pub fn push_decimal(buf: &mut Vec<u8>, n: usize) {
    buf.extend_from_slice(n.to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repunit(n: usize, pattern: u8) -> String {
        let mut buf = Vec::new();
        push_repunit(&mut buf, n, pattern);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_short_runs_are_literal() {
        assert_eq!(repunit(0, 1), "");
        assert_eq!(repunit(1, 1), "@");
        assert_eq!(repunit(3, 0), "???");
    }

    #[test]
    fn test_long_runs_use_introducer() {
        assert_eq!(repunit(4, 63), "!4~");
        assert_eq!(repunit(120, 0), "!120?");
    }
}
