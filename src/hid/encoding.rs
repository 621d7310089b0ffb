//! Base 36 / base 62 encoding and separator grouping.

/// Separator used when grouping is requested without an explicit one.
pub const DEFAULT_SEPARATOR: char = '-';

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn base(include_uppercase: bool) -> u64 {
    if include_uppercase {
        62
    } else {
        36
    }
}

/// Encode `value` in base 36 (`0-9a-z`) or base 62 (`0-9a-zA-Z`).
pub fn encode(mut value: u64, include_uppercase: bool) -> String {
    let base = base(include_uppercase);
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(16);
    while value > 0 {
        digits.push(ALPHABET[(value % base) as usize]);
        value /= base;
    }
    digits.reverse();

    // The alphabet is ASCII so this cannot fail.
    String::from_utf8(digits).unwrap_or_default()
}

/// Decode an identifier produced by [`encode`], ignoring separator characters.
///
/// Returns `None` on overflow, when no digit is present, or on an uppercase
/// letter in base 36.
pub fn decode(id: &str, include_uppercase: bool) -> Option<u64> {
    let base = base(include_uppercase);
    let mut value: u64 = 0;
    let mut seen = false;

    for c in id.chars() {
        let digit = match c {
            '0'..='9' => c as u64 - '0' as u64,
            'a'..='z' => c as u64 - 'a' as u64 + 10,
            'A'..='Z' if include_uppercase => c as u64 - 'A' as u64 + 36,
            // not a base 36 digit
            'A'..='Z' => return None,
            _ => continue,
        };
        value = value.checked_mul(base)?.checked_add(digit)?;
        seen = true;
    }

    seen.then_some(value)
}

/// Insert `separator` after every `every` characters, never after the last one.
///
/// `every == 0` returns the input unchanged.
pub fn insert_every(s: &str, every: usize, separator: char) -> String {
    if every == 0 {
        return s.to_string();
    }

    let count = s.chars().count();
    let mut out = String::with_capacity(s.len() + count / every);

    for (i, c) in s.chars().enumerate() {
        out.push(c);
        if (i + 1) % every == 0 && i + 1 != count {
            out.push(separator);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_base36() {
        assert_eq!(encode(0, false), "0");
        assert_eq!(encode(35, false), "z");
        assert_eq!(encode(36, false), "10");
        assert_eq!(encode(u64::MAX, false), "3w5e11264sgsf");
    }

    #[test]
    fn test_encode_base62() {
        assert_eq!(encode(61, true), "Z");
        assert_eq!(encode(62, true), "10");
        assert_eq!(encode(36, true), "A");
    }

    #[test]
    fn test_decode_skips_separators() {
        let raw = 1_700_000_000_123_456_789u64;
        let grouped = insert_every(&encode(raw, true), 3, '-');
        assert_eq!(decode(&grouped, true), Some(raw));
        assert_eq!(decode("---", false), None);
    }

    #[test]
    fn test_insert_every() {
        assert_eq!(insert_every("ab12cd34", 4, '-'), "ab12-cd34");
        assert_eq!(insert_every("ab12cd345", 4, '-'), "ab12-cd34-5");
        assert_eq!(insert_every("abc", 1, '.'), "a.b.c");
        assert_eq!(insert_every("abc", 5, '-'), "abc");
        assert_eq!(insert_every("abc", 0, '-'), "abc");
    }

    #[test]
    fn test_decode_rejects_uppercase_in_base36() {
        assert_eq!(decode("aZ", false), None);
        assert_eq!(decode("aZ", true), Some(10 * 62 + 61));
        assert_eq!(decode("a-z", false), Some(10 * 36 + 35));
    }
}
