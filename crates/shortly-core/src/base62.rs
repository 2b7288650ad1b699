//! Base62 codec for turning identifiers into short codes.
//!
//! The alphabet order is fixed: digits, then lowercase, then uppercase.
//! Encoding is injective over `u64` but the codes do not sort in numeric
//! order.

/// The 62 symbols, in digit-value order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of the longest code, `encode(u64::MAX)`.
pub const MAX_ENCODED_LEN: usize = 11;

const BASE: u64 = 62;

/// Encodes `n` as a base62 string. Zero encodes to `"0"`.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut digits = Vec::with_capacity(MAX_ENCODED_LEN);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base62 string back to the integer it encodes.
///
/// Returns `None` for an empty string, a symbol outside the alphabet, or a
/// value that does not fit in a `u64`.
pub fn decode(code: &str) -> Option<u64> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0_u64, |acc, byte| {
        let digit = digit_value(byte)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Returns whether `byte` is one of the 62 alphabet symbols.
pub fn is_symbol(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'z' => byte - b'a' + 10,
        b'A'..=b'Z' => byte - b'A' + 36,
        _ => return None,
    };
    Some(u64::from(value))
}
